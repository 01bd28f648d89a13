//! Terminal events → game input.
//!
//! Pointer coordinates are converted into arena units here, so the rest of
//! the game never sees terminal cells.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::geometry::Vector;
use crate::terminal::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to an arena position.
    PointerMoved(Vector),
    /// Primary click: move there, then fire.
    Click(Vector),
    /// Any other key. Only non-repeating presses fire.
    Key { repeat: bool },
    /// Secondary click: fire without moving.
    ContextAction,
    Quit,
}

pub fn translate(event: &Event, viewport: &Viewport) -> Option<InputEvent> {
    match event {
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let at = viewport.to_arena(*column, *row);
            match kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    Some(InputEvent::PointerMoved(at))
                }
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Click(at)),
                MouseEventKind::Down(MouseButton::Right) => Some(InputEvent::ContextAction),
                _ => None,
            }
        }
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => match (code, kind) {
            (_, KeyEventKind::Release) => None,
            (KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc, _) => Some(InputEvent::Quit),
            (KeyCode::Char('c' | 'C'), _) if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            (_, KeyEventKind::Repeat) => Some(InputEvent::Key { repeat: true }),
            (_, KeyEventKind::Press) => Some(InputEvent::Key { repeat: false }),
        },
        _ => None,
    }
}

// ── Held keys ─────────────────────────────────────────────────────────────────

/// A press of a key seen again within this many milliseconds counts as a
/// repeat. Longer than the usual OS auto-repeat delay (X11 defaults to 660).
pub const HOLD_WINDOW_MS: f64 = 700.0;

/// Remembers which keys are down so auto-repeat never fires twice.
///
/// Terminals honouring `REPORT_EVENT_TYPES` send real `Repeat`/`Release`
/// events and a key is forgotten on release. Classic terminals report
/// auto-repeat as fresh `Press` events and never send a release; there a key
/// stays held while its presses keep arriving within `HOLD_WINDOW_MS`.
#[derive(Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<KeyCode, f64>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// `translate`, with presses of an already-held key marked as repeats.
    pub fn translate(
        &mut self,
        event: &Event,
        viewport: &Viewport,
        now_ms: f64,
    ) -> Option<InputEvent> {
        let held = match event {
            Event::Key(KeyEvent { code, kind, .. }) => self.track(code, *kind, now_ms),
            _ => false,
        };
        match translate(event, viewport)? {
            InputEvent::Key { repeat } => Some(InputEvent::Key {
                repeat: repeat || held,
            }),
            other => Some(other),
        }
    }

    /// True when `code` was already down before this event.
    fn track(&mut self, code: &KeyCode, kind: KeyEventKind, now_ms: f64) -> bool {
        match kind {
            KeyEventKind::Release => {
                self.last_seen.remove(code);
                false
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let held = self
                    .last_seen
                    .get(code)
                    .is_some_and(|&last| now_ms - last <= HOLD_WINDOW_MS);
                self.last_seen.insert(code.clone(), now_ms);
                held
            }
        }
    }
}
