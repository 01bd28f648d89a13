use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use pointer_shooter::compute::{handle_input, init_state};
use pointer_shooter::config::GameConfig;
use pointer_shooter::geometry::{Size, Vector};
use pointer_shooter::input::{translate, HeldKeys, InputEvent, HOLD_WINDOW_MS};
use pointer_shooter::terminal::Viewport;

fn viewport() -> Viewport {
    Viewport::new(40, 60, Size::new(400.0, 600.0))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, modifiers, kind))
}

#[test]
fn mouse_move_and_drag_track_pointer() {
    let vp = viewport();
    assert_eq!(
        translate(&mouse(MouseEventKind::Moved, 10, 20), &vp),
        Some(InputEvent::PointerMoved(Vector::new(105.0, 205.0)))
    );
    assert_eq!(
        translate(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0), &vp),
        Some(InputEvent::PointerMoved(Vector::new(5.0, 5.0)))
    );
}

#[test]
fn left_click_is_click_right_click_is_context_action() {
    let vp = viewport();
    assert_eq!(
        translate(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 4), &vp),
        Some(InputEvent::Click(Vector::new(35.0, 45.0)))
    );
    assert_eq!(
        translate(&mouse(MouseEventKind::Down(MouseButton::Right), 3, 4), &vp),
        Some(InputEvent::ContextAction)
    );
    assert_eq!(
        translate(&mouse(MouseEventKind::Up(MouseButton::Left), 3, 4), &vp),
        None
    );
}

#[test]
fn keys_fire_and_report_repeats() {
    let vp = viewport();
    assert_eq!(
        translate(&key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Press), &vp),
        Some(InputEvent::Key { repeat: false })
    );
    assert_eq!(
        translate(&key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Repeat), &vp),
        Some(InputEvent::Key { repeat: true })
    );
    assert_eq!(
        translate(&key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Release), &vp),
        None
    );
}

#[test]
fn quit_keys() {
    let vp = viewport();
    for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
        assert_eq!(
            translate(&key(code, KeyModifiers::NONE, KeyEventKind::Press), &vp),
            Some(InputEvent::Quit)
        );
    }
    assert_eq!(
        translate(&key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press), &vp),
        Some(InputEvent::Quit)
    );
    assert_eq!(
        translate(
            &key(KeyCode::Char('C'), KeyModifiers::CONTROL | KeyModifiers::SHIFT, KeyEventKind::Press),
            &vp
        ),
        Some(InputEvent::Quit)
    );
    // Plain 'c' is just a fire key.
    assert_eq!(
        translate(&key(KeyCode::Char('c'), KeyModifiers::NONE, KeyEventKind::Press), &vp),
        Some(InputEvent::Key { repeat: false })
    );
}

#[test]
fn other_events_are_ignored() {
    let vp = viewport();
    assert_eq!(translate(&Event::FocusGained, &vp), None);
    assert_eq!(translate(&Event::Resize(80, 24), &vp), None);
}

// ── held keys ─────────────────────────────────────────────────────────────────

fn press(code: KeyCode) -> Event {
    key(code, KeyModifiers::NONE, KeyEventKind::Press)
}

#[test]
fn auto_repeat_reported_as_presses_fires_once() {
    let vp = viewport();
    let mut keys = HeldKeys::new();
    let mut state = init_state(GameConfig::default());

    // Classic terminal: the OS repeat shows up as more presses, no release.
    for now_ms in [0.0, 500.0, 530.0, 560.0, 590.0] {
        if let Some(event) = keys.translate(&press(KeyCode::Char(' ')), &vp, now_ms) {
            handle_input(&mut state, event);
        }
    }
    assert_eq!(state.bullets.len(), 1);
}

#[test]
fn held_key_is_forgotten_on_release_or_silence() {
    let vp = viewport();
    let mut keys = HeldKeys::new();
    let space = KeyCode::Char(' ');

    assert_eq!(
        keys.translate(&press(space), &vp, 0.0),
        Some(InputEvent::Key { repeat: false })
    );
    assert_eq!(
        keys.translate(&press(space), &vp, 100.0),
        Some(InputEvent::Key { repeat: true })
    );

    keys.translate(&key(space, KeyModifiers::NONE, KeyEventKind::Release), &vp, 120.0);
    assert_eq!(
        keys.translate(&press(space), &vp, 130.0),
        Some(InputEvent::Key { repeat: false })
    );

    let later = 130.0 + HOLD_WINDOW_MS + 1.0;
    assert_eq!(
        keys.translate(&press(space), &vp, later),
        Some(InputEvent::Key { repeat: false })
    );
}

#[test]
fn held_keys_are_tracked_per_key() {
    let vp = viewport();
    let mut keys = HeldKeys::new();
    keys.translate(&press(KeyCode::Char(' ')), &vp, 0.0);
    assert_eq!(
        keys.translate(&press(KeyCode::Enter), &vp, 10.0),
        Some(InputEvent::Key { repeat: false })
    );
}

#[test]
fn held_keys_pass_mouse_events_through() {
    let vp = viewport();
    let mut keys = HeldKeys::new();
    assert_eq!(
        keys.translate(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 4), &vp, 0.0),
        Some(InputEvent::Click(Vector::new(35.0, 45.0)))
    );
}
