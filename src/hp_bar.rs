//! Hit-point overlay that pops up over a damaged entity and hides itself.
//!
//! The bar never holds its hook: position and fill are passed in from the
//! owner at render time. Auto-hide is a deadline polled once per tick, so
//! a second `show` simply moves the deadline and there is never more than
//! one pending hide.

use crate::geometry::{Size, Vector};

pub const DEFAULT_HIDE_DELAY_MS: f64 = 5000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visibility {
    Hidden,
    Shown { hide_at_ms: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HpBar {
    /// Offset from the hook's position to the bar's top-centre.
    pub offset: Vector,
    pub size: Size,
    pub hide_delay_ms: f64,
    visibility: Visibility,
}

impl HpBar {
    pub fn new(offset: Vector, size: Size, hide_delay_ms: f64) -> Self {
        Self {
            offset,
            size,
            hide_delay_ms,
            visibility: Visibility::Hidden,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.visibility, Visibility::Shown { .. })
    }

    pub fn pending_hide_at(&self) -> Option<f64> {
        match self.visibility {
            Visibility::Shown { hide_at_ms } => Some(hide_at_ms),
            Visibility::Hidden => None,
        }
    }

    /// Show now and (re)start the hide countdown from `now_ms`.
    pub fn show(&mut self, now_ms: f64) {
        self.visibility = Visibility::Shown {
            hide_at_ms: now_ms + self.hide_delay_ms,
        };
    }

    /// Hide once the deadline has passed.
    pub fn update(&mut self, now_ms: f64) {
        if let Visibility::Shown { hide_at_ms } = self.visibility {
            if now_ms >= hide_at_ms {
                self.visibility = Visibility::Hidden;
            }
        }
    }

    /// Where the bar's top-centre sits for a hook standing at `hook_position`.
    pub fn anchor(&self, hook_position: Vector) -> Vector {
        let mut at = hook_position;
        at.add(self.offset);
        at
    }
}

impl Default for HpBar {
    fn default() -> Self {
        HpBar::new(Vector::ZERO, Size::new(40.0, 8.0), DEFAULT_HIDE_DELAY_MS)
    }
}
