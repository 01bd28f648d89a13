//! Rendering layer — everything the game draws goes through `Surface`.
//!
//! Each `Renderable` receives the surface and the arena size. No game logic
//! is performed; this module only translates state into draw calls in arena
//! units. What backs the surface (terminal cells, a test recorder) is not
//! this module's concern.

use crate::compute::GameState;
use crate::entities::{Bullet, Crosshair, Enemy, Shooter};
use crate::geometry::{Size, Vector};
use crate::hp_bar::HpBar;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Rgb = Rgb(0xee, 0xee, 0xee);
pub const C_SHOOTER: Rgb = Rgb(0x55, 0x55, 0x55);
pub const C_ENEMY: Rgb = Rgb(0x33, 0x33, 0x33);
pub const C_BULLET: Rgb = Rgb(0x77, 0x77, 0x77);
pub const C_HP_BAR_BACK: Rgb = Rgb(0xff, 0x00, 0x00);
pub const C_HP_BAR_FILL: Rgb = Rgb(0x00, 0xff, 0x00);
/// Opaque stand-in for a faint translucent red (`#ff000022`) over the
/// background; cells have no alpha.
pub const C_CROSSHAIR: Rgb = Rgb(0xff, 0xbb, 0xbb);

// ── Drawing contract ──────────────────────────────────────────────────────────

pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb);

    /// Straight line with square caps; a zero-length line is a `width`-sized
    /// square centred on the point.
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb);
}

pub trait Renderable {
    fn render(&self, surface: &mut dyn Surface, arena: Size);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame: background, guide lines, bullets, enemies (with
/// their hp bars) and finally the shooter on top.
pub fn render(surface: &mut dyn Surface, state: &GameState) {
    let arena = state.config.arena;

    surface.fill_rect(0.0, 0.0, arena.w(), arena.h(), C_BACKGROUND);

    if state.config.display.show_crosshair {
        state.crosshair.render(surface, arena);
    }
    for bullet in &state.bullets {
        bullet.render(surface, arena);
    }
    for enemy in &state.enemies {
        enemy.render(surface, arena);
    }
    state.shooter.render(surface, arena);
}

// ── Entities ──────────────────────────────────────────────────────────────────

impl Renderable for Bullet {
    fn render(&self, surface: &mut dyn Surface, _arena: Size) {
        let p = self.body.position;
        surface.stroke_line(p.x, p.y, p.x, p.y, self.size, C_BULLET);
    }
}

impl Renderable for Enemy {
    fn render(&self, surface: &mut dyn Surface, _arena: Size) {
        let p = self.body.position;
        surface.fill_rect(p.x, p.y, self.size.w(), self.size.h(), C_ENEMY);
        draw_hp_bar(surface, &self.hp_bar, p, self.hittable.hp_ratio());
    }
}

impl Renderable for Shooter {
    fn render(&self, surface: &mut dyn Surface, _arena: Size) {
        let p = self.position;
        surface.fill_rect(p.x, p.y, self.size.w(), self.size.h(), C_SHOOTER);
    }
}

impl Renderable for Crosshair {
    fn render(&self, surface: &mut dyn Surface, arena: Size) {
        let p = self.position;
        surface.stroke_line(p.x, 0.0, p.x, arena.h(), 1.0, C_CROSSHAIR);
        surface.stroke_line(0.0, p.y, arena.w(), p.y, 1.0, C_CROSSHAIR);
    }
}

/// Red background with a green fill proportional to `hp_ratio`. Nothing is
/// drawn while the bar is hidden.
pub fn draw_hp_bar(surface: &mut dyn Surface, bar: &HpBar, hook: Vector, hp_ratio: f64) {
    if !bar.is_shown() {
        return;
    }
    let at = bar.anchor(hook);
    let left = at.x - bar.size.w() / 2.0;

    surface.fill_rect(left, at.y, bar.size.w(), bar.size.h(), C_HP_BAR_BACK);
    surface.fill_rect(
        left,
        at.y,
        bar.size.w() * hp_ratio.clamp(0.0, 1.0),
        bar.size.h(),
        C_HP_BAR_FILL,
    );
}
