//! Every kind of thing that lives on the arena.
//!
//! Constructors take their tuning from `config`; behaviour beyond simple
//! per-entity rules lives in `compute`.

use crate::config::{EnemyConfig, HpBarConfig};
use crate::geometry::{Size, Vector};
use crate::hp_bar::HpBar;
use crate::physics::{Body, Damageable, Hitbox, Hittable, Kinematic, Positioned};

/// Hit points removed by one bullet.
pub const HIT_DAMAGE: u32 = 1;

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub body: Body,
    /// Side of the square it is drawn with.
    pub size: f64,
    /// Set when the bullet lands; it is dropped at the end of the tick.
    pub hit: bool,
}

impl Bullet {
    pub fn new(position: Vector, velocity: Vector, size: f64) -> Self {
        Self {
            body: Body::at(position).with_velocity(velocity),
            size,
            hit: false,
        }
    }

    /// Still inside the arena's top edge and not spent on a hit.
    pub fn is_live(&self) -> bool {
        self.body.position.y >= 0.0 && !self.hit
    }
}

impl Positioned for Bullet {
    fn position(&self) -> Vector {
        self.body.position
    }
}

impl Kinematic for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: u64,
    pub body: Body,
    pub hittable: Hittable,
    pub size: Size,
    pub hp_bar: HpBar,
}

impl Enemy {
    /// An enemy with its top-left corner at `position` and a single hitbox
    /// covering its whole size.
    pub fn new(id: u64, position: Vector, cfg: &EnemyConfig, bar: &HpBarConfig) -> Self {
        let hitbox = Hitbox::new(Vector::ZERO, Vector::new(cfg.size.w(), cfg.size.h()));
        Self {
            id,
            body: Body::at(position)
                .with_velocity(cfg.velocity)
                .with_acceleration(cfg.acceleration)
                .with_max_speed(cfg.max_speed.into()),
            hittable: Hittable::new(cfg.mass, cfg.hp).with_hitbox(hitbox),
            size: cfg.size,
            hp_bar: HpBar::new(bar.offset, bar.size, bar.hide_delay_ms),
        }
    }

    pub fn hp(&self) -> u32 {
        self.hittable.hp()
    }

    /// One bullet's worth of damage, a knock-back from the bullet's velocity
    /// and the hp bar popping up. Returns the hp left.
    pub fn receive_hit(&mut self, impulse: Vector, now_ms: f64) -> u32 {
        let left = self.hittable.take_damage(HIT_DAMAGE);
        self.absorb_hit(impulse);
        self.hp_bar.show(now_ms);
        left
    }

    /// Above the arena's bottom edge with hit points left.
    pub fn is_live(&self, arena: Size) -> bool {
        self.body.position.y <= arena.h() && !self.hittable.is_destroyed()
    }
}

impl Positioned for Enemy {
    fn position(&self) -> Vector {
        self.body.position
    }
}

impl Kinematic for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Damageable for Enemy {
    fn hittable(&self) -> &Hittable {
        &self.hittable
    }

    fn hittable_mut(&mut self) -> &mut Hittable {
        &mut self.hittable
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Stands on the bottom edge; x follows the pointer, nothing integrates it.
#[derive(Clone, Debug, PartialEq)]
pub struct Shooter {
    /// Top-left corner.
    pub position: Vector,
    pub size: Size,
}

impl Shooter {
    /// Centred on the bottom edge of `arena`.
    pub fn new(arena: Size, size: Size) -> Self {
        Self {
            position: Vector::new(
                arena.w() / 2.0 - size.w() / 2.0,
                arena.h() - size.h(),
            ),
            size,
        }
    }

    /// Centre the shooter under `pointer_x`, keeping it inside the arena.
    pub fn track_pointer(&mut self, pointer_x: f64, arena: Size) {
        let right_limit = (arena.w() - self.size.w()).max(0.0);
        self.position.x = (pointer_x - self.size.w() / 2.0).min(right_limit).max(0.0);
    }

    /// Top-centre, where bullets leave from.
    pub fn muzzle(&self) -> Vector {
        Vector::new(self.position.x + self.size.w() / 2.0, self.position.y)
    }
}

impl Positioned for Shooter {
    fn position(&self) -> Vector {
        self.position
    }
}

/// Guide lines through the raw pointer position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Crosshair {
    pub position: Vector,
}

impl Positioned for Crosshair {
    fn position(&self) -> Vector {
        self.position
    }
}
