//! Kinematics and collision primitives.
//!
//! Entities opt into capabilities instead of inheriting a base class:
//! everything drawable on the arena is `Positioned`, things that move under
//! their own velocity are `Kinematic`, and things with hit points are
//! `Damageable`. A bullet is kinematic but never damageable; the shooter is
//! only positioned.

use crate::geometry::Vector;

// ── Velocity cap ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SpeedCap {
    #[default]
    Unbounded,
    Max(f64),
}

impl From<Option<f64>> for SpeedCap {
    fn from(max: Option<f64>) -> Self {
        max.map_or(SpeedCap::Unbounded, SpeedCap::Max)
    }
}

// ── Body ──────────────────────────────────────────────────────────────────────

/// Physical state of a moving entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
    pub max_speed: SpeedCap,
}

impl Body {
    pub fn at(position: Vector) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vector) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_max_speed(mut self, max_speed: SpeedCap) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Advance by `dt_ms` milliseconds with explicit (forward) Euler.
    ///
    /// Position uses the velocity from before this step, then velocity picks
    /// up acceleration and is clamped to the cap. Fine at frame-sized steps,
    /// not unconditionally stable for large ones.
    pub fn integrate(&mut self, dt_ms: f64) {
        let dt = dt_ms.max(0.0) / 1000.0;

        self.position += self.velocity * dt;
        self.velocity += self.acceleration * dt;

        if let SpeedCap::Max(max) = self.max_speed {
            let max = max.max(0.0);
            let speed = self.velocity.magnitude();
            // Zero speed never needs clamping (and must not be divided by).
            if speed > max && speed > 0.0 {
                self.velocity.scale(max / speed);
            }
        }
    }
}

// ── Hitbox ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in the owner's local frame.
///
/// Corners may be given in any order; bounds are resolved on every test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub a: Vector,
    pub b: Vector,
}

impl Hitbox {
    pub fn new(a: Vector, b: Vector) -> Self {
        Self { a, b }
    }

    /// Inclusive on every edge.
    pub fn includes(&self, p: Vector) -> bool {
        self.a.x.min(self.b.x) <= p.x
            && p.x <= self.a.x.max(self.b.x)
            && self.a.y.min(self.b.y) <= p.y
            && p.y <= self.a.y.max(self.b.y)
    }
}

// ── Hittable ──────────────────────────────────────────────────────────────────

/// Mass, hit points and hitboxes of something that can be shot.
#[derive(Clone, Debug, PartialEq)]
pub struct Hittable {
    pub mass: f64,
    hp: u32,
    max_hp: u32,
    pub hitboxes: Vec<Hitbox>,
}

impl Hittable {
    /// `hp` is both the starting and the maximum hit points.
    pub fn new(mass: f64, hp: u32) -> Self {
        Self {
            mass,
            hp,
            max_hp: hp,
            hitboxes: Vec::new(),
        }
    }

    pub fn with_hitbox(mut self, hitbox: Hitbox) -> Self {
        self.hitboxes.push(hitbox);
        self
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Current hp as a fraction of max, in `[0, 1]`.
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f64 / self.max_hp as f64
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp == 0
    }

    /// Returns the hp left after the hit.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hp = self.hp.saturating_sub(amount);
        self.hp
    }

    /// True if `point` falls inside any hitbox of an owner standing at `origin`.
    pub fn collides(&self, origin: Vector, point: Vector) -> bool {
        let mut relative = point;
        relative.subtract(origin);
        self.hitboxes.iter().any(|hb| hb.includes(relative))
    }
}

// ── Capabilities ──────────────────────────────────────────────────────────────

pub trait Positioned {
    fn position(&self) -> Vector;
}

pub trait Kinematic: Positioned {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn advance(&mut self, dt_ms: f64) {
        self.body_mut().integrate(dt_ms);
    }

    fn velocity(&self) -> Vector {
        self.body().velocity
    }
}

pub trait Damageable: Kinematic {
    fn hittable(&self) -> &Hittable;
    fn hittable_mut(&mut self) -> &mut Hittable;

    fn collides(&self, other: &dyn Positioned) -> bool {
        self.hittable().collides(self.position(), other.position())
    }

    /// Knock the body back: `v = (v * m + impulse) / m`.
    ///
    /// The projectile's own mass is not modelled, so `impulse` is a
    /// velocity-shaped kick. Massless bodies are not moved.
    fn absorb_hit(&mut self, impulse: Vector) {
        let mass = self.hittable().mass;
        if mass <= 0.0 {
            return;
        }
        let body = self.body_mut();
        let mut momentum = body.velocity * mass;
        momentum.add(impulse).scale(1.0 / mass);
        body.velocity = momentum;
    }
}
