//! Shared entity data: shapes, bullets, opponent kinds and game status.
//!
//! Managers own their collections; everything here is plain data plus the
//! small `Entity` capability trait the collision pass is written against.

pub use glam::Vec2;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Bounding shape used for collision tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    /// Axis-aligned box; `min` is the top-left corner.
    Rect { min: Vec2, size: Vec2 },
}

/// Capability set shared by everything that can collide.
pub trait Entity {
    fn position(&self) -> Vec2;
    fn shape(&self) -> Shape;
    fn is_alive(&self) -> bool;
}

// ── Game status ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Opponent,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub pos: Vec2,
    /// Pixels per millisecond.
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Bullet {
            pos,
            vel,
            radius,
            alive: true,
        }
    }
}

impl Entity for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn shape(&self) -> Shape {
        Shape::Circle {
            center: self.pos,
            radius: self.radius,
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Opponents ─────────────────────────────────────────────────────────────────

/// Closed set of opponent variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    Drone,
    Striker,
    Boss,
}

impl OpponentKind {
    /// Score awarded when an opponent of this kind is destroyed.
    pub fn score(self) -> u32 {
        match self {
            OpponentKind::Drone => 1,
            OpponentKind::Striker => 2,
            OpponentKind::Boss => 5,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            OpponentKind::Drone => 14.0,
            OpponentKind::Striker => 16.0,
            OpponentKind::Boss => 24.0,
        }
    }

    /// Milliseconds between fire attempts.
    pub fn fire_interval_ms(self) -> f32 {
        match self {
            OpponentKind::Drone => 2400.0,
            OpponentKind::Striker => 1500.0,
            OpponentKind::Boss => 900.0,
        }
    }
}

/// Stable handle to an opponent owned by the `OpponentManager`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpponentId(pub u64);
