//! The player's ship.

use crate::config::GameConfig;
use crate::entities::{Entity, Shape, Vec2};
use crate::input::InputSnapshot;
use crate::render::{palette, Surface};

/// Gap between the ship and the bottom of the canvas.
const BOTTOM_MARGIN: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LifeState {
    Alive,
    /// Hidden and not collidable until the timer runs out.
    Respawning { remaining_ms: f32 },
    /// Lives exhausted; terminal.
    Destroyed,
}

#[derive(Clone, Debug)]
pub struct Player {
    /// Top-left corner.
    pos: Vec2,
    size: Vec2,
    speed: f32,
    lives: u32,
    life: LifeState,
    respawn_ms: f32,
    min_x: f32,
    max_x: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let size = Vec2::new(config.player.width, config.player.height);
        let border = config.canvas.border;
        Player {
            pos: Vec2::new(Self::spawn_x(config), Self::top_from_config(config)),
            size,
            speed: config.player.speed,
            lives: config.player.lives,
            life: LifeState::Alive,
            respawn_ms: config.player.respawn_ms,
            min_x: border,
            max_x: (config.canvas.width - border - size.x).max(border),
        }
    }

    /// Y of the ship's top edge for a given configuration.
    pub fn top_from_config(config: &GameConfig) -> f32 {
        config.canvas.height - config.player.height - BOTTOM_MARGIN
    }

    fn spawn_x(config: &GameConfig) -> f32 {
        (config.canvas.width - config.player.width) / 2.0
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn life_state(&self) -> LifeState {
        self.life
    }

    /// Visible and collidable.
    pub fn is_active(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn is_destroyed(&self) -> bool {
        self.life == LifeState::Destroyed
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Advance one tick.  Returns `true` once the game should end.
    ///
    /// `just_died` is this tick's collision verdict; it costs a life only
    /// while the ship is active.
    pub fn update(&mut self, keys: &InputSnapshot, elapsed_ms: f32, just_died: bool) -> bool {
        if just_died && self.is_active() {
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                log::info!("player destroyed, no lives left");
                self.life = LifeState::Destroyed;
                return true;
            }
            log::debug!("player lost a life, {} remaining", self.lives);
            self.life = LifeState::Respawning {
                remaining_ms: self.respawn_ms,
            };
            self.pos.x = (self.min_x + self.max_x) / 2.0;
            return false;
        }

        match self.life {
            LifeState::Destroyed => true,
            LifeState::Respawning { remaining_ms } => {
                let left = remaining_ms - elapsed_ms;
                self.life = if left <= 0.0 {
                    LifeState::Alive
                } else {
                    LifeState::Respawning { remaining_ms: left }
                };
                false
            }
            LifeState::Alive => {
                let dx = keys.horizontal() * self.speed * elapsed_ms;
                self.pos.x = (self.pos.x + dx).clamp(self.min_x, self.max_x);
                false
            }
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> std::io::Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        let Vec2 { x, y } = self.pos;
        let Vec2 { x: w, y: h } = self.size;
        surface.set_fill(palette::PLAYER);
        surface.fill_path(&[
            Vec2::new(x + w / 2.0, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x + w / 2.0, y + h * 0.75),
            Vec2::new(x, y + h),
        ])
    }
}

impl Entity for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn shape(&self) -> Shape {
        Shape::Rect {
            min: self.pos,
            size: self.size,
        }
    }

    fn is_alive(&self) -> bool {
        self.is_active()
    }
}
