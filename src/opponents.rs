//! Opponents and the manager that owns them.

use std::rc::Rc;

use rand::Rng;

use crate::bullets::BulletManager;
use crate::config::GameConfig;
use crate::entities::{Entity, OpponentId, OpponentKind, Shape, Vec2};
use crate::player::Player;
use crate::render::{palette, Surface};
use crate::waves::Path;

#[derive(Clone, Debug)]
pub struct Opponent {
    pub id: OpponentId,
    pub kind: OpponentKind,
    pub pos: Vec2,
    origin: Vec2,
    path: Rc<Path>,
    /// Time since spawn; the position is a pure function of it.
    age_ms: f32,
    fire_timer_ms: f32,
    alive: bool,
}

impl Opponent {
    fn new(id: OpponentId, kind: OpponentKind, origin: Vec2, path: Rc<Path>, age_ms: f32) -> Self {
        let pos = path.position_at(origin, age_ms).unwrap_or(origin);
        Opponent {
            id,
            kind,
            pos,
            origin,
            path,
            age_ms,
            fire_timer_ms: 0.0,
            alive: true,
        }
    }

    pub fn score(&self) -> u32 {
        self.kind.score()
    }

    pub fn age_ms(&self) -> f32 {
        self.age_ms
    }

    /// Move along the path.  Returns `false` once the path is completed.
    fn advance(&mut self, elapsed_ms: f32) -> bool {
        self.age_ms += elapsed_ms;
        match self.path.position_at(self.origin, self.age_ms) {
            Some(pos) => {
                self.pos = pos;
                true
            }
            None => false,
        }
    }
}

impl Entity for Opponent {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn shape(&self) -> Shape {
        Shape::Circle {
            center: self.pos,
            radius: self.kind.radius(),
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Owns the live opponents in spawn order.
#[derive(Clone, Debug)]
pub struct OpponentManager {
    opponents: Vec<Opponent>,
    next_id: u64,
    fire_chance: f64,
    bounds: Vec2,
}

impl OpponentManager {
    pub fn new(config: &GameConfig) -> Self {
        OpponentManager {
            opponents: Vec::new(),
            next_id: 0,
            fire_chance: config.opponents.fire_chance,
            bounds: Vec2::new(config.canvas.width, config.canvas.height),
        }
    }

    /// Append a freshly spawned opponent that has already been travelling
    /// for `age_ms`.
    pub fn add_opponent(&mut self, kind: OpponentKind, origin: Vec2, path: Rc<Path>, age_ms: f32) -> OpponentId {
        let id = OpponentId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.opponents.push(Opponent::new(id, kind, origin, path, age_ms));
        id
    }

    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opponent> {
        self.opponents.iter()
    }

    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponents.is_empty()
    }

    pub fn get(&self, id: OpponentId) -> Option<&Opponent> {
        self.opponents.iter().find(|o| o.id == id)
    }

    /// Move every opponent, let them fire, drop the ones whose path ended.
    ///
    /// Shots aim at `target` when it lies below the shooter and go straight
    /// down otherwise.  `firing == false` suppresses every shot.
    pub fn update(
        &mut self,
        elapsed_ms: f32,
        bullets: &mut BulletManager,
        target: Option<Vec2>,
        firing: bool,
        rng: &mut impl Rng,
    ) {
        let bounds = self.bounds;
        for opponent in self.opponents.iter_mut() {
            if !opponent.advance(elapsed_ms) {
                log::debug!("{:?} left the screen", opponent.id);
                opponent.alive = false;
                continue;
            }
            if !firing {
                continue;
            }

            opponent.fire_timer_ms += elapsed_ms;
            let interval = opponent.kind.fire_interval_ms();
            if opponent.fire_timer_ms < interval {
                continue;
            }
            opponent.fire_timer_ms = 0.0;

            let on_screen = (0.0..=bounds.x).contains(&opponent.pos.x)
                && (0.0..=bounds.y).contains(&opponent.pos.y);
            if on_screen && rng.gen::<f64>() < self.fire_chance {
                let direction = match target {
                    Some(t) if t.y > opponent.pos.y => t - opponent.pos,
                    _ => Vec2::Y,
                };
                bullets.fire(opponent.pos, direction);
            }
        }
        self.opponents.retain(|o| o.alive);
    }

    /// Remove an opponent after its score and particles were applied.
    pub fn handle_hit(&mut self, id: OpponentId) -> Option<Opponent> {
        let index = self.opponents.iter().position(|o| o.id == id)?;
        let mut opponent = self.opponents.remove(index);
        opponent.alive = false;
        Some(opponent)
    }

    /// Body contact between any opponent and the player.
    pub fn check_player_collision(&self, player: &Player) -> bool {
        if !player.is_alive() {
            return false;
        }
        let player_shape = player.shape();
        self.opponents
            .iter()
            .filter(|o| o.alive)
            .any(|o| o.shape().intersects(&player_shape))
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> std::io::Result<()> {
        for opponent in &self.opponents {
            let r = opponent.kind.radius();
            let Vec2 { x, y } = opponent.pos;
            surface.set_fill(match opponent.kind {
                OpponentKind::Drone => palette::DRONE,
                OpponentKind::Striker => palette::STRIKER,
                OpponentKind::Boss => palette::BOSS,
            });
            surface.fill_path(&[
                Vec2::new(x - r, y - r),
                Vec2::new(x + r, y - r),
                Vec2::new(x, y + r),
            ])?;
        }
        Ok(())
    }
}
