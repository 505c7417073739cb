//! Bullet collections for the player and for opponents.

use crate::collision;
use crate::config::GameConfig;
use crate::entities::{Bullet, BulletOwner, OpponentId, Vec2};
use crate::input::InputSnapshot;
use crate::opponents::Opponent;
use crate::player::Player;
use crate::render::{self, palette, Surface};

/// Owns every live bullet of one owner.
///
/// The player variant spawns on fire input with a cooldown; the opponent
/// variant only moves and culls, spawning happens through [`BulletManager::fire`]
/// when an opponent asks for it.
#[derive(Clone, Debug)]
pub struct BulletManager {
    owner: BulletOwner,
    bullets: Vec<Bullet>,
    speed: f32,
    radius: f32,
    cooldown_ms: f32,
    since_last_shot: f32,
    /// Spawn height of player bullets (top edge of the ship).
    muzzle_y: f32,
    bounds: Vec2,
    scratch: Vec<usize>,
}

impl BulletManager {
    pub fn player(config: &GameConfig) -> Self {
        Self::new(BulletOwner::Player, config)
    }

    pub fn opponent(config: &GameConfig) -> Self {
        Self::new(BulletOwner::Opponent, config)
    }

    fn new(owner: BulletOwner, config: &GameConfig) -> Self {
        let speed = match owner {
            BulletOwner::Player => config.bullets.player_speed,
            BulletOwner::Opponent => config.bullets.opponent_speed,
        };
        BulletManager {
            owner,
            bullets: Vec::new(),
            speed,
            radius: config.bullets.radius,
            cooldown_ms: config.bullets.fire_cooldown_ms,
            // The first press fires immediately.
            since_last_shot: config.bullets.fire_cooldown_ms,
            muzzle_y: Player::top_from_config(config),
            bounds: Vec2::new(config.canvas.width, config.canvas.height),
            scratch: Vec::new(),
        }
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    /// Move, optionally fire, then prune dead and off-canvas bullets.
    ///
    /// `keys` and `player_center_x` only matter for the player variant; a
    /// missing centre means "do not fire this tick".
    pub fn update(
        &mut self,
        elapsed_ms: f32,
        keys: Option<&InputSnapshot>,
        player_center_x: Option<f32>,
    ) {
        for bullet in self.bullets.iter_mut().filter(|b| b.alive) {
            bullet.pos += bullet.vel * elapsed_ms;
        }

        if self.owner == BulletOwner::Player {
            self.since_last_shot += elapsed_ms;
            let firing = keys.is_some_and(|k| k.fire);
            if let (true, Some(x)) = (firing, player_center_x) {
                if self.since_last_shot >= self.cooldown_ms {
                    self.since_last_shot = 0.0;
                    self.bullets.push(Bullet::new(
                        Vec2::new(x, self.muzzle_y),
                        Vec2::new(0.0, -self.speed),
                        self.radius,
                    ));
                }
            }
        }

        self.prune();
    }

    /// Spawn a bullet travelling along `direction` at this manager's speed.
    pub fn fire(&mut self, origin: Vec2, direction: Vec2) {
        let dir = direction.try_normalize().unwrap_or(Vec2::Y);
        log::debug!("{:?} bullet fired from ({:.0}, {:.0})", self.owner, origin.x, origin.y);
        self.bullets
            .push(Bullet::new(origin, dir * self.speed, self.radius));
    }

    /// Consume bullets hitting opponents; credited ids are appended to `hits`.
    pub fn check_opponent_collision(&mut self, opponents: &[Opponent], hits: &mut Vec<OpponentId>) {
        self.scratch.clear();
        collision::resolve_hits(&mut self.bullets, opponents, &mut self.scratch);
        hits.extend(self.scratch.drain(..).map(|i| opponents[i].id));
        self.retain_alive();
    }

    /// Consume bullets hitting the player; returns whether it was hit.
    pub fn check_player_collision(&mut self, player: &Player) -> bool {
        let hit = collision::resolve_single(&mut self.bullets, player);
        self.retain_alive();
        hit
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> std::io::Result<()> {
        surface.set_fill(match self.owner {
            BulletOwner::Player => palette::PLAYER_BULLET,
            BulletOwner::Opponent => palette::OPPONENT_BULLET,
        });
        for bullet in &self.bullets {
            render::fill_dot(surface, bullet.pos, bullet.radius)?;
        }
        Ok(())
    }

    fn prune(&mut self) {
        let bounds = self.bounds;
        self.bullets.retain(|b| {
            b.alive && b.pos.x >= 0.0 && b.pos.x <= bounds.x && b.pos.y >= 0.0 && b.pos.y <= bounds.y
        });
    }

    fn retain_alive(&mut self) {
        self.bullets.retain(|b| b.alive);
    }
}
