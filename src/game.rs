//! Top-level orchestrator: one update and one draw per frame.

use rand::Rng;

use crate::bullets::BulletManager;
use crate::config::GameConfig;
use crate::effects::{Effect, UpdateUiFunctions};
use crate::entities::{GameStatus, OpponentId, Vec2};
use crate::input::InputSnapshot;
use crate::opponents::OpponentManager;
use crate::particles::ParticleManager;
use crate::player::Player;
use crate::render::{palette, Surface};
use crate::waves::WaveManager;

/// Owns every manager and the playing / game-over state.
#[derive(Clone, Debug)]
pub struct GameState {
    status: GameStatus,
    player: Player,
    player_bullets: BulletManager,
    opponent_bullets: BulletManager,
    opponents: OpponentManager,
    waves: WaveManager,
    particles: ParticleManager,
    canvas: Vec2,
    border: f32,
    banner_ms: f32,
    banner_remaining_ms: f32,
    effects: Vec<Effect>,
    hits: Vec<OpponentId>,
}

impl GameState {
    /// Build a fresh game.  `config` is expected to have passed
    /// [`GameConfig::validate`].
    pub fn new(config: &GameConfig) -> Self {
        GameState {
            status: GameStatus::Playing,
            player: Player::new(config),
            player_bullets: BulletManager::player(config),
            opponent_bullets: BulletManager::opponent(config),
            opponents: OpponentManager::new(config),
            waves: WaveManager::new(&config.waves),
            particles: ParticleManager::new(&config.particles),
            canvas: Vec2::new(config.canvas.width, config.canvas.height),
            border: config.canvas.border,
            banner_ms: config.waves.banner_ms,
            // Announce the first stage too.
            banner_remaining_ms: config.waves.banner_ms,
            effects: Vec::new(),
            hits: Vec::new(),
        }
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// Advance the simulation by `elapsed_ms` and return the effects the UI
    /// must apply, in the order they happened.
    ///
    /// All randomness comes through `rng` so callers control determinism.
    pub fn step(
        &mut self,
        elapsed_ms: f32,
        input: &mut InputSnapshot,
        paused: bool,
        rng: &mut impl Rng,
    ) -> &[Effect] {
        self.effects.clear();

        // 1. Menu edge is honoured even while paused.
        if input.take_escape() {
            self.effects.push(Effect::ToggleModal);
        }
        if paused {
            return &self.effects;
        }

        // 2. Move everything.
        let playing = self.status == GameStatus::Playing;
        let target = self.player.is_active().then(|| self.player.center());

        self.player_bullets
            .update(elapsed_ms, Some(&*input), target.map(|c| c.x));
        self.opponent_bullets.update(elapsed_ms, None, None);
        self.opponents
            .update(elapsed_ms, &mut self.opponent_bullets, target, playing, rng);

        self.banner_remaining_ms = (self.banner_remaining_ms - elapsed_ms).max(0.0);
        if playing {
            self.waves.update(elapsed_ms, &mut self.opponents);
            if self.waves.just_advanced() {
                self.banner_remaining_ms = self.banner_ms;
            }
        } else {
            self.waves.settle();
        }
        self.particles.update(elapsed_ms);

        if !playing {
            return &self.effects;
        }

        // 3. Player bullets against opponents: score, burst, then removal.
        self.hits.clear();
        self.player_bullets
            .check_opponent_collision(self.opponents.opponents(), &mut self.hits);
        for &id in &self.hits {
            let Some(opponent) = self.opponents.get(id) else {
                log::warn!("{id:?} credited twice in one tick; skipped");
                continue;
            };
            self.effects.push(Effect::IncrementScore(opponent.score()));
            self.particles.opponent_death(opponent, rng);
            self.opponents.handle_hit(id);
        }

        // 4. Anything against the player.
        let mut just_died = false;
        if self.player.is_active() {
            let shot = self.opponent_bullets.check_player_collision(&self.player);
            let rammed = self.opponents.check_player_collision(&self.player);
            if shot || rammed {
                just_died = true;
                let center = self.player.center();
                self.particles.player_death(center.x, center.y, rng);
                self.effects.push(Effect::PlayerDeath);
            }
        }

        // 5. Player last, so this tick's verdict counts.
        if self.player.update(input, elapsed_ms, just_died) {
            self.status = GameStatus::GameOver;
            log::info!("game over on stage {}", self.waves.stage());
        }

        &self.effects
    }

    /// [`GameState::step`] followed by applying each effect to `ui`.
    pub fn update<U: UpdateUiFunctions + ?Sized>(
        &mut self,
        elapsed_ms: f32,
        input: &mut InputSnapshot,
        paused: bool,
        rng: &mut impl Rng,
        ui: &mut U,
    ) {
        for &effect in self.step(elapsed_ms, input, paused, rng) {
            effect.apply(ui);
        }
    }

    // ── Draw ──────────────────────────────────────────────────────────────────

    /// Render the current state back to front.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> std::io::Result<()> {
        self.draw_background(surface)?;
        self.player.draw(surface)?;
        self.player_bullets.draw(surface)?;
        self.opponent_bullets.draw(surface)?;
        self.opponents.draw(surface)?;
        self.particles.draw(surface)?;
        self.draw_overlay(surface)
    }

    fn draw_background<S: Surface + ?Sized>(&self, surface: &mut S) -> std::io::Result<()> {
        surface.set_fill(palette::BACKGROUND);
        surface.set_stroke(palette::BORDER);
        surface.set_line_width(self.border);
        surface.fill_rect(Vec2::ZERO, self.canvas)?;
        surface.stroke_rect(Vec2::ZERO, self.canvas)
    }

    fn draw_overlay<S: Surface + ?Sized>(&self, surface: &mut S) -> std::io::Result<()> {
        let center = self.canvas / 2.0;
        if let Some(stage) = self.stage_banner() {
            surface.set_fill(palette::TEXT);
            surface.fill_text(&format!("Stage {stage}"), center)?;
        }
        if self.status == GameStatus::GameOver {
            surface.set_fill(palette::GAME_OVER);
            surface.fill_text("GAME OVER", center + Vec2::new(0.0, 40.0))?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Stage number while its banner is showing.
    pub fn stage_banner(&self) -> Option<u32> {
        (self.banner_remaining_ms > 0.0).then(|| self.waves.stage())
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_bullets(&self) -> &BulletManager {
        &self.player_bullets
    }

    pub fn opponent_bullets(&self) -> &BulletManager {
        &self.opponent_bullets
    }

    pub fn opponents(&self) -> &OpponentManager {
        &self.opponents
    }

    pub fn waves(&self) -> &WaveManager {
        &self.waves
    }

    pub fn particles(&self) -> &ParticleManager {
        &self.particles
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }
}
