//! Cosmetic particle bursts.  Nothing in the simulation reads them back.

use std::f32::consts::TAU;

use rand::Rng;

use crate::config::ParticleConfig;
use crate::entities::{OpponentKind, Vec2};
use crate::opponents::Opponent;
use crate::render::{self, palette, Surface};

const PARTICLE_RADIUS: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleStyle {
    Spark,
    Ember,
    Debris,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub remaining_ms: f32,
    pub style: ParticleStyle,
}

#[derive(Clone, Debug)]
pub struct ParticleManager {
    particles: Vec<Particle>,
    config: ParticleConfig,
}

impl ParticleManager {
    pub fn new(config: &ParticleConfig) -> Self {
        ParticleManager {
            particles: Vec::new(),
            config: config.clone(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Burst at the opponent's last position, styled after its kind.
    pub fn opponent_death(&mut self, opponent: &Opponent, rng: &mut impl Rng) {
        let style = match opponent.kind {
            OpponentKind::Drone => ParticleStyle::Spark,
            OpponentKind::Striker | OpponentKind::Boss => ParticleStyle::Ember,
        };
        self.burst(opponent.pos, self.config.opponent_burst, style, rng);
    }

    pub fn player_death(&mut self, x: f32, y: f32, rng: &mut impl Rng) {
        self.burst(Vec2::new(x, y), self.config.player_burst, ParticleStyle::Debris, rng);
    }

    fn burst(&mut self, origin: Vec2, count: usize, style: ParticleStyle, rng: &mut impl Rng) {
        let c = &self.config;
        self.particles.reserve(count);
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(c.min_speed..=c.max_speed);
            let life = rng.gen_range(c.min_life_ms..=c.max_life_ms);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                remaining_ms: life,
                style,
            });
        }
    }

    pub fn update(&mut self, elapsed_ms: f32) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel * elapsed_ms;
            p.remaining_ms -= elapsed_ms;
        }
        self.particles.retain(|p| p.remaining_ms > 0.0);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> std::io::Result<()> {
        for p in &self.particles {
            surface.set_fill(match p.style {
                ParticleStyle::Spark => palette::SPARK,
                ParticleStyle::Ember => palette::EMBER,
                ParticleStyle::Debris => palette::DEBRIS,
            });
            render::fill_dot(surface, p.pos, PARTICLE_RADIUS)?;
        }
        Ok(())
    }
}
