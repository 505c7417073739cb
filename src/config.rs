//! Static game configuration.
//!
//! Everything here is loaded once before `GameState` is built and never
//! mutated afterwards.  `GameConfig::default()` carries the built-in wave
//! tables; a TOML file may override any section.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::OpponentKind;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub player: PlayerConfig,
    pub bullets: BulletConfig,
    pub opponents: OpponentConfig,
    pub particles: ParticleConfig,
    pub waves: WaveConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    pub border: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 800.0,
            border: 4.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub lives: u32,
    pub width: f32,
    pub height: f32,
    /// Pixels per millisecond.
    pub speed: f32,
    /// Time hidden and invulnerable after losing a life.
    pub respawn_ms: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            width: 40.0,
            height: 30.0,
            speed: 0.4,
            respawn_ms: 1500.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Upward speed of player bullets, pixels per millisecond.
    pub player_speed: f32,
    pub opponent_speed: f32,
    pub radius: f32,
    /// Minimum time between two player shots.
    pub fire_cooldown_ms: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            player_speed: 0.8,
            opponent_speed: 0.35,
            radius: 3.0,
            fire_cooldown_ms: 250.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    /// Probability that an opponent actually fires when its timer elapses.
    pub fire_chance: f64,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self { fire_chance: 0.5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub opponent_burst: usize,
    pub player_burst: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_life_ms: f32,
    pub max_life_ms: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            opponent_burst: 16,
            player_burst: 32,
            min_speed: 0.05,
            max_speed: 0.25,
            min_life_ms: 300.0,
            max_life_ms: 900.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Time between two entrances on the same trail.
    pub entrance_interval_ms: f32,
    /// Hold the next wave until every opponent of the current one is gone.
    pub wait_for_clear: bool,
    /// How long the "Stage N" banner stays on screen.
    pub banner_ms: f32,
    pub table: Vec<WaveSpec>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            entrance_interval_ms: 1000.0,
            wait_for_clear: true,
            banner_ms: 2000.0,
            table: default_waves(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub trails: Vec<TrailSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrailSpec {
    pub start: [f32; 2],
    pub sequence: Vec<OpponentKind>,
    pub paths: Vec<PathSpec>,
}

/// Polyline followed by an opponent; waypoints are offsets from the trail start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    /// Pixels per millisecond.
    pub speed: f32,
    pub waypoints: Vec<[f32; 2]>,
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject tables the simulation cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        if !positive(self.canvas.width) || !positive(self.canvas.height) {
            return invalid("canvas dimensions must be positive".into());
        }
        if self.player.lives == 0 {
            return invalid("player must start with at least one life".into());
        }
        let b = &self.bullets;
        if !positive(b.player_speed) || !positive(b.opponent_speed) {
            return invalid("bullet speeds must be positive".into());
        }
        if !positive(b.radius) {
            return invalid("bullet radius must be positive".into());
        }
        if !non_negative(b.fire_cooldown_ms) {
            return invalid("fire cooldown must not be negative".into());
        }
        if !(0.0..=1.0).contains(&self.opponents.fire_chance) {
            return invalid("opponent fire chance must lie in [0, 1]".into());
        }
        let pc = &self.particles;
        if !non_negative(pc.min_speed) || !non_negative(pc.min_life_ms) {
            return invalid("particle minimums must be finite and not negative".into());
        }
        if !pc.max_speed.is_finite() || !pc.max_life_ms.is_finite() {
            return invalid("particle maximums must be finite".into());
        }
        if pc.min_speed > pc.max_speed || pc.min_life_ms > pc.max_life_ms {
            return invalid("particle ranges must have min <= max".into());
        }
        if !positive(self.waves.entrance_interval_ms) {
            return invalid("entrance interval must be positive".into());
        }
        if self.waves.table.is_empty() {
            return invalid("wave table is empty".into());
        }
        for (wi, wave) in self.waves.table.iter().enumerate() {
            if wave.trails.is_empty() {
                return invalid(format!("wave {wi} has no trails"));
            }
            for (ti, trail) in wave.trails.iter().enumerate() {
                if trail.sequence.is_empty() {
                    return invalid(format!("wave {wi} trail {ti} has an empty opponent sequence"));
                }
                if trail.paths.is_empty() {
                    return invalid(format!("wave {wi} trail {ti} has no paths"));
                }
                if trail.paths.iter().any(|p| !positive(p.speed)) {
                    return invalid(format!("wave {wi} trail {ti} has a non-positive path speed"));
                }
            }
        }
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

// ── Built-in wave tables ──────────────────────────────────────────────────────

fn path(speed: f32, waypoints: &[[f32; 2]]) -> PathSpec {
    PathSpec {
        speed,
        waypoints: waypoints.to_vec(),
    }
}

fn default_waves() -> Vec<WaveSpec> {
    use OpponentKind::{Boss, Drone, Striker};

    // Swoop down, cross the screen, leave through the bottom.
    let swoop_right = path(0.12, &[[0.0, 280.0], [400.0, 380.0], [400.0, 930.0]]);
    let swoop_left = path(0.12, &[[0.0, 280.0], [-400.0, 380.0], [-400.0, 930.0]]);
    let zigzag = path(
        0.15,
        &[[150.0, 150.0], [-150.0, 300.0], [150.0, 450.0], [-150.0, 600.0], [0.0, 930.0]],
    );
    let hover = path(0.06, &[[0.0, 180.0], [-120.0, 220.0], [120.0, 260.0], [0.0, 930.0]]);

    vec![
        WaveSpec {
            trails: vec![TrailSpec {
                start: [100.0, -30.0],
                sequence: vec![Drone; 5],
                paths: vec![swoop_right.clone()],
            }],
        },
        WaveSpec {
            trails: vec![
                TrailSpec {
                    start: [100.0, -30.0],
                    sequence: vec![Drone, Striker, Drone, Striker],
                    paths: vec![swoop_right.clone()],
                },
                TrailSpec {
                    start: [500.0, -30.0],
                    sequence: vec![Striker, Drone, Striker, Drone],
                    paths: vec![swoop_left.clone()],
                },
            ],
        },
        WaveSpec {
            trails: vec![
                TrailSpec {
                    start: [300.0, -40.0],
                    sequence: vec![Boss],
                    paths: vec![hover],
                },
                TrailSpec {
                    start: [300.0, -30.0],
                    sequence: vec![Striker, Drone, Striker, Drone, Striker],
                    paths: vec![zigzag, swoop_right, swoop_left],
                },
            ],
        },
    ]
}
