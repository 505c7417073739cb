//! Scripted entrances: paths, trails, waves and the stage sequence.
//!
//! Spawn timing depends only on accumulated elapsed time.  A trail's timer
//! keeps the remainder past each entrance boundary, so feeding the same total
//! time in one tick or in many produces the same spawns, and each opponent
//! starts with the age it would have had under finer ticks.

use std::rc::Rc;

use crate::config::{PathSpec, TrailSpec, WaveConfig};
use crate::entities::{OpponentKind, Vec2};
use crate::opponents::OpponentManager;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Piecewise-linear route travelled at constant speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Offsets from the spawn origin; the first point is always the origin.
    points: Vec<Vec2>,
    /// Distance travelled when reaching `points[i]`.
    cumulative: Vec<f32>,
    speed: f32,
}

impl Path {
    pub fn new(speed: f32, waypoints: impl IntoIterator<Item = Vec2>) -> Self {
        let mut points = vec![Vec2::ZERO];
        points.extend(waypoints);

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(total);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }

        Path {
            points,
            cumulative,
            speed,
        }
    }

    pub fn from_spec(spec: &PathSpec) -> Self {
        Self::new(spec.speed, spec.waypoints.iter().map(|&p| Vec2::from(p)))
    }

    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Time needed to travel the whole path.
    pub fn duration_ms(&self) -> f32 {
        self.length() / self.speed
    }

    /// Position after `age_ms` on this path, or `None` once it is completed.
    pub fn position_at(&self, origin: Vec2, age_ms: f32) -> Option<Vec2> {
        let travelled = age_ms.max(0.0) * self.speed;
        if travelled > self.length() {
            return None;
        }
        if self.points.len() < 2 {
            return Some(origin + self.points[0]);
        }

        let next = self.cumulative.partition_point(|&c| c <= travelled);
        let seg = next.saturating_sub(1).min(self.points.len() - 2);
        let seg_len = self.cumulative[seg + 1] - self.cumulative[seg];
        let t = if seg_len > 0.0 {
            (travelled - self.cumulative[seg]) / seg_len
        } else {
            0.0
        };
        Some(origin + self.points[seg].lerp(self.points[seg + 1], t))
    }
}

// ── Trail ─────────────────────────────────────────────────────────────────────

/// Entry point plus the ordered opponents that come through it.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    pub start: Vec2,
    pub sequence: Vec<OpponentKind>,
    pub paths: Vec<Rc<Path>>,
}

impl Trail {
    pub fn from_spec(spec: &TrailSpec) -> Self {
        Trail {
            start: Vec2::from(spec.start),
            sequence: spec.sequence.clone(),
            paths: spec.paths.iter().map(|p| Rc::new(Path::from_spec(p))).collect(),
        }
    }

    /// Path followed by the opponent at `cursor`; paths cycle when fewer
    /// than opponents.
    pub fn path_for(&self, cursor: usize) -> Option<&Rc<Path>> {
        if self.paths.is_empty() {
            return None;
        }
        self.paths.get(cursor % self.paths.len())
    }
}

// ── Wave ──────────────────────────────────────────────────────────────────────

/// One active spawn schedule: a timer and a cursor per trail.
#[derive(Clone, Debug)]
pub struct Wave {
    trails: Vec<Rc<Trail>>,
    timers: Vec<f32>,
    cursors: Vec<usize>,
    entrance_interval_ms: f32,
}

impl Wave {
    pub fn new(trails: Vec<Rc<Trail>>, entrance_interval_ms: f32) -> Self {
        let n = trails.len();
        Wave {
            trails,
            timers: vec![0.0; n],
            cursors: vec![0; n],
            entrance_interval_ms,
        }
    }

    /// Advance every trail's timer and spawn due opponents.  Returns how many
    /// opponents were spawned.
    pub fn update(&mut self, elapsed_ms: f32, opponents: &mut OpponentManager) -> usize {
        let mut spawned = 0;
        for (i, trail) in self.trails.iter().enumerate() {
            if self.cursors[i] >= trail.sequence.len() {
                continue;
            }
            self.timers[i] += elapsed_ms;

            while self.timers[i] >= self.entrance_interval_ms && self.cursors[i] < trail.sequence.len() {
                self.timers[i] -= self.entrance_interval_ms;
                let cursor = self.cursors[i];
                let kind = trail.sequence[cursor];
                match trail.path_for(cursor) {
                    Some(path) => {
                        let id = opponents.add_opponent(kind, trail.start, Rc::clone(path), self.timers[i]);
                        log::debug!("trail {i} spawned {kind:?} as {id:?}");
                        spawned += 1;
                    }
                    None => log::warn!("trail {i} has no path; {kind:?} skipped"),
                }
                self.cursors[i] += 1;
            }
        }
        spawned
    }

    pub fn is_exhausted(&self) -> bool {
        self.trails
            .iter()
            .zip(&self.cursors)
            .all(|(trail, &cursor)| cursor >= trail.sequence.len())
    }

    /// Total opponents spawned so far across all trails.
    pub fn spawned(&self) -> usize {
        self.cursors.iter().sum()
    }
}

// ── Stage sequence ────────────────────────────────────────────────────────────

/// Walks the wave table, one wave per stage; the table repeats after its
/// last entry while the stage number keeps counting.
#[derive(Clone, Debug)]
pub struct WaveManager {
    table: Vec<Vec<Rc<Trail>>>,
    entrance_interval_ms: f32,
    wait_for_clear: bool,
    index: usize,
    stage: u32,
    current: Wave,
    just_advanced: bool,
}

impl WaveManager {
    pub fn new(config: &WaveConfig) -> Self {
        let table: Vec<Vec<Rc<Trail>>> = config
            .table
            .iter()
            .map(|wave| wave.trails.iter().map(|t| Rc::new(Trail::from_spec(t))).collect())
            .collect();
        let first = table.first().cloned().unwrap_or_default();
        WaveManager {
            current: Wave::new(first, config.entrance_interval_ms),
            table,
            entrance_interval_ms: config.entrance_interval_ms,
            wait_for_clear: config.wait_for_clear,
            index: 0,
            stage: 1,
            just_advanced: false,
        }
    }

    pub fn update(&mut self, elapsed_ms: f32, opponents: &mut OpponentManager) {
        self.just_advanced = false;
        self.current.update(elapsed_ms, opponents);

        let cleared = !self.wait_for_clear || opponents.is_empty();
        if self.current.is_exhausted() && cleared {
            self.advance();
        }
    }

    /// Close the stage signal on a tick that does not run the schedule.
    pub fn settle(&mut self) {
        self.just_advanced = false;
    }

    fn advance(&mut self) {
        if self.table.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.table.len();
        self.stage += 1;
        self.current = Wave::new(self.table[self.index].clone(), self.entrance_interval_ms);
        self.just_advanced = true;
        log::info!("stage {} begins (wave {})", self.stage, self.index);
    }

    /// 1-based stage number.
    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// True only during the tick in which a new stage began.
    pub fn just_advanced(&self) -> bool {
        self.just_advanced
    }

    pub fn wave_index(&self) -> usize {
        self.index
    }

    pub fn current_wave(&self) -> &Wave {
        &self.current
    }
}
