use std::rc::Rc;

use wave_shooter::config::{GameConfig, PathSpec, TrailSpec, WaveConfig, WaveSpec};
use wave_shooter::entities::{OpponentKind, Vec2};
use wave_shooter::opponents::OpponentManager;
use wave_shooter::waves::{Path, Trail, Wave, WaveManager};

const INTERVAL: f32 = 1000.0;

fn long_path() -> Rc<Path> {
    Rc::new(Path::new(0.01, [Vec2::new(0.0, 1000.0)]))
}

fn trail(len: usize) -> Rc<Trail> {
    Rc::new(Trail {
        start: Vec2::new(100.0, 100.0),
        sequence: vec![OpponentKind::Drone; len],
        paths: vec![long_path()],
    })
}

fn manager() -> OpponentManager {
    OpponentManager::new(&GameConfig::default())
}

/// Feed `chunks` into a fresh single-trail wave and count the spawns.
fn spawns_after(len: usize, chunks: &[f32]) -> usize {
    let mut opponents = manager();
    let mut wave = Wave::new(vec![trail(len)], INTERVAL);
    for &dt in chunks {
        wave.update(dt, &mut opponents);
    }
    assert_eq!(wave.spawned(), opponents.len());
    opponents.len()
}

// ── Path ──────────────────────────────────────────────────────────────────────

#[test]
fn path_starts_at_origin_and_interpolates() {
    let path = Path::new(0.1, [Vec2::new(0.0, 100.0)]);
    let origin = Vec2::new(10.0, 10.0);
    assert_eq!(path.length(), 100.0);
    assert!((path.duration_ms() - 1000.0).abs() < 0.01);
    assert_eq!(path.position_at(origin, 0.0), Some(origin));
    assert_eq!(path.position_at(origin, 500.0), Some(Vec2::new(10.0, 60.0)));
    assert_eq!(path.position_at(origin, 1000.0), Some(Vec2::new(10.0, 110.0)));
    assert_eq!(path.position_at(origin, 1001.0), None);
}

#[test]
fn path_walks_multiple_segments() {
    let path = Path::new(1.0, [Vec2::new(100.0, 0.0), Vec2::new(100.0, 100.0)]);
    assert_eq!(path.length(), 200.0);
    assert_eq!(path.position_at(Vec2::ZERO, 50.0), Some(Vec2::new(50.0, 0.0)));
    assert_eq!(path.position_at(Vec2::ZERO, 100.0), Some(Vec2::new(100.0, 0.0)));
    assert_eq!(path.position_at(Vec2::ZERO, 150.0), Some(Vec2::new(100.0, 50.0)));
}

#[test]
fn trail_cycles_paths_by_cursor() {
    let a = Rc::new(Path::new(0.1, [Vec2::new(0.0, 10.0)]));
    let b = Rc::new(Path::new(0.2, [Vec2::new(10.0, 0.0)]));
    let t = Trail {
        start: Vec2::ZERO,
        sequence: vec![OpponentKind::Drone; 3],
        paths: vec![a.clone(), b.clone()],
    };
    assert!(Rc::ptr_eq(t.path_for(0).unwrap(), &a));
    assert!(Rc::ptr_eq(t.path_for(1).unwrap(), &b));
    assert!(Rc::ptr_eq(t.path_for(2).unwrap(), &a));
}

// ── Wave spawn timing ─────────────────────────────────────────────────────────

#[test]
fn spawn_count_independent_of_chunking() {
    assert_eq!(spawns_after(3, &[3000.0]), 3);
    assert_eq!(spawns_after(3, &[1000.0, 1000.0, 1000.0]), 3);
    assert_eq!(spawns_after(3, &[100.0; 30]), 3);
    assert_eq!(spawns_after(3, &[250.0; 8]), 2);
    assert_eq!(spawns_after(3, &[2000.0]), 2);
}

#[test]
fn spawn_count_capped_by_sequence() {
    assert_eq!(spawns_after(3, &[10_000.0]), 3);
    assert_eq!(spawns_after(3, &[1000.0; 10]), 3);
}

#[test]
fn accumulated_partial_intervals_spawn_once() {
    // 400 + 400 + 400 crosses the first boundary once
    let mut opponents = manager();
    let mut wave = Wave::new(vec![trail(3)], INTERVAL);
    for _ in 0..3 {
        wave.update(400.0, &mut opponents);
    }
    assert_eq!(opponents.len(), 1);

    // 200 carried over + 800 reaches the second boundary
    wave.update(800.0, &mut opponents);
    assert_eq!(opponents.len(), 2);
}

#[test]
fn nothing_spawns_before_first_interval() {
    assert_eq!(spawns_after(3, &[999.0]), 0);
}

#[test]
fn late_spawns_start_with_their_elapsed_age() {
    let mut opponents = manager();
    let mut wave = Wave::new(vec![trail(3)], INTERVAL);
    wave.update(2500.0, &mut opponents);

    let ages: Vec<f32> = opponents.iter().map(|o| o.age_ms()).collect();
    assert_eq!(ages, vec![1500.0, 500.0]);
}

#[test]
fn trails_keep_independent_timers() {
    let mut opponents = manager();
    let mut wave = Wave::new(vec![trail(1), trail(4)], INTERVAL);
    wave.update(3000.0, &mut opponents);
    assert_eq!(opponents.len(), 4); // 1 + 3
    assert!(!wave.is_exhausted());

    wave.update(1000.0, &mut opponents);
    assert_eq!(opponents.len(), 5);
    assert!(wave.is_exhausted());

    wave.update(5000.0, &mut opponents);
    assert_eq!(opponents.len(), 5);
}

// ── Stage sequence ────────────────────────────────────────────────────────────

fn one_drone_wave() -> WaveSpec {
    WaveSpec {
        trails: vec![TrailSpec {
            start: [100.0, 100.0],
            sequence: vec![OpponentKind::Drone],
            paths: vec![PathSpec {
                speed: 0.01,
                waypoints: vec![[0.0, 1000.0]],
            }],
        }],
    }
}

fn wave_config(waves: usize, wait_for_clear: bool) -> WaveConfig {
    WaveConfig {
        entrance_interval_ms: INTERVAL,
        wait_for_clear,
        banner_ms: 2000.0,
        table: (0..waves).map(|_| one_drone_wave()).collect(),
    }
}

#[test]
fn stage_signal_is_one_shot() {
    let mut opponents = manager();
    let mut waves = WaveManager::new(&wave_config(2, false));
    assert_eq!(waves.stage(), 1);
    assert!(!waves.just_advanced());

    waves.update(1000.0, &mut opponents);
    assert!(waves.just_advanced());
    assert_eq!(waves.stage(), 2);
    assert_eq!(waves.wave_index(), 1);

    for _ in 0..5 {
        waves.update(100.0, &mut opponents);
        assert!(!waves.just_advanced());
        assert_eq!(waves.stage(), 2);
    }

    waves.update(500.0, &mut opponents);
    assert!(waves.just_advanced());
    assert_eq!(waves.stage(), 3);
    assert_eq!(waves.wave_index(), 0, "table repeats");
}

#[test]
fn waits_for_opponents_to_clear() {
    let mut opponents = manager();
    let mut waves = WaveManager::new(&wave_config(2, true));

    waves.update(1000.0, &mut opponents);
    assert_eq!(opponents.len(), 1);
    assert!(waves.current_wave().is_exhausted());
    assert!(!waves.just_advanced());

    waves.update(100.0, &mut opponents);
    assert_eq!(waves.stage(), 1);

    let id = opponents.iter().next().map(|o| o.id).unwrap();
    opponents.handle_hit(id);

    waves.update(16.0, &mut opponents);
    assert!(waves.just_advanced());
    assert_eq!(waves.stage(), 2);

    waves.update(16.0, &mut opponents);
    assert!(!waves.just_advanced());
}
