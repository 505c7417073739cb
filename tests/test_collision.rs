use std::rc::Rc;

use wave_shooter::collision::{resolve_hits, resolve_single};
use wave_shooter::config::GameConfig;
use wave_shooter::entities::{Bullet, OpponentKind, Shape, Vec2};
use wave_shooter::opponents::OpponentManager;
use wave_shooter::player::Player;
use wave_shooter::waves::Path;

fn circle(x: f32, y: f32, radius: f32) -> Shape {
    Shape::Circle {
        center: Vec2::new(x, y),
        radius,
    }
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Shape {
    Shape::Rect {
        min: Vec2::new(x, y),
        size: Vec2::new(w, h),
    }
}

fn bullet(x: f32, y: f32) -> Bullet {
    Bullet::new(Vec2::new(x, y), Vec2::new(0.0, -1.0), 3.0)
}

/// Opponents parked at the given points (an empty path keeps them at the origin).
fn parked(points: &[(f32, f32)]) -> OpponentManager {
    let mut manager = OpponentManager::new(&GameConfig::default());
    let path = Rc::new(Path::new(0.1, Vec::<Vec2>::new()));
    for &(x, y) in points {
        manager.add_opponent(OpponentKind::Drone, Vec2::new(x, y), Rc::clone(&path), 0.0);
    }
    manager
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[test]
fn circles_overlap_when_closer_than_radii() {
    assert!(circle(0.0, 0.0, 5.0).intersects(&circle(8.0, 0.0, 5.0)));
    assert!(!circle(0.0, 0.0, 5.0).intersects(&circle(11.0, 0.0, 5.0)));
}

#[test]
fn touching_circles_do_not_overlap() {
    assert!(!circle(0.0, 0.0, 5.0).intersects(&circle(10.0, 0.0, 5.0)));
}

#[test]
fn rects_overlap_on_both_axes_only() {
    assert!(rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(5.0, 5.0, 10.0, 10.0)));
    assert!(!rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(5.0, 20.0, 10.0, 10.0)));
    // Shared edge is not an overlap
    assert!(!rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(10.0, 0.0, 10.0, 10.0)));
}

#[test]
fn circle_rect_uses_closest_point() {
    let r = rect(10.0, 10.0, 20.0, 20.0);
    // Near the corner but outside the radius along the diagonal
    assert!(!circle(6.0, 6.0, 5.0).intersects(&r));
    assert!(circle(8.0, 8.0, 5.0).intersects(&r));
    // Centre inside the box
    assert!(circle(20.0, 20.0, 1.0).intersects(&r));
    // Order of operands does not matter
    assert!(r.intersects(&circle(8.0, 8.0, 5.0)));
}

// ── Batched resolution ────────────────────────────────────────────────────────

#[test]
fn bullet_over_two_opponents_credits_only_the_first() {
    let opponents = parked(&[(100.0, 100.0), (110.0, 100.0)]);
    let mut bullets = vec![bullet(105.0, 100.0)];
    let mut hits = Vec::new();

    resolve_hits(&mut bullets, opponents.opponents(), &mut hits);

    assert_eq!(hits, vec![0]);
    assert!(!bullets[0].alive);
}

#[test]
fn second_bullet_on_same_opponent_is_not_consumed() {
    let opponents = parked(&[(100.0, 100.0)]);
    let mut bullets = vec![bullet(100.0, 105.0), bullet(100.0, 95.0)];
    let mut hits = Vec::new();

    resolve_hits(&mut bullets, opponents.opponents(), &mut hits);

    assert_eq!(hits, vec![0]);
    assert!(!bullets[0].alive);
    assert!(bullets[1].alive);
}

#[test]
fn second_bullet_moves_on_to_next_opponent() {
    let opponents = parked(&[(100.0, 100.0), (110.0, 100.0)]);
    let mut bullets = vec![bullet(105.0, 100.0), bullet(106.0, 100.0)];
    let mut hits = Vec::new();

    resolve_hits(&mut bullets, opponents.opponents(), &mut hits);

    assert_eq!(hits, vec![0, 1]);
    assert!(bullets.iter().all(|b| !b.alive));
}

#[test]
fn dead_bullets_never_hit() {
    let opponents = parked(&[(100.0, 100.0)]);
    let mut b = bullet(100.0, 100.0);
    b.alive = false;
    let mut bullets = vec![b];
    let mut hits = Vec::new();

    resolve_hits(&mut bullets, opponents.opponents(), &mut hits);
    assert!(hits.is_empty());
}

#[test]
fn miss_leaves_everything_alive() {
    let opponents = parked(&[(100.0, 100.0)]);
    let mut bullets = vec![bullet(300.0, 300.0)];
    let mut hits = Vec::new();

    resolve_hits(&mut bullets, opponents.opponents(), &mut hits);
    assert!(hits.is_empty());
    assert!(bullets[0].alive);
}

#[test]
fn single_target_consumes_every_overlapping_bullet() {
    let player = Player::new(&GameConfig::default());
    let c = player.center();
    let mut bullets = vec![bullet(c.x, c.y), bullet(c.x + 5.0, c.y), bullet(c.x, 10.0)];

    assert!(resolve_single(&mut bullets, &player));
    assert!(!bullets[0].alive);
    assert!(!bullets[1].alive);
    assert!(bullets[2].alive);
}
