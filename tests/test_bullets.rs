use wave_shooter::config::GameConfig;
use wave_shooter::entities::Vec2;
use wave_shooter::input::InputSnapshot;
use wave_shooter::bullets::BulletManager;

fn fire_held() -> InputSnapshot {
    InputSnapshot {
        fire: true,
        ..InputSnapshot::default()
    }
}

// ── Player variant ────────────────────────────────────────────────────────────

#[test]
fn fire_spawns_bullet_at_player_center() {
    let config = GameConfig::default();
    let mut bullets = BulletManager::player(&config);
    bullets.update(16.0, Some(&fire_held()), Some(300.0));

    assert_eq!(bullets.len(), 1);
    let b = &bullets.bullets()[0];
    assert_eq!(b.pos.x, 300.0);
    assert_eq!(b.pos.y, 750.0); // top edge of the ship
    assert!(b.vel.y < 0.0);
}

#[test]
fn held_fire_respects_cooldown() {
    let config = GameConfig::default(); // 250 ms cooldown
    let mut bullets = BulletManager::player(&config);
    let keys = fire_held();

    bullets.update(16.0, Some(&keys), Some(300.0));
    for _ in 0..10 {
        bullets.update(16.0, Some(&keys), Some(300.0));
    }
    assert_eq!(bullets.len(), 1, "160 ms after the first shot");

    bullets.update(100.0, Some(&keys), Some(300.0));
    assert_eq!(bullets.len(), 2, "cooldown elapsed");
}

#[test]
fn no_fire_without_player_center() {
    let config = GameConfig::default();
    let mut bullets = BulletManager::player(&config);
    bullets.update(16.0, Some(&fire_held()), None);
    assert!(bullets.is_empty());
}

#[test]
fn no_fire_without_key() {
    let config = GameConfig::default();
    let mut bullets = BulletManager::player(&config);
    bullets.update(16.0, Some(&InputSnapshot::default()), Some(300.0));
    bullets.update(16.0, None, Some(300.0));
    assert!(bullets.is_empty());
}

#[test]
fn bullet_pruned_once_it_leaves_the_canvas() {
    let config = GameConfig::default(); // 0.8 px/ms from y = 750
    let mut bullets = BulletManager::player(&config);
    bullets.update(0.0, Some(&fire_held()), Some(300.0));

    for _ in 0..9 {
        bullets.update(100.0, None, None);
    }
    assert_eq!(bullets.len(), 1, "y = 30, still on canvas");

    bullets.update(100.0, None, None);
    assert!(bullets.is_empty(), "y = -50, pruned");

    for _ in 0..5 {
        bullets.update(100.0, None, None);
        assert!(bullets.is_empty());
    }
}

// ── Opponent variant ──────────────────────────────────────────────────────────

#[test]
fn opponent_variant_ignores_fire_key() {
    let config = GameConfig::default();
    let mut bullets = BulletManager::opponent(&config);
    bullets.update(16.0, Some(&fire_held()), Some(300.0));
    assert!(bullets.is_empty());
}

#[test]
fn opponent_bullet_travels_along_direction() {
    let config = GameConfig::default(); // 0.35 px/ms
    let mut bullets = BulletManager::opponent(&config);
    bullets.fire(Vec2::new(100.0, 100.0), Vec2::new(0.0, 5.0));
    bullets.update(100.0, None, None);

    let b = &bullets.bullets()[0];
    assert!((b.pos.y - 135.0).abs() < 1e-3);
    assert_eq!(b.pos.x, 100.0);
}

#[test]
fn zero_direction_fires_straight_down() {
    let config = GameConfig::default();
    let mut bullets = BulletManager::opponent(&config);
    bullets.fire(Vec2::new(100.0, 100.0), Vec2::ZERO);
    let b = &bullets.bullets()[0];
    assert_eq!(b.vel.x, 0.0);
    assert!(b.vel.y > 0.0);
}

#[test]
fn opponent_bullet_pruned_below_canvas() {
    let config = GameConfig::default();
    let mut bullets = BulletManager::opponent(&config);
    bullets.fire(Vec2::new(100.0, 790.0), Vec2::Y);
    bullets.update(100.0, None, None);
    assert!(bullets.is_empty());
}
