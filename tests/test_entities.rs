use wave_shooter::entities::*;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(OpponentKind::Drone, OpponentKind::Drone);
    assert_ne!(OpponentKind::Drone, OpponentKind::Boss);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(BulletOwner::Player, BulletOwner::Player);
    assert_ne!(BulletOwner::Player, BulletOwner::Opponent);
    assert_eq!(OpponentId(3), OpponentId(3));
}

#[test]
fn new_bullet_is_alive_circle() {
    let b = Bullet::new(Vec2::new(10.0, 20.0), Vec2::new(0.0, -1.0), 3.0);
    assert!(b.is_alive());
    assert_eq!(b.position(), Vec2::new(10.0, 20.0));
    assert_eq!(
        b.shape(),
        Shape::Circle {
            center: Vec2::new(10.0, 20.0),
            radius: 3.0
        }
    );
}

#[test]
fn tougher_kinds_score_more() {
    assert!(OpponentKind::Drone.score() < OpponentKind::Striker.score());
    assert!(OpponentKind::Striker.score() < OpponentKind::Boss.score());
    assert!(OpponentKind::Boss.fire_interval_ms() < OpponentKind::Drone.fire_interval_ms());
}

#[test]
fn opponent_ids_reach_past_u32() {
    let past = OpponentId(u64::from(u32::MAX) + 1);
    assert!(past > OpponentId(u64::from(u32::MAX)));
}
