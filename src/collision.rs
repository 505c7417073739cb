//! Collision tests and batched bullet resolution.
//!
//! Entity counts stay in the tens, so every pass is a plain nested loop.
//! Resolution only marks bullets dead and reports what was hit; scoring,
//! particles and removal belong to the caller.

use crate::entities::{Bullet, Entity, Shape, Vec2};

impl Shape {
    pub fn intersects(&self, other: &Shape) -> bool {
        match (*self, *other) {
            (
                Shape::Circle { center: a, radius: ra },
                Shape::Circle { center: b, radius: rb },
            ) => {
                let reach = ra + rb;
                a.distance_squared(b) < reach * reach
            }
            (Shape::Rect { min: am, size: asz }, Shape::Rect { min: bm, size: bsz }) => {
                am.x < bm.x + bsz.x
                    && bm.x < am.x + asz.x
                    && am.y < bm.y + bsz.y
                    && bm.y < am.y + asz.y
            }
            (Shape::Circle { center, radius }, Shape::Rect { min, size })
            | (Shape::Rect { min, size }, Shape::Circle { center, radius }) => {
                circle_rect(center, radius, min, size)
            }
        }
    }
}

fn circle_rect(center: Vec2, radius: f32, min: Vec2, size: Vec2) -> bool {
    let closest = center.clamp(min, min + size);
    center.distance_squared(closest) < radius * radius
}

/// Resolve live bullets against a target collection.
///
/// Bullets are visited in collection order; each credits at most the first
/// overlapping target not already credited in this pass and is then marked
/// dead.  Indices of credited targets are appended to `hits` in credit order.
pub fn resolve_hits<T: Entity>(bullets: &mut [Bullet], targets: &[T], hits: &mut Vec<usize>) {
    let first_new = hits.len();
    for bullet in bullets.iter_mut().filter(|b| b.alive) {
        let shape = bullet.shape();
        for (ti, target) in targets.iter().enumerate() {
            if !target.is_alive() {
                log::warn!("dead target at index {ti} reached collision pass; skipped");
                continue;
            }
            if hits[first_new..].contains(&ti) {
                continue;
            }
            if shape.intersects(&target.shape()) {
                hits.push(ti);
                bullet.alive = false;
                break;
            }
        }
    }
}

/// Resolve live bullets against a single target.
///
/// Every overlapping bullet is consumed.  Returns whether any bullet hit.
pub fn resolve_single<T: Entity>(bullets: &mut [Bullet], target: &T) -> bool {
    if !target.is_alive() {
        return false;
    }
    let target_shape = target.shape();
    let mut hit = false;
    for bullet in bullets.iter_mut().filter(|b| b.alive) {
        if bullet.shape().intersects(&target_shape) {
            bullet.alive = false;
            hit = true;
        }
    }
    hit
}
