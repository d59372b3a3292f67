//! Individual force terms acting on one ring particle.
//!
//! Every function here reads the previous tick's ring and returns a force;
//! none of them mutate particles. Mass is 1 throughout.

use crate::float::Float;
use crate::particle::Particle;
use crate::topology::neighbors;
use crate::vec::Vec2;

/// Springs shorter than this have no usable direction and are skipped.
pub const SPRING_EPSILON: f32 = 1e-6;

/// Enclosed area of a ring by the shoelace formula.
///
/// Only the magnitude is kept, so winding does not matter. A self-intersecting
/// ring reports less than its true area.
pub fn polygon_area<F: Float>(ring: &[Particle<F>]) -> F {
    let n = ring.len();
    if n < 3 {
        return F::zero();
    }
    let mut sum = F::zero();
    for i in 0..n {
        let j = (i + 1) % n;
        sum = sum + ring[i].pos.cross(ring[j].pos);
    }
    (sum * F::half()).abs()
}

/// Damped structural springs from particle `i` to both ring neighbors.
///
/// Each spring acts along the unit vector from `i` toward the neighbor, so a
/// stretched spring pulls `i` in and a compressed one pushes it out.
pub fn spring_force<F: Float>(
    ring: &[Particle<F>],
    i: usize,
    rest_length: F,
    stiffness: F,
    damping: F,
) -> Vec2<F> {
    let (prev, next) = neighbors(i, ring.len());
    let me = ring[i];
    let mut force = Vec2::zero();
    for n in [prev, next] {
        let other = ring[n];
        let delta = other.pos - me.pos;
        let d = delta.length();
        if d < F::from_f32(SPRING_EPSILON) {
            continue;
        }
        let dir = delta.scale(F::one() / d);
        let fs = stiffness * (d - rest_length);
        let fd = damping * dir.dot(other.vel - me.vel);
        force += dir.scale(fs + fd);
    }
    force
}

/// Outward unit normal at `i`, from the chord between its neighbors.
///
/// Outward for counter-clockwise rings, which is how rest shapes are generated.
pub fn outward_normal<F: Float>(ring: &[Particle<F>], i: usize) -> Vec2<F> {
    let (prev, next) = neighbors(i, ring.len());
    let tangent = ring[next].pos - ring[prev].pos;
    (-tangent.perp()).normalize()
}

/// Share of the internal pressure pushing on particle `i`.
///
/// `area` is the ring's current area, computed once per body per tick.
pub fn pressure_force<F: Float>(
    ring: &[Particle<F>],
    i: usize,
    area: F,
    rest_area: F,
    pressure: F,
) -> Vec2<F> {
    let press = pressure * (rest_area - area) / rest_area;
    outward_normal(ring, i).scale(press / F::from_usize(ring.len()))
}

/// Penalty force along one axis of the square domain `[-limit, limit]`.
fn wall_axis<F: Float>(x: F, v: F, limit: F, stiffness: F, damping: F) -> F {
    if x > limit {
        -stiffness * (x - limit) - damping * v
    } else if x < -limit {
        stiffness * (-limit - x) - damping * v
    } else {
        F::zero()
    }
}

/// Damped penalty spring pushing a particle back inside the walls.
///
/// Axes are independent; a particle out past a corner gets both corrections.
pub fn wall_force<F: Float>(p: &Particle<F>, limit: F, stiffness: F, damping: F) -> Vec2<F> {
    Vec2::new(
        wall_axis(p.pos.x, p.vel.x, limit, stiffness, damping),
        wall_axis(p.pos.y, p.vel.y, limit, stiffness, damping),
    )
}

/// Pull toward the shape-matched goal position.
pub fn shape_force<F: Float>(pos: Vec2<F>, goal: Vec2<F>, stiffness: F) -> Vec2<F> {
    (goal - pos).scale(stiffness)
}

/// Uniform pull on every particle of a dragged body.
///
/// Uses the centroid offset, so the whole body translates toward the pointer
/// instead of stretching toward it.
pub fn drag_force<F: Float>(pointer: Vec2<F>, centroid: Vec2<F>, stiffness: F) -> Vec2<F> {
    (pointer - centroid).scale(stiffness)
}

/// Radial push away from a pointer pressed on empty space, fading linearly to
/// zero at `radius`.
pub fn push_force<F: Float>(pos: Vec2<F>, pointer: Vec2<F>, strength: F, radius: F) -> Vec2<F> {
    let delta = pos - pointer;
    let d = delta.length();
    if radius <= F::zero() || d >= radius {
        return Vec2::zero();
    }
    delta.normalize().scale(strength * (F::one() - d / radius))
}
