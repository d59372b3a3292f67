//! Rigid pose estimation by 2D shape matching.
//!
//! The best-fit rotation between a rest shape `q` and a deformed particle set
//! `p` minimizes `Σ |R·q_i - (p_i - C)|²`. In 2D this has a closed form: with
//! `A = Σ (p_i - C)·q_i` and `B = Σ q_i × (p_i - C)` the optimal angle is
//! `atan2(B, A)`, so `(cos θ, sin θ) = (A, B) / |(A, B)|`. No SVD is needed.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec2;

/// Floor for the rotation normalizer, so a collapsed body keeps a finite pose.
pub const POSE_EPSILON: f32 = 1e-8;

/// Rigid reference transform of one body for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose<F: Float> {
    pub centroid: Vec2<F>,
    pub cos: F,
    pub sin: F,
}

impl<F: Float> Pose<F> {
    /// Identity rotation at `centroid`.
    pub fn at(centroid: Vec2<F>) -> Self {
        Pose { centroid, cos: F::one(), sin: F::zero() }
    }

    /// Goal position for a rest offset: `R(θ)·q + C`.
    pub fn goal(&self, offset: Vec2<F>) -> Vec2<F> {
        offset.rotate(self.cos, self.sin) + self.centroid
    }
}

/// Mean position of a particle set.
pub fn centroid<F: Float>(particles: &[Particle<F>]) -> Vec2<F> {
    if particles.is_empty() {
        return Vec2::zero();
    }
    let n = F::from_usize(particles.len());
    let mut sum = Vec2::zero();
    for p in particles {
        sum += p.pos;
    }
    sum.scale(F::one() / n)
}

/// Fit a pose to `particles` given their `rest` offsets (same length and order).
pub fn estimate<F: Float>(particles: &[Particle<F>], rest: &[Vec2<F>]) -> Pose<F> {
    debug_assert_eq!(particles.len(), rest.len());
    let c = centroid(particles);

    let mut a = F::zero();
    let mut b = F::zero();
    for (p, &q) in particles.iter().zip(rest) {
        let d = p.pos - c;
        a = a + d.dot(q);
        b = b + q.cross(d);
    }

    let len = a.hypot(b).max(F::from_f32(POSE_EPSILON));
    Pose { centroid: c, cos: a / len, sin: b / len }
}
