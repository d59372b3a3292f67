//! Per-body axis-aligned bounding boxes used to skip far collision tests.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec2;

/// Minimum extent per axis; thinner boxes are padded around their middle.
pub const MIN_EXTENT: f32 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb<F: Float> {
    pub min: Vec2<F>,
    pub max: Vec2<F>,
}

impl<F: Float> Aabb<F> {
    pub fn new(min: Vec2<F>, max: Vec2<F>) -> Self {
        Aabb { min, max }
    }

    /// Tight box around the particle positions.
    pub fn from_particles(particles: &[Particle<F>]) -> Self {
        let Some(first) = particles.first() else {
            return Aabb::new(Vec2::zero(), Vec2::zero()).padded();
        };
        let mut min = first.pos;
        let mut max = first.pos;
        for p in &particles[1..] {
            min.x = min.x.min(p.pos.x);
            min.y = min.y.min(p.pos.y);
            max.x = max.x.max(p.pos.x);
            max.y = max.y.max(p.pos.y);
        }
        Aabb { min, max }.padded()
    }

    fn padded(mut self) -> Self {
        let eps = F::from_f32(MIN_EXTENT);
        let half = eps * F::half();
        if self.max.x - self.min.x < eps {
            self.min.x = self.min.x - half;
            self.max.x = self.max.x + half;
        }
        if self.max.y - self.min.y < eps {
            self.min.y = self.min.y - half;
            self.max.y = self.max.y + half;
        }
        self
    }

    /// Inclusive containment.
    pub fn contains(&self, point: Vec2<F>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn extent(&self) -> Vec2<F> {
        self.max - self.min
    }
}
