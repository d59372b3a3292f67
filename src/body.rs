//! Soft body entities: a rest shape plus a slot in the world's particle buffer.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::particle::Particle;
use crate::topology::RestShape;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Stable index of a body inside a [`World`](crate::World).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A closed ring of particles simulated as one deformable object.
#[derive(Clone, Debug)]
pub struct Body<F: Float> {
    rest: RestShape<F>,
    center: Vec2<F>,
    offset: usize,
}

impl<F: Float> Body<F> {
    /// Build a ring of `point_count` particles of `radius` around `center`.
    pub fn circle(point_count: usize, radius: F, center: Vec2<F>) -> Result<Self, PhysicsError> {
        Ok(Body {
            rest: RestShape::circle(point_count, radius)?,
            center,
            offset: 0,
        })
    }

    /// Particles seeded on the rest shape around the initial center, at rest.
    pub fn seed_particles(&self) -> AllocVec<Particle<F>> {
        self.rest
            .offsets()
            .iter()
            .map(|&q| Particle::at_rest(self.center + q))
            .collect()
    }

    pub fn rest(&self) -> &RestShape<F> {
        &self.rest
    }

    /// Center the body was created (or last rebuilt) around.
    pub fn initial_center(&self) -> Vec2<F> {
        self.center
    }

    pub fn point_count(&self) -> usize {
        self.rest.point_count()
    }

    pub fn radius(&self) -> F {
        self.rest.radius()
    }

    /// First index of this body's particles in the flat buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Buffer range covered by this body.
    pub fn range(&self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.point_count()
    }

    pub(crate) fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_around_center_at_rest() {
        let body = Body::circle(6, 1.0f64, Vec2::new(3.0, -2.0)).unwrap();
        let particles = body.seed_particles();
        assert_eq!(particles.len(), 6);
        for p in &particles {
            assert!((p.pos.distance(Vec2::new(3.0, -2.0)) - 1.0).abs() < 1e-12);
            assert_eq!(p.vel, Vec2::zero());
        }
    }

    #[test]
    fn range_follows_offset() {
        let mut body = Body::circle(5, 1.0f32, Vec2::zero()).unwrap();
        body.set_offset(7);
        assert_eq!(body.range(), 7..12);
    }
}
