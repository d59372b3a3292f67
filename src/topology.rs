//! Rest-shape generation for closed particle rings.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Smallest ring that encloses an area.
pub const MIN_POINTS: usize = 3;

/// The undeformed geometry of a ring body.
///
/// Offsets are relative to the body's own centroid and wind counter-clockwise.
/// Rest length and rest area are the closed-form circle values, not measured
/// from the polygon, so a body at rest is very slightly compressed.
#[derive(Clone, Debug, PartialEq)]
pub struct RestShape<F: Float> {
    offsets: AllocVec<Vec2<F>>,
    radius: F,
    rest_length: F,
    rest_area: F,
}

impl<F: Float> RestShape<F> {
    /// Generate `point_count` offsets evenly spaced on a circle of `radius`.
    pub fn circle(point_count: usize, radius: F) -> Result<Self, PhysicsError> {
        if point_count < MIN_POINTS {
            return Err(PhysicsError::InsufficientPoints { count: point_count });
        }
        if !radius.is_finite() || radius <= F::zero() {
            return Err(PhysicsError::InvalidRadius);
        }

        let two_pi = F::two() * F::pi();
        let n = F::from_usize(point_count);
        let offsets = (0..point_count)
            .map(|i| {
                let angle = two_pi * F::from_usize(i) / n;
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();

        Ok(RestShape {
            offsets,
            radius,
            rest_length: two_pi * radius / n,
            rest_area: F::pi() * radius * radius,
        })
    }

    pub fn offsets(&self) -> &[Vec2<F>] {
        &self.offsets
    }

    pub fn offset(&self, local: usize) -> Vec2<F> {
        self.offsets[local]
    }

    pub fn point_count(&self) -> usize {
        self.offsets.len()
    }

    pub fn radius(&self) -> F {
        self.radius
    }

    /// Rest length of each structural spring: `2πr/N`.
    pub fn rest_length(&self) -> F {
        self.rest_length
    }

    /// Target enclosed area: `πr²`.
    pub fn rest_area(&self) -> F {
        self.rest_area
    }
}

/// Ring neighbors of `i` in a ring of `n` points: `(previous, next)`.
pub fn neighbors(i: usize, n: usize) -> (usize, usize) {
    ((i + n - 1) % n, (i + 1) % n)
}
