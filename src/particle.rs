//! Unit-mass particles with explicit velocity.

use crate::float::Float;
use crate::vec::Vec2;

/// A simulation particle. Mass is implicitly 1, so forces are accelerations.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle<F: Float> {
    pub pos: Vec2<F>,
    pub vel: Vec2<F>,
}

impl<F: Float> Particle<F> {
    /// A particle at rest at `pos`.
    pub fn at_rest(pos: Vec2<F>) -> Self {
        Particle { pos, vel: Vec2::zero() }
    }

    pub fn new(pos: Vec2<F>, vel: Vec2<F>) -> Self {
        Particle { pos, vel }
    }

    /// Semi-implicit Euler: update velocity from `force`, decay it by
    /// `exp(-damping·dt)`, then return the predicted position.
    ///
    /// The particle itself is not moved; the caller commits the predicted
    /// position after collision resolution.
    pub fn integrate(&mut self, force: Vec2<F>, dt: F, damping: F) -> Vec2<F> {
        self.vel = (self.vel + force.scale(dt)).scale((-damping * dt).exp());
        self.pos + self.vel.scale(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_fall_without_damping() {
        let mut p = Particle::at_rest(Vec2::new(0.0f64, 10.0));
        let predicted = p.integrate(Vec2::new(0.0, -10.0), 0.1, 0.0);
        assert_eq!(p.vel, Vec2::new(0.0, -1.0));
        assert!((predicted.y - 9.9).abs() < 1e-12);
        // position is committed by the caller
        assert_eq!(p.pos.y, 10.0);
    }

    #[test]
    fn damping_decays_velocity() {
        let mut p = Particle::new(Vec2::zero(), Vec2::new(1.0f64, 0.0));
        p.integrate(Vec2::zero(), 1.0, 1.0);
        assert!((p.vel.x - (-1.0f64).exp()).abs() < 1e-12);
    }
}
