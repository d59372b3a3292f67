//! Tunable simulation parameters.

use crate::float::Float;
use crate::vec::Vec2;

/// Coefficients read by every tick.
///
/// Owned by the caller and passed into [`World::step`](crate::World::step) by
/// reference, so a control panel can change them between ticks without the
/// world holding on to stale values.
///
/// # Builder Pattern
/// ```
/// use squish::config::SimParams;
/// use squish::vec::Vec2;
///
/// let params: SimParams<f32> = SimParams::new()
///     .with_gravity(Vec2::new(0.0, -9.81))
///     .with_spring(400.0, 4.0)
///     .with_pressure(60.0)
///     .with_walls(8.0, 2000.0, 20.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams<F: Float> {
    /// Structural spring stiffness between ring neighbors. Default: 300.
    pub spring_stiffness: F,
    /// Damping along each spring axis. Default: 5.
    pub spring_damping: F,
    /// Global velocity damping rate; velocities decay by `exp(-damping·dt)`. Default: 0.5.
    pub damping: F,
    /// Internal pressure coefficient. Default: 50.
    pub pressure: F,
    /// Gravity acceleration. Default: zero.
    pub gravity: Vec2<F>,
    /// Wall penalty stiffness. Default: 1000.
    pub wall_stiffness: F,
    /// Wall penalty damping. Default: 10.
    pub wall_damping: F,
    /// Half extent of the square domain. Default: 10.
    pub wall_distance: F,
    /// Pull toward the shape-matched goal position. Default: 50.
    pub shape_stiffness: F,
    /// Pull of a dragged body toward the pointer. Default: 20.
    pub drag_stiffness: F,
    /// Strength of the radial push from an empty-space pointer press. Default: 50.
    pub push_strength: F,
    /// Reach of the push. Default: 2.
    pub push_radius: F,
}

impl<F: Float> SimParams<F> {
    /// Create a new parameter set with default values.
    pub fn new() -> Self {
        SimParams {
            spring_stiffness: F::from_f32(300.0),
            spring_damping: F::from_f32(5.0),
            damping: F::from_f32(0.5),
            pressure: F::from_f32(50.0),
            gravity: Vec2::zero(),
            wall_stiffness: F::from_f32(1000.0),
            wall_damping: F::from_f32(10.0),
            wall_distance: F::from_f32(10.0),
            shape_stiffness: F::from_f32(50.0),
            drag_stiffness: F::from_f32(20.0),
            push_strength: F::from_f32(50.0),
            push_radius: F::two(),
        }
    }

    /// A parameter set with every coefficient zeroed and walls pushed out of reach.
    ///
    /// Handy for isolating a single force term.
    pub fn zeroed() -> Self {
        SimParams {
            spring_stiffness: F::zero(),
            spring_damping: F::zero(),
            damping: F::zero(),
            pressure: F::zero(),
            gravity: Vec2::zero(),
            wall_stiffness: F::zero(),
            wall_damping: F::zero(),
            wall_distance: F::from_f32(1.0e6),
            shape_stiffness: F::zero(),
            drag_stiffness: F::zero(),
            push_strength: F::zero(),
            push_radius: F::zero(),
        }
    }

    /// Set spring stiffness and spring-axis damping.
    pub fn with_spring(mut self, stiffness: F, damping: F) -> Self {
        self.spring_stiffness = stiffness;
        self.spring_damping = damping;
        self
    }

    /// Set the global velocity damping rate.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Set the pressure coefficient.
    pub fn with_pressure(mut self, pressure: F) -> Self {
        self.pressure = pressure;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the domain half extent and the wall penalty coefficients.
    pub fn with_walls(mut self, distance: F, stiffness: F, damping: F) -> Self {
        self.wall_distance = distance;
        self.wall_stiffness = stiffness;
        self.wall_damping = damping;
        self
    }

    /// Set the shape-matching stiffness.
    pub fn with_shape_stiffness(mut self, stiffness: F) -> Self {
        self.shape_stiffness = stiffness;
        self
    }

    /// Set the drag stiffness.
    pub fn with_drag_stiffness(mut self, stiffness: F) -> Self {
        self.drag_stiffness = stiffness;
        self
    }

    /// Set push strength and reach.
    pub fn with_push(mut self, strength: F, radius: F) -> Self {
        self.push_strength = strength;
        self.push_radius = radius;
        self
    }
}

impl<F: Float> Default for SimParams<F> {
    fn default() -> Self {
        Self::new()
    }
}
