//! Per-particle force accumulation, integration and collision resolution.
//!
//! [`advance`] is the whole tick for one particle. It reads only the previous
//! buffer and the per-body arrays produced earlier in the same tick, so every
//! particle can be advanced independently and in any order.

use crate::body::Body;
use crate::bounds::Aabb;
use crate::collision;
use crate::config::SimParams;
use crate::drag::DragState;
use crate::float::Float;
use crate::forces;
use crate::particle::Particle;
use crate::shape_match::Pose;
use crate::vec::Vec2;

/// Read-only view of everything a particle update may look at.
pub struct TickInputs<'a, F: Float> {
    /// Previous tick's particle buffer.
    pub prev: &'a [Particle<F>],
    pub bodies: &'a [Body<F>],
    /// This tick's poses, one per body.
    pub poses: &'a [Pose<F>],
    /// This tick's bounding boxes, one per body.
    pub bounds: &'a [Aabb<F>],
    /// This tick's enclosed areas, one per body.
    pub areas: &'a [F],
    pub params: &'a SimParams<F>,
    pub drag: &'a DragState<F>,
    pub dt: F,
}

impl<'a, F: Float> TickInputs<'a, F> {
    fn ring(&self, body: usize) -> &'a [Particle<F>] {
        let prev: &'a [Particle<F>] = self.prev;
        &prev[self.bodies[body].range()]
    }
}

/// Total force on particle `local` of `body`.
pub fn particle_force<F: Float>(inputs: &TickInputs<'_, F>, body: usize, local: usize) -> Vec2<F> {
    let params = inputs.params;
    let rest = inputs.bodies[body].rest();
    let ring = inputs.ring(body);
    let me = ring[local];
    let pose = &inputs.poses[body];

    let mut f = forces::spring_force(
        ring,
        local,
        rest.rest_length(),
        params.spring_stiffness,
        params.spring_damping,
    );
    f += forces::pressure_force(ring, local, inputs.areas[body], rest.rest_area(), params.pressure);
    f += params.gravity;
    f += forces::wall_force(&me, params.wall_distance, params.wall_stiffness, params.wall_damping);
    f += forces::shape_force(me.pos, pose.goal(rest.offset(local)), params.shape_stiffness);

    let drag = inputs.drag;
    if drag.target() == Some(body) {
        f += forces::drag_force(drag.pointer(), pose.centroid, params.drag_stiffness);
    } else if drag.is_pushing() {
        f += forces::push_force(me.pos, drag.pointer(), params.push_strength, params.push_radius);
    }
    f
}

/// Advance one particle by `dt`. Returns its new state and whether a
/// collision correction was applied.
pub fn advance<F: Float>(inputs: &TickInputs<'_, F>, body: usize, local: usize) -> (Particle<F>, bool) {
    let force = particle_force(inputs, body, local);
    let mut particle = inputs.ring(body)[local];
    let mut predicted = particle.integrate(force, inputs.dt, inputs.params.damping);

    let mut corrected = false;
    for other in 0..inputs.bodies.len() {
        if other == body || !inputs.bounds[other].contains(predicted) {
            continue;
        }
        corrected |= collision::resolve(inputs.ring(other), &mut predicted, &mut particle.vel);
    }

    particle.pos = predicted;
    (particle, corrected)
}
