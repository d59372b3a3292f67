//! The simulation world: bodies, double-buffered particles and the tick loop.

use crate::body::{Body, BodyHandle};
use crate::bounds::Aabb;
use crate::config::SimParams;
use crate::drag::DragState;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::forces;
use crate::integrator::{self, TickInputs};
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::shape_match::{self, Pose};
use crate::topology::RestShape;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-body quantities derived from one particle buffer.
#[derive(Clone, Debug, Default)]
pub(crate) struct Derived<F: Float> {
    pub(crate) poses: AllocVec<Pose<F>>,
    pub(crate) bounds: AllocVec<Aabb<F>>,
    pub(crate) areas: AllocVec<F>,
}

impl<F: Float> Derived<F> {
    /// Pose, bounding-box and area passes over `particles`.
    pub(crate) fn from_buffer(bodies: &[Body<F>], particles: &[Particle<F>]) -> Self {
        Derived {
            poses: per_body(bodies, |b| {
                shape_match::estimate(&particles[b.range()], b.rest().offsets())
            }),
            bounds: per_body(bodies, |b| Aabb::from_particles(&particles[b.range()])),
            areas: per_body(bodies, |b| forces::polygon_area(&particles[b.range()])),
        }
    }

    fn inputs<'a>(
        &'a self,
        bodies: &'a [Body<F>],
        prev: &'a [Particle<F>],
        dt: F,
        params: &'a SimParams<F>,
        drag: &'a DragState<F>,
    ) -> TickInputs<'a, F> {
        TickInputs {
            prev,
            bodies,
            poses: &self.poses,
            bounds: &self.bounds,
            areas: &self.areas,
            params,
            drag,
            dt,
        }
    }
}

#[cfg(feature = "parallel")]
fn per_body<F, T, G>(bodies: &[Body<F>], pass: G) -> AllocVec<T>
where
    F: Float,
    T: Send,
    G: Fn(&Body<F>) -> T + Sync + Send,
{
    bodies.par_iter().map(pass).collect()
}

#[cfg(not(feature = "parallel"))]
fn per_body<F, T, G>(bodies: &[Body<F>], pass: G) -> AllocVec<T>
where
    F: Float,
    G: Fn(&Body<F>) -> T,
{
    bodies.iter().map(pass).collect()
}

/// Advance every slot into `out`; returns the number of corrected particles.
#[cfg(feature = "parallel")]
fn advance_all<F: Float>(
    inputs: &TickInputs<'_, F>,
    slots: &[(usize, usize)],
    out: &mut [Particle<F>],
) -> usize {
    out.par_iter_mut()
        .zip(slots.par_iter())
        .map(|(dst, &(body, local))| {
            let (next, corrected) = integrator::advance(inputs, body, local);
            *dst = next;
            corrected as usize
        })
        .sum()
}

#[cfg(not(feature = "parallel"))]
fn advance_all<F: Float>(
    inputs: &TickInputs<'_, F>,
    slots: &[(usize, usize)],
    out: &mut [Particle<F>],
) -> usize {
    out.iter_mut()
        .zip(slots.iter())
        .map(|(dst, &(body, local))| {
            let (next, corrected) = integrator::advance(inputs, body, local);
            *dst = next;
            corrected as usize
        })
        .sum()
}

/// Result of one tick, borrowed from the world.
#[derive(Debug)]
pub struct TickView<'a, F: Float> {
    /// The newly committed particle buffer.
    pub particles: &'a [Particle<F>],
    /// Poses fitted at the start of the tick, one per body.
    pub poses: &'a [Pose<F>],
    /// Bounding boxes computed at the start of the tick, one per body.
    pub bounds: &'a [Aabb<F>],
    /// Particles snapped out of another body this tick.
    pub corrections: usize,
}

/// A set of ring soft bodies advanced together.
///
/// Particles live in one flat buffer, body after body. Each tick reads the
/// front buffer, writes the back buffer and then swaps them, so no pass ever
/// sees a half-written tick.
#[derive(Clone, Debug, Default)]
pub struct World<F: Float> {
    pub(crate) bodies: AllocVec<Body<F>>,
    pub(crate) front: AllocVec<Particle<F>>,
    back: AllocVec<Particle<F>>,
    /// `(body, local)` for every buffer index.
    slots: AllocVec<(usize, usize)>,
    pub(crate) derived: Derived<F>,
}

impl<F: Float> World<F> {
    /// An empty world.
    pub fn new() -> Self {
        World {
            bodies: AllocVec::new(),
            front: AllocVec::new(),
            back: AllocVec::new(),
            slots: AllocVec::new(),
            derived: Derived::default(),
        }
    }

    /// Add a ring of `point_count` particles of `radius` around `center`.
    pub fn create_body(
        &mut self,
        point_count: usize,
        radius: F,
        center: Vec2<F>,
    ) -> Result<BodyHandle, PhysicsError> {
        let mut body = Body::circle(point_count, radius, center)?;
        let handle = BodyHandle(self.bodies.len());
        body.set_offset(self.front.len());
        self.front.extend(body.seed_particles());
        self.bodies.push(body);
        self.reindex();
        log::debug!(
            "created body {} with {} points, radius {:?}",
            handle.0,
            point_count,
            radius
        );
        Ok(handle)
    }

    /// Replace one body's rest shape and reseed it at its initial center.
    ///
    /// The body's previous particle state is discarded; other bodies keep
    /// theirs. Buffers and per-body arrays are rebuilt together.
    pub fn rebuild_body(
        &mut self,
        handle: BodyHandle,
        point_count: usize,
        radius: F,
    ) -> Result<(), PhysicsError> {
        let index = self.check_body(handle.0)?;
        let center = self.bodies[index].initial_center();
        let replacement = Body::circle(point_count, radius, center)?;
        let reseed: AllocVec<bool> = (0..self.bodies.len()).map(|i| i == index).collect();
        self.bodies[index] = replacement;
        self.reflow(&reseed);
        log::debug!("rebuilt body {} with {} points, radius {:?}", index, point_count, radius);
        Ok(())
    }

    /// Rebuild every body with a new point count and radius.
    ///
    /// Validates first, so on error the world is unchanged.
    pub fn rebuild_all(&mut self, point_count: usize, radius: F) -> Result<(), PhysicsError> {
        RestShape::circle(point_count, radius)?;
        let mut rebuilt = AllocVec::with_capacity(self.bodies.len());
        for body in &self.bodies {
            rebuilt.push(Body::circle(point_count, radius, body.initial_center())?);
        }
        self.bodies = rebuilt;
        let reseed = alloc::vec![true; self.bodies.len()];
        self.reflow(&reseed);
        log::debug!(
            "rebuilt all {} bodies with {} points, radius {:?}",
            self.bodies.len(),
            point_count,
            radius
        );
        Ok(())
    }

    /// Lay the buffer out again after a body changed size. Bodies flagged in
    /// `reseed` get fresh particles; the rest are copied from the old buffer,
    /// so their offsets must still be the old ones when this is called.
    fn reflow(&mut self, reseed: &[bool]) {
        let total = self.bodies.iter().map(|b| b.point_count()).sum::<usize>();
        let mut front = AllocVec::with_capacity(total);
        for (body, &fresh) in self.bodies.iter_mut().zip(reseed) {
            let start = front.len();
            if fresh {
                front.extend(body.seed_particles());
            } else {
                front.extend_from_slice(&self.front[body.range()]);
            }
            body.set_offset(start);
        }
        self.front = front;
        self.reindex();
    }

    /// Rebuild the slot table, the back buffer and the derived arrays from
    /// the front buffer.
    pub(crate) fn reindex(&mut self) {
        self.slots = self
            .bodies
            .iter()
            .enumerate()
            .flat_map(|(b, body)| (0..body.point_count()).map(move |l| (b, l)))
            .collect();
        self.back.clone_from(&self.front);
        self.derived = Derived::from_buffer(&self.bodies, &self.front);
    }

    /// Advance every body by `dt`.
    ///
    /// The pose, bounding-box and area passes read the current buffer; every
    /// particle is then integrated and resolved into the back buffer, which
    /// is published only once all particles are written. `dt` is not clamped.
    pub fn step<O: StepObserver>(
        &mut self,
        dt: F,
        params: &SimParams<F>,
        drag: &DragState<F>,
        observer: &mut O,
    ) -> TickView<'_, F> {
        self.derived = Derived::from_buffer(&self.bodies, &self.front);
        observer.on_pre_pass(self.bodies.len());

        let inputs = self.derived.inputs(&self.bodies, &self.front, dt, params, drag);
        let corrections = advance_all(&inputs, &self.slots, &mut self.back);
        observer.on_integrate(corrections);

        core::mem::swap(&mut self.front, &mut self.back);
        observer.on_step_complete();

        TickView {
            particles: &self.front,
            poses: &self.derived.poses,
            bounds: &self.derived.bounds,
            corrections,
        }
    }

    /// Net force on every particle of the current buffer, in buffer order,
    /// without advancing the world.
    pub fn net_forces(&self, params: &SimParams<F>, drag: &DragState<F>) -> AllocVec<Vec2<F>> {
        let derived = Derived::from_buffer(&self.bodies, &self.front);
        let inputs = derived.inputs(&self.bodies, &self.front, F::zero(), params, drag);
        self.slots
            .iter()
            .map(|&(body, local)| integrator::particle_force(&inputs, body, local))
            .collect()
    }

    fn check_body(&self, index: usize) -> Result<usize, PhysicsError> {
        if index < self.bodies.len() {
            Ok(index)
        } else {
            Err(PhysicsError::BodyOutOfBounds { index, count: self.bodies.len() })
        }
    }

    pub(crate) fn ring_centroid(&self, body: &Body<F>) -> Vec2<F> {
        shape_match::centroid(&self.front[body.range()])
    }

    /// Mean particle position of a body in the committed buffer.
    pub fn centroid_of(&self, index: usize) -> Result<Vec2<F>, PhysicsError> {
        let index = self.check_body(index)?;
        Ok(self.ring_centroid(&self.bodies[index]))
    }

    /// Committed particles of one body, in ring order.
    pub fn particles_of(&self, index: usize) -> Result<&[Particle<F>], PhysicsError> {
        let index = self.check_body(index)?;
        Ok(&self.front[self.bodies[index].range()])
    }

    /// Overwrite one particle between ticks.
    pub fn set_particle(
        &mut self,
        index: usize,
        local: usize,
        particle: Particle<F>,
    ) -> Result<(), PhysicsError> {
        let index = self.check_body(index)?;
        let body = &self.bodies[index];
        let count = body.point_count();
        if local >= count {
            return Err(PhysicsError::ParticleOutOfBounds { index: local, count });
        }
        self.front[body.offset() + local] = particle;
        Ok(())
    }

    /// Body behind `handle`, or `BodyOutOfBounds`.
    pub fn body(&self, handle: BodyHandle) -> Result<&Body<F>, PhysicsError> {
        let index = self.check_body(handle.0)?;
        Ok(&self.bodies[index])
    }

    /// All bodies in creation order.
    pub fn bodies(&self) -> &[Body<F>] {
        &self.bodies
    }

    /// Number of bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// The whole committed buffer, body after body.
    pub fn particles(&self) -> &[Particle<F>] {
        &self.front
    }

    /// Number of particles across all bodies.
    pub fn particle_count(&self) -> usize {
        self.front.len()
    }

    /// Poses from the most recent pre-pass.
    pub fn poses(&self) -> &[Pose<F>] {
        &self.derived.poses
    }

    /// Bounding boxes from the most recent pre-pass.
    pub fn bounds(&self) -> &[Aabb<F>] {
        &self.derived.bounds
    }

    /// Enclosed areas from the most recent pre-pass.
    pub fn areas(&self) -> &[F] {
        &self.derived.areas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpStepObserver;

    #[test]
    fn bodies_are_laid_out_back_to_back() {
        let mut world = World::<f64>::new();
        world.create_body(5, 1.0, Vec2::zero()).unwrap();
        world.create_body(7, 1.0, Vec2::new(5.0, 0.0)).unwrap();
        assert_eq!(world.bodies()[0].range(), 0..5);
        assert_eq!(world.bodies()[1].range(), 5..12);
        assert_eq!(world.slots[6], (1, 1));
        assert_eq!(world.back.len(), 12);
    }

    #[test]
    fn rebuild_keeps_other_bodies_state() {
        let mut world = World::<f64>::new();
        world.create_body(5, 1.0, Vec2::zero()).unwrap();
        let b = world.create_body(6, 1.0, Vec2::new(5.0, 0.0)).unwrap();
        let params = SimParams::new().with_gravity(Vec2::new(0.0, -9.81));
        for _ in 0..10 {
            world.step(0.01, &params, &DragState::idle(), &mut NoOpStepObserver);
        }
        let moved = world.particles_of(1).unwrap().to_vec();

        world.rebuild_body(BodyHandle(0), 9, 0.5).unwrap();
        assert_eq!(world.particle_count(), 15);
        assert_eq!(world.particles_of(1).unwrap(), &moved[..]);
        assert_eq!(world.body(b).unwrap().range(), 9..15);
        assert!(world.particles_of(0).unwrap().iter().all(|p| p.vel == Vec2::zero()));
    }

    #[test]
    fn step_swaps_buffers() {
        let mut world = World::<f64>::new();
        world.create_body(4, 1.0, Vec2::zero()).unwrap();
        let before = world.front.clone();
        let params = SimParams::zeroed().with_gravity(Vec2::new(0.0, -1.0));
        world.step(0.1, &params, &DragState::idle(), &mut NoOpStepObserver);
        assert_eq!(world.back, before);
        assert_ne!(world.front, before);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_tick_matches_sequential_kernel() {
        let mut world = World::<f64>::new();
        world.create_body(24, 1.0, Vec2::zero()).unwrap();
        world.create_body(24, 1.0, Vec2::new(1.5, 0.0)).unwrap();
        world.create_body(24, 1.0, Vec2::new(0.7, 1.2)).unwrap();
        let params = SimParams::new().with_gravity(Vec2::new(0.0, -9.81));
        let drag = DragState::idle();
        let dt = 1.0 / 240.0;

        let mut total = 0;
        for _ in 0..120 {
            let derived = Derived::from_buffer(&world.bodies, &world.front);
            let inputs = derived.inputs(&world.bodies, &world.front, dt, &params, &drag);
            let mut expected = AllocVec::new();
            let mut corrections = 0;
            for &(body, local) in &world.slots {
                let (next, corrected) = integrator::advance(&inputs, body, local);
                expected.push(next);
                corrections += corrected as usize;
            }

            let tick = world.step(dt, &params, &drag, &mut NoOpStepObserver);
            assert_eq!(tick.corrections, corrections);
            for (got, want) in tick.particles.iter().zip(&expected) {
                assert_eq!(got.pos.x.to_bits(), want.pos.x.to_bits());
                assert_eq!(got.pos.y.to_bits(), want.pos.y.to_bits());
                assert_eq!(got.vel.x.to_bits(), want.vel.x.to_bits());
                assert_eq!(got.vel.y.to_bits(), want.vel.y.to_bits());
            }
            assert_eq!(tick.poses, &derived.poses[..]);
            total += corrections;
        }
        assert!(total > 0);
    }
}
