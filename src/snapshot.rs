//! Flat numeric export and restore of a world.

use crate::body::Body;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::particle::Particle;
use crate::shape_match::Pose;
use crate::vec::Vec2;
use crate::world::World;
use alloc::vec::Vec as AllocVec;

/// Values per particle: `x, y, vx, vy`.
pub const PARTICLE_STRIDE: usize = 4;
/// Values per pose: `cx, cy, cos, sin`.
pub const POSE_STRIDE: usize = 4;

/// Everything needed to restore a world, as flat arrays.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<F: Float> {
    /// Points per body.
    pub point_counts: AllocVec<usize>,
    /// Rest radius per body.
    pub radii: AllocVec<F>,
    /// Initial center per body, `x, y`.
    pub centers: AllocVec<F>,
    /// Particle buffer, body after body.
    pub particles: AllocVec<F>,
    /// Poses from the most recent pre-pass.
    pub poses: AllocVec<F>,
}

/// `count * stride`, reporting overflow as a mismatch against `found`.
fn scaled(count: usize, stride: usize, found: usize) -> Result<usize, PhysicsError> {
    count
        .checked_mul(stride)
        .ok_or(PhysicsError::SnapshotMismatch { expected: usize::MAX, found })
}

fn expect_len(found: usize, expected: usize) -> Result<(), PhysicsError> {
    if found == expected {
        Ok(())
    } else {
        Err(PhysicsError::SnapshotMismatch { expected, found })
    }
}

impl<F: Float> World<F> {
    /// Export bodies, particles and poses as flat arrays.
    pub fn snapshot(&self) -> Snapshot<F> {
        let mut snap = Snapshot::default();
        for body in &self.bodies {
            let c = body.initial_center();
            snap.point_counts.push(body.point_count());
            snap.radii.push(body.radius());
            snap.centers.extend_from_slice(&[c.x, c.y]);
        }
        for p in &self.front {
            snap.particles.extend_from_slice(&[p.pos.x, p.pos.y, p.vel.x, p.vel.y]);
        }
        for pose in &self.derived.poses {
            snap.poses
                .extend_from_slice(&[pose.centroid.x, pose.centroid.y, pose.cos, pose.sin]);
        }
        snap
    }

    /// Rebuild a world from a snapshot.
    ///
    /// Particles and poses are restored exactly; bounding boxes and areas are
    /// recomputed from the restored particles.
    pub fn from_snapshot(snap: &Snapshot<F>) -> Result<Self, PhysicsError> {
        let count = snap.point_counts.len();
        expect_len(snap.radii.len(), count)?;
        expect_len(snap.centers.len(), scaled(count, 2, snap.centers.len())?)?;
        let found = snap.particles.len();
        let total = snap
            .point_counts
            .iter()
            .try_fold(0usize, |acc, &n| acc.checked_add(n))
            .ok_or(PhysicsError::SnapshotMismatch { expected: usize::MAX, found })?;
        expect_len(found, scaled(total, PARTICLE_STRIDE, found)?)?;
        expect_len(snap.poses.len(), scaled(count, POSE_STRIDE, snap.poses.len())?)?;

        let mut world = World::new();
        let mut offset = 0;
        for (i, (&n, &r)) in snap.point_counts.iter().zip(&snap.radii).enumerate() {
            let center = Vec2::new(snap.centers[2 * i], snap.centers[2 * i + 1]);
            let mut body = Body::circle(n, r, center)?;
            body.set_offset(offset);
            offset += n;
            world.bodies.push(body);
        }
        world.front = snap
            .particles
            .chunks_exact(PARTICLE_STRIDE)
            .map(|v| Particle::new(Vec2::new(v[0], v[1]), Vec2::new(v[2], v[3])))
            .collect();
        world.reindex();
        world.derived.poses = snap
            .poses
            .chunks_exact(POSE_STRIDE)
            .map(|v| Pose { centroid: Vec2::new(v[0], v[1]), cos: v[2], sin: v[3] })
            .collect();

        log::debug!("restored {} bodies, {} particles", count, total);
        Ok(world)
    }
}
