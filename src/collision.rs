//! Particle-versus-ring collision tests and the hard-snap response.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec2;

/// Even-odd ray cast: is `point` inside the closed ring?
///
/// Horizontal edges are skipped. Points exactly on an edge may land either way.
pub fn contains<F: Float>(ring: &[Particle<F>], point: Vec2<F>) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = ring[i].pos;
        let pj = ring[j].pos;
        let dy = pj.y - pi.y;
        if !dy.is_near_zero(F::from_f32(1e-10))
            && ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / dy + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Closest point to `point` on segment `a`-`b` (clamped projection).
pub fn closest_point_on_segment<F: Float>(point: Vec2<F>, a: Vec2<F>, b: Vec2<F>) -> Vec2<F> {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq.is_near_zero(F::from_f32(1e-12)) {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(F::zero(), F::one());
    a + ab.scale(t)
}

/// Closest point to `point` on any edge of the ring.
pub fn closest_point_on_ring<F: Float>(ring: &[Particle<F>], point: Vec2<F>) -> Vec2<F> {
    let n = ring.len();
    let mut best = ring.first().map_or(point, |p| p.pos);
    let mut best_dist = best.distance_sq(point);
    for i in 0..n {
        let a = ring[i].pos;
        let b = ring[(i + 1) % n].pos;
        let candidate = closest_point_on_segment(point, a, b);
        let d = candidate.distance_sq(point);
        if d < best_dist {
            best = candidate;
            best_dist = d;
        }
    }
    best
}

/// Resolve a predicted position against one foreign ring.
///
/// If `predicted` is inside `ring` it is snapped onto the nearest edge and
/// `vel` is zeroed. The struck ring is not pushed back and no velocity is
/// reflected. Returns whether a correction happened.
pub fn resolve<F: Float>(ring: &[Particle<F>], predicted: &mut Vec2<F>, vel: &mut Vec2<F>) -> bool {
    if !contains(ring, *predicted) {
        return false;
    }
    *predicted = closest_point_on_ring(ring, *predicted);
    *vel = Vec2::zero();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec as AllocVec;

    fn square() -> AllocVec<Particle<f64>> {
        [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(x, y)| Particle::at_rest(Vec2::new(x, y)))
            .collect()
    }

    #[test]
    fn contains_center_not_far_point() {
        let sq = square();
        assert!(contains(&sq, Vec2::new(0.5, 0.5)));
        assert!(!contains(&sq, Vec2::new(1.5, 0.5)));
        assert!(!contains(&sq, Vec2::new(0.5, -0.1)));
    }

    #[test]
    fn segment_projection_clamps() {
        let a = Vec2::new(0.0f64, 0.0);
        let b = Vec2::new(2.0, 0.0);
        assert_eq!(closest_point_on_segment(Vec2::new(1.0, 3.0), a, b), Vec2::new(1.0, 0.0));
        assert_eq!(closest_point_on_segment(Vec2::new(-4.0, 1.0), a, b), a);
        assert_eq!(closest_point_on_segment(Vec2::new(9.0, 1.0), a, b), b);
        assert_eq!(closest_point_on_segment(Vec2::new(9.0, 1.0), a, a), a);
    }

    #[test]
    fn snaps_to_nearest_edge_and_stops() {
        let sq = square();
        let mut predicted = Vec2::new(0.9, 0.4);
        let mut vel = Vec2::new(2.0, 1.0);
        assert!(resolve(&sq, &mut predicted, &mut vel));
        assert_eq!(predicted, Vec2::new(1.0, 0.4));
        assert_eq!(vel, Vec2::zero());
    }

    #[test]
    fn outside_point_untouched() {
        let sq = square();
        let mut predicted = Vec2::new(1.2, 0.4);
        let mut vel = Vec2::new(-1.0, 0.0);
        assert!(!resolve(&sq, &mut predicted, &mut vel));
        assert_eq!(predicted, Vec2::new(1.2, 0.4));
        assert_eq!(vel, Vec2::new(-1.0, 0.0));
    }
}
