//! Pointer interaction: grabbing and dragging a single body.
//!
//! Pointer coordinates must already be in simulation space; mapping raw input
//! events is the host's job.

use crate::float::Float;
use crate::vec::Vec2;
use crate::world::World;

/// Current pointer interaction, read by every tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragState<F: Float> {
    active: bool,
    target: Option<usize>,
    pointer: Vec2<F>,
}

impl<F: Float> DragState<F> {
    /// No pointer held.
    pub fn idle() -> Self {
        DragState { active: false, target: None, pointer: Vec2::zero() }
    }

    /// Pointer pressed at `pointer`. Grabs the first body, in index order,
    /// whose centroid lies closer than its rest radius.
    ///
    /// First match wins even if a later body is closer. Returns the grabbed
    /// body, if any.
    pub fn pointer_down(&mut self, pointer: Vec2<F>, world: &World<F>) -> Option<usize> {
        self.active = true;
        self.pointer = pointer;
        self.target = pick_body(pointer, world.bodies().iter().map(|b| (world.ring_centroid(b), b.radius())));
        log::debug!("pointer down at ({:?}, {:?}) grabbed {:?}", pointer.x, pointer.y, self.target);
        self.target
    }

    /// Pointer moved. Only the stored position changes.
    pub fn pointer_move(&mut self, pointer: Vec2<F>) {
        if self.active {
            self.pointer = pointer;
        }
    }

    /// Pointer released; drops any grabbed body.
    pub fn pointer_up(&mut self) {
        self.active = false;
        self.target = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Body being dragged, if any.
    pub fn target(&self) -> Option<usize> {
        if self.active { self.target } else { None }
    }

    /// Pointer held down over empty space.
    pub fn is_pushing(&self) -> bool {
        self.active && self.target.is_none()
    }

    pub fn pointer(&self) -> Vec2<F> {
        self.pointer
    }
}

/// Index of the first `(centroid, radius)` candidate strictly within reach of
/// `pointer`.
pub fn pick_body<F: Float, I>(pointer: Vec2<F>, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = (Vec2<F>, F)>,
{
    candidates
        .into_iter()
        .position(|(centroid, radius)| centroid.distance(pointer) < radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins_over_closest() {
        let candidates = [
            (Vec2::new(0.0f64, 0.0), 2.0),
            (Vec2::new(1.0, 0.0), 2.0),
        ];
        assert_eq!(pick_body(Vec2::new(0.9, 0.0), candidates), Some(0));
    }

    #[test]
    fn boundary_is_exclusive() {
        let candidates = [(Vec2::new(0.0f64, 0.0), 1.0)];
        assert_eq!(pick_body(Vec2::new(1.0, 0.0), candidates), None);
    }

    #[test]
    fn release_clears_target() {
        let mut drag = DragState::<f32>::idle();
        drag.active = true;
        drag.target = Some(2);
        drag.pointer_move(Vec2::new(1.0, 1.0));
        assert_eq!(drag.target(), Some(2));
        assert_eq!(drag.pointer(), Vec2::new(1.0, 1.0));
        drag.pointer_up();
        assert_eq!(drag.target(), None);
        assert!(!drag.is_active());
        assert!(!drag.is_pushing());
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut drag = DragState::<f32>::idle();
        drag.pointer_move(Vec2::new(5.0, 5.0));
        assert_eq!(drag.pointer(), Vec2::zero());
    }
}
