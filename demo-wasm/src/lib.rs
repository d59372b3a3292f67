use squish::{DragState, NoOpStepObserver, SimParams, Vec2, World};
use wasm_bindgen::prelude::*;

// ---- Blobs Demo ----

/// Browser-facing wrapper around a world of blobs.
///
/// The page owns drawing and the control panel; it converts pointer events to
/// simulation coordinates before calling in.
#[wasm_bindgen]
pub struct BlobsDemo {
    world: World<f32>,
    params: SimParams<f32>,
    drag: DragState<f32>,
}

#[wasm_bindgen]
impl BlobsDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(bodies: usize, point_count: usize, radius: f32) -> Result<BlobsDemo, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let params = SimParams::new()
            .with_gravity(Vec2::new(0.0, -9.81))
            .with_walls(8.0, 2000.0, 20.0);
        let mut world = World::new();
        let spacing = radius * 2.4;
        for i in 0..bodies {
            let col = (i % 5) as f32 - 2.0;
            let row = (i / 5) as f32;
            world
                .create_body(point_count, radius, Vec2::new(col * spacing, row * spacing - 4.0))
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        }

        Ok(BlobsDemo { world, params, drag: DragState::idle() })
    }

    pub fn update(&mut self, dt: f32) -> usize {
        self.world
            .step(dt, &self.params, &self.drag, &mut NoOpStepObserver)
            .corrections
    }

    /// Returns the grabbed body index, or -1 for empty space.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> i32 {
        match self.drag.pointer_down(Vec2::new(x, y), &self.world) {
            Some(i) => i as i32,
            None => -1,
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.drag.pointer_move(Vec2::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    /// Rebuild every blob with a new point count and radius.
    pub fn rebuild(&mut self, point_count: usize, radius: f32) -> Result<(), JsValue> {
        self.drag.pointer_up();
        self.world
            .rebuild_all(point_count, radius)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_spring(&mut self, stiffness: f32, damping: f32) {
        self.params.spring_stiffness = stiffness;
        self.params.spring_damping = damping;
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.params.damping = damping;
    }

    pub fn set_pressure(&mut self, pressure: f32) {
        self.params.pressure = pressure;
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.params.gravity = Vec2::new(x, y);
    }

    pub fn set_walls(&mut self, distance: f32, stiffness: f32, damping: f32) {
        self.params.wall_distance = distance;
        self.params.wall_stiffness = stiffness;
        self.params.wall_damping = damping;
    }

    pub fn set_shape_stiffness(&mut self, stiffness: f32) {
        self.params.shape_stiffness = stiffness;
    }

    pub fn set_drag_stiffness(&mut self, stiffness: f32) {
        self.params.drag_stiffness = stiffness;
    }

    pub fn set_push(&mut self, strength: f32, radius: f32) {
        self.params.push_strength = strength;
        self.params.push_radius = radius;
    }

    pub fn body_count(&self) -> usize {
        self.world.body_count()
    }

    /// Returns positions for body at index as flat [x0, y0, x1, y1, ...]
    pub fn body_positions(&self, index: usize) -> Vec<f32> {
        let Ok(particles) = self.world.particles_of(index) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(particles.len() * 2);
        for p in particles {
            out.push(p.pos.x);
            out.push(p.pos.y);
        }
        out
    }

    /// Returns [cx, cy, cos, sin] for every body, from the last tick.
    pub fn poses(&self) -> Vec<f32> {
        self.world
            .poses()
            .iter()
            .flat_map(|p| [p.centroid.x, p.centroid.y, p.cos, p.sin])
            .collect()
    }

    /// Returns [cx, cy] of one body's current centroid, or empty if unknown.
    pub fn centroid(&self, index: usize) -> Vec<f32> {
        match self.world.centroid_of(index) {
            Ok(c) => vec![c.x, c.y],
            Err(_) => Vec::new(),
        }
    }
}
