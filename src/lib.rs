//! Shape-matched pressure soft bodies in 2D.
//!
//! `squish` advances closed rings of particles ("blobs") with structural
//! springs, internal pressure and a rigid shape-matching term that keeps each
//! ring close to its rest shape. Bodies collide with each other and one body
//! at a time can be dragged with a pointer.
//!
//! # Features
//!
//! - **Mass-spring-pressure rings**: damped neighbor springs plus an area-preserving pressure term
//! - **Shape matching**: closed-form 2D best-fit rotation, no SVD
//! - **Collisions**: bounding-box culling, ray-cast containment and a hard snap to the nearest edge
//! - **Dragging**: grab a body by its centroid, or push blobs around from empty space
//! - **Double buffered**: every tick reads one buffer and writes the other, so
//!   particles can be advanced in parallel (`parallel` feature, via `rayon`)
//! - **Observable**: Monitor ticks via the `StepObserver` trait or the `log` facade
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! ```
//! use squish::{DragState, NoOpStepObserver, SimParams, Vec2, World};
//!
//! let mut world: World<f32> = World::new();
//! world.create_body(16, 1.0, Vec2::new(-2.0, 0.0)).unwrap();
//! world.create_body(16, 1.0, Vec2::new(2.0, 0.0)).unwrap();
//!
//! let params = SimParams::new().with_gravity(Vec2::new(0.0, -9.81));
//! let drag = DragState::idle();
//! for _ in 0..60 {
//!     world.step(1.0 / 240.0, &params, &drag, &mut NoOpStepObserver);
//! }
//! assert!(world.centroid_of(0).unwrap().y < 0.0);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod topology;
pub mod body;
pub mod shape_match;
pub mod bounds;
pub mod forces;
pub mod collision;
pub mod integrator;
pub mod drag;
pub mod world;
pub mod snapshot;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use particle::Particle;
pub use topology::RestShape;
pub use body::{Body, BodyHandle};
pub use shape_match::Pose;
pub use bounds::Aabb;
pub use drag::DragState;
pub use world::{TickView, World};
pub use snapshot::Snapshot;
pub use config::SimParams;
pub use observer::{StepObserver, NoOpStepObserver, LogStepObserver};
pub use error::PhysicsError;
