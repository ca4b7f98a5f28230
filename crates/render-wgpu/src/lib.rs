//! wgpu render backend for the cubedrift demo.
//!
//! Draws an instanced field of spinning textured cubes from the camera's
//! point of view.
//!
//! # Invariants
//! - The renderer never mutates camera or input state.
//! - The projection derives from the camera's zoom every frame; aspect
//!   follows the surface size.
//! - Every GPU-visible struct is `#[repr(C)]` and Pod/Zeroable.

mod cubes;
mod gpu;
mod shaders;
mod texture;

pub use cubes::{CubeInstance, SPIN_AXIS};
pub use gpu::CubeRenderer;
pub use texture::{Texture, TextureError};
