//! Free-fly camera: input processing, orientation state, view transform.
//!
//! Discrete keyboard/mouse/scroll events become a continuously updated
//! position and orientation; a look-at view matrix is derived from that
//! state every frame. Camera motion lives entirely on the render thread.
//!
//! # Invariants
//! - `front`, `right`, `up` stay unit length and mutually orthogonal after
//!   any yaw/pitch change.
//! - Pitch stays within ±89° and zoom within [1°, 45°] while the per-call
//!   constraint flags are set.
//! - Orientation vectors are derived from yaw/pitch; nothing sets them
//!   directly.

mod camera;
mod orientation;

pub use camera::{Camera, MoveDirection};
pub use orientation::{front_from_angles, right_up_from_front};
