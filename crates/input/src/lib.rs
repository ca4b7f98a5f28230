//! Desktop input adapter: winit events mapped to camera commands.
//!
//! # Invariants
//! - Look and scroll deltas accumulate between frames and reset when taken.
//! - Key state tracks physical key codes; text input is never interpreted.
//! - The adapter owns no camera state; it only produces per-frame commands.

pub mod state;

pub use state::{InputState, move_binding};
