//! Demo settings: window size, camera tuning, projection, texture paths.
//!
//! Loaded from an optional JSON file. Every field has a default, so a
//! sparse file only overrides what it names. Settings flow one way: they
//! seed the demo at startup and nothing writes camera state back out.

use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::Vec3;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    /// World units per second of WASD travel.
    pub movement_speed: f32,
    /// Degrees of yaw/pitch per count of mouse motion.
    pub mouse_sensitivity: f32,
    /// Move the camera's pitch opposite to the raw vertical delta, so
    /// dragging the mouse up looks up.
    pub invert_pitch: bool,
    pub constrain_pitch: bool,
    pub constrain_zoom: bool,
    pub start_position: Vec3,
    pub znear: f32,
    pub zfar: f32,
    pub texture_a: PathBuf,
    pub texture_b: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            movement_speed: 2.0,
            mouse_sensitivity: 0.2,
            invert_pitch: true,
            constrain_pitch: true,
            constrain_zoom: true,
            start_position: Vec3::new(0.0, 0.0, 3.0),
            znear: 0.1,
            zfar: 100.0,
            texture_a: PathBuf::from("assets/crate.png"),
            texture_b: PathBuf::from("assets/decal.png"),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        Ok(settings)
    }
}
