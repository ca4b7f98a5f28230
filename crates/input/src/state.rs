use std::collections::HashSet;

use cubedrift_camera::MoveDirection;
use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Trackpads report pixel deltas; one wheel line is worth this many.
const PIXELS_PER_LINE: f32 = 100.0;

/// Map a physical key to a camera movement direction.
pub fn move_binding(code: KeyCode) -> Option<MoveDirection> {
    match code {
        KeyCode::KeyW => Some(MoveDirection::Forward),
        KeyCode::KeyS => Some(MoveDirection::Backward),
        KeyCode::KeyA => Some(MoveDirection::Left),
        KeyCode::KeyD => Some(MoveDirection::Right),
        _ => None,
    }
}

/// Per-frame input state: held keys plus accumulated look and scroll
/// deltas.
///
/// Events arrive whenever the platform delivers them; the render loop
/// drains the accumulators exactly once per frame with the `take_*`
/// methods, so a frame sees the sum of everything since the previous
/// frame. Look deltas are raw screen-convention values (y grows
/// downward); the camera's invert flag handles the sign.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    look_delta: Vec2,
    scroll_delta: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track key presses/releases and wheel movement from a window event.
    /// Other event kinds are ignored.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            self.held.insert(code);
                        }
                        ElementState::Released => {
                            self.held.remove(&code);
                        }
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.handle_scroll(*delta);
            }
            _ => {}
        }
    }

    /// Accumulate relative pointer motion from a device event.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.look_delta += Vec2::new(*dx as f32, *dy as f32);
        }
    }

    /// Accumulate a wheel delta, normalized to scroll lines.
    ///
    /// The `MouseWheel` arm of [`Self::handle_window_event`] delegates
    /// here; callers without a real window event (winit's carry a
    /// non-constructible device id) feed deltas directly.
    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += scroll_lines(delta);
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// Movement directions for every held movement key.
    pub fn held_directions(&self) -> impl Iterator<Item = MoveDirection> + '_ {
        self.held.iter().filter_map(|code| move_binding(*code))
    }

    /// Look delta accumulated since the last take. Resets the accumulator.
    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    /// Scroll lines accumulated since the last take. Resets the
    /// accumulator.
    pub fn take_scroll_delta(&mut self) -> f32 {
        std::mem::take(&mut self.scroll_delta)
    }

    /// Drop all held keys, e.g. on focus loss, so nothing sticks pressed.
    pub fn clear_held(&mut self) {
        if !self.held.is_empty() {
            tracing::debug!(count = self.held.len(), "clearing held keys");
        }
        self.held.clear();
    }
}

/// Normalize a wheel delta to scroll lines.
fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn wasd_maps_to_the_four_directions() {
        assert_eq!(move_binding(KeyCode::KeyW), Some(MoveDirection::Forward));
        assert_eq!(move_binding(KeyCode::KeyS), Some(MoveDirection::Backward));
        assert_eq!(move_binding(KeyCode::KeyA), Some(MoveDirection::Left));
        assert_eq!(move_binding(KeyCode::KeyD), Some(MoveDirection::Right));
    }

    #[test]
    fn unbound_keys_map_to_none() {
        assert_eq!(move_binding(KeyCode::KeyQ), None);
        assert_eq!(move_binding(KeyCode::Space), None);
        assert_eq!(move_binding(KeyCode::Escape), None);
    }

    #[test]
    fn look_delta_accumulates_then_resets() {
        let mut input = InputState::new();
        input.handle_device_event(&DeviceEvent::MouseMotion { delta: (3.0, -4.0) });
        input.handle_device_event(&DeviceEvent::MouseMotion { delta: (1.0, 2.0) });
        assert_eq!(input.take_look_delta(), Vec2::new(4.0, -2.0));
        assert_eq!(input.take_look_delta(), Vec2::ZERO);
    }

    #[test]
    fn scroll_delta_accumulates_then_resets() {
        let mut input = InputState::new();
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, -3.0));
        assert_eq!(input.take_scroll_delta(), -2.0);
        assert_eq!(input.take_scroll_delta(), 0.0);
    }

    #[test]
    fn pixel_scroll_normalizes_to_lines() {
        let mut input = InputState::new();
        input.handle_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 250.0)));
        assert_eq!(input.take_scroll_delta(), 2.5);
    }

    #[test]
    fn line_and_pixel_scroll_share_one_accumulator() {
        let mut input = InputState::new();
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        input.handle_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 150.0)));
        assert_eq!(input.take_scroll_delta(), 2.5);
    }

    #[test]
    fn held_keys_produce_directions() {
        let mut input = InputState::new();
        input.held.insert(KeyCode::KeyW);
        input.held.insert(KeyCode::KeyD);
        input.held.insert(KeyCode::KeyQ);
        let dirs: HashSet<MoveDirection> = input.held_directions().collect();
        assert_eq!(dirs.len(), 2);
        assert!(dirs.contains(&MoveDirection::Forward));
        assert!(dirs.contains(&MoveDirection::Right));
    }

    #[test]
    fn clear_held_releases_everything() {
        let mut input = InputState::new();
        input.held.insert(KeyCode::KeyW);
        input.held.insert(KeyCode::KeyA);
        input.clear_held();
        assert!(!input.is_held(KeyCode::KeyW));
        assert_eq!(input.held_directions().count(), 0);
    }
}
