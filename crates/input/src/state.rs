use glam::Vec2;
use std::collections::HashSet;

/// Something the host observed: a key going down or up, the pointer moving,
/// or the window losing focus.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    /// Pointer position in window pixels.
    PointerMoved {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    FocusLost,
}

/// Currently held keys and the latest normalized pointer position.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
    pointer: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, id: &str, pressed: bool) {
        let id = id.to_lowercase();
        if pressed {
            self.held.insert(id);
        } else {
            self.held.remove(&id);
        }
    }

    pub fn is_pressed(&self, id: &str) -> bool {
        self.held.contains(&id.to_lowercase())
    }

    /// Set an already-normalized pointer position.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Normalize a pixel position to [-1, 1] with y pointing up.
    pub fn set_pointer_from_screen(&mut self, px: f32, py: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.set_pointer(px / width * 2.0 - 1.0, -(py / height) * 2.0 + 1.0);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Release every key. The pointer keeps its last position.
    pub fn clear_keys(&mut self) {
        self.held.clear();
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(id) => self.set_key(id, true),
            InputEvent::KeyUp(id) => self.set_key(id, false),
            InputEvent::PointerMoved {
                x,
                y,
                width,
                height,
            } => self.set_pointer_from_screen(*x, *y, *width, *height),
            InputEvent::FocusLost => {
                if !self.held.is_empty() {
                    tracing::debug!(released = self.held.len(), "focus lost, releasing keys");
                }
                self.clear_keys();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let mut s = InputState::new();
        s.set_key("W", true);
        assert!(s.is_pressed("w"));
        assert!(s.is_pressed("W"));
        s.set_key("w", false);
        assert!(!s.is_pressed("W"));
    }

    #[test]
    fn unknown_keys_are_not_pressed() {
        let s = InputState::new();
        assert!(!s.is_pressed("f13"));
        assert!(!s.is_pressed(""));
    }

    #[test]
    fn screen_corners_normalize() {
        let mut s = InputState::new();
        s.set_pointer_from_screen(0.0, 0.0, 800.0, 600.0);
        assert_eq!(s.pointer(), Vec2::new(-1.0, 1.0));
        s.set_pointer_from_screen(800.0, 600.0, 800.0, 600.0);
        assert_eq!(s.pointer(), Vec2::new(1.0, -1.0));
        s.set_pointer_from_screen(400.0, 300.0, 800.0, 600.0);
        assert_eq!(s.pointer(), Vec2::ZERO);
    }

    #[test]
    fn zero_sized_screen_keeps_pointer() {
        let mut s = InputState::new();
        s.set_pointer(0.5, 0.5);
        s.set_pointer_from_screen(10.0, 10.0, 0.0, 600.0);
        assert_eq!(s.pointer(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn focus_loss_releases_keys_but_not_pointer() {
        let mut s = InputState::new();
        s.apply(&InputEvent::KeyDown("w".into()));
        s.apply(&InputEvent::KeyDown("arrowleft".into()));
        s.set_pointer(0.25, -0.5);
        assert_eq!(s.held_count(), 2);
        s.apply(&InputEvent::FocusLost);
        assert_eq!(s.held_count(), 0);
        assert_eq!(s.pointer(), Vec2::new(0.25, -0.5));
    }

    #[test]
    fn events_route_to_state() {
        let mut s = InputState::new();
        s.apply(&InputEvent::KeyDown("Q".into()));
        assert!(s.is_pressed("q"));
        s.apply(&InputEvent::KeyUp("q".into()));
        assert!(!s.is_pressed("q"));
        s.apply(&InputEvent::PointerMoved {
            x: 200.0,
            y: 150.0,
            width: 400.0,
            height: 300.0,
        });
        assert_eq!(s.pointer(), Vec2::ZERO);
    }
}
