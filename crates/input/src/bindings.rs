use crate::state::InputState;
use glam::Vec3;

/// A camera movement direction in world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit step for this direction. Forward is -Z.
    pub fn axis(self) -> Vec3 {
        match self {
            Direction::Forward => Vec3::NEG_Z,
            Direction::Back => Vec3::Z,
            Direction::Left => Vec3::NEG_X,
            Direction::Right => Vec3::X,
            Direction::Up => Vec3::Y,
            Direction::Down => Vec3::NEG_Y,
        }
    }
}

/// Which keys move the camera in which direction.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(Direction, Vec<String>)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect();
        Self {
            bindings: vec![
                (Direction::Forward, keys(&["w", "arrowup"])),
                (Direction::Back, keys(&["s", "arrowdown"])),
                (Direction::Left, keys(&["a", "arrowleft"])),
                (Direction::Right, keys(&["d", "arrowright"])),
                (Direction::Up, keys(&["q"])),
                (Direction::Down, keys(&["e"])),
            ],
        }
    }
}

impl KeyBindings {
    /// Bind an extra key to `direction`.
    pub fn bind(&mut self, direction: Direction, key: &str) {
        let key = key.to_lowercase();
        match self.bindings.iter_mut().find(|(d, _)| *d == direction) {
            Some((_, keys)) => {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
            None => self.bindings.push((direction, vec![key])),
        }
    }

    pub fn keys(&self, direction: Direction) -> &[String] {
        self.bindings
            .iter()
            .find(|(d, _)| *d == direction)
            .map(|(_, keys)| keys.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_active(&self, direction: Direction, input: &InputState) -> bool {
        self.keys(direction).iter().any(|k| input.is_pressed(k))
    }

    /// Sum of the unit axes of every direction with a held key. Opposite
    /// directions cancel; diagonals are not normalized.
    pub fn movement(&self, input: &InputState) -> Vec3 {
        Direction::ALL
            .into_iter()
            .filter(|d| self.is_active(*d, input))
            .map(Direction::axis)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[&str]) -> InputState {
        let mut s = InputState::new();
        for k in keys {
            s.set_key(k, true);
        }
        s
    }

    #[test]
    fn nothing_held_means_no_movement() {
        let idle = InputState::new();
        assert_eq!(KeyBindings::default().movement(&idle), Vec3::ZERO);
    }

    #[test]
    fn arrow_keys_mirror_wasd() {
        let b = KeyBindings::default();
        assert_eq!(b.movement(&held(&["w"])), b.movement(&held(&["ArrowUp"])));
        assert_eq!(b.movement(&held(&["d"])), Vec3::X);
        assert_eq!(b.movement(&held(&["arrowleft"])), Vec3::NEG_X);
    }

    #[test]
    fn same_direction_counts_once() {
        let b = KeyBindings::default();
        assert_eq!(b.movement(&held(&["w", "arrowup"])), Vec3::NEG_Z);
    }

    #[test]
    fn diagonals_are_additive() {
        let b = KeyBindings::default();
        let input = held(&["w", "d", "q"]);
        assert_eq!(b.movement(&input), Vec3::new(1.0, 1.0, -1.0));
    }

    #[test]
    fn opposites_cancel() {
        let b = KeyBindings::default();
        assert_eq!(b.movement(&held(&["q", "e"])), Vec3::ZERO);
    }

    #[test]
    fn extra_bindings_apply() {
        let mut b = KeyBindings::default();
        b.bind(Direction::Up, "Space");
        assert_eq!(b.keys(Direction::Up).len(), 2);
        assert_eq!(b.movement(&held(&["space"])), Vec3::Y);
    }
}
