use std::time::{Duration, Instant};

use glam::Vec2;

/// How long a directional key press stays "held". Terminals report presses
/// and repeats but no key-up, so a short hold window stands in for the set
/// of currently pressed keys.
pub const INPUT_HOLD_MS: u64 = 160;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DirKey {
    Left,
    Right,
    Up,
    Down,
}

impl DirKey {
    fn index(self) -> usize {
        match self {
            DirKey::Left => 0,
            DirKey::Right => 1,
            DirKey::Up => 2,
            DirKey::Down => 3,
        }
    }

    pub fn vector(self) -> Vec2 {
        match self {
            DirKey::Left => Vec2::NEG_X,
            DirKey::Right => Vec2::X,
            DirKey::Up => Vec2::NEG_Y,
            DirKey::Down => Vec2::Y,
        }
    }
}

/// Timestamps of the most recent press of each directional key.
#[derive(Default)]
pub struct HeldKeys {
    seen: [Option<Instant>; 4],
}

impl HeldKeys {
    pub fn press(&mut self, key: DirKey, now: Instant) {
        self.seen[key.index()] = Some(now);
    }

    /// Resolve the currently held set to a single direction. Diagonals are
    /// not representable: a fixed priority of left > right > up > down
    /// picks one key, and an empty set is idle.
    pub fn direction_at(&self, now: Instant) -> Vec2 {
        let window = Duration::from_millis(INPUT_HOLD_MS);
        for key in [DirKey::Left, DirKey::Right, DirKey::Up, DirKey::Down] {
            if let Some(t) = self.seen[key.index()] {
                if now.duration_since(t) <= window {
                    return key.vector();
                }
            }
        }
        Vec2::ZERO
    }
}

/// The five vectors player input may produce. Anything else is a caller
/// error and clamps to idle; this is the only place the 4-directional rule
/// lives, the agent itself accepts arbitrary vectors.
pub fn cardinal_or_idle(dir: Vec2) -> Vec2 {
    const LEGAL: [Vec2; 5] = [Vec2::ZERO, Vec2::NEG_X, Vec2::X, Vec2::NEG_Y, Vec2::Y];
    if LEGAL.contains(&dir) {
        dir
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_prefers_left_over_everything() {
        let now = Instant::now();
        let mut held = HeldKeys::default();
        held.press(DirKey::Down, now);
        held.press(DirKey::Right, now);
        held.press(DirKey::Left, now);
        assert_eq!(held.direction_at(now), Vec2::NEG_X);
    }

    #[test]
    fn priority_order_is_left_right_up_down() {
        let now = Instant::now();
        let mut held = HeldKeys::default();
        held.press(DirKey::Down, now);
        assert_eq!(held.direction_at(now), Vec2::Y);
        held.press(DirKey::Up, now);
        assert_eq!(held.direction_at(now), Vec2::NEG_Y);
        held.press(DirKey::Right, now);
        assert_eq!(held.direction_at(now), Vec2::X);
    }

    #[test]
    fn stale_presses_expire_to_idle() {
        let pressed = Instant::now();
        let mut held = HeldKeys::default();
        held.press(DirKey::Right, pressed);
        let later = pressed + Duration::from_millis(INPUT_HOLD_MS * 3);
        assert_eq!(held.direction_at(later), Vec2::ZERO);
    }

    #[test]
    fn empty_set_is_idle() {
        assert_eq!(HeldKeys::default().direction_at(Instant::now()), Vec2::ZERO);
    }

    #[test]
    fn cardinal_clamp_rejects_everything_else() {
        assert_eq!(cardinal_or_idle(Vec2::X), Vec2::X);
        assert_eq!(cardinal_or_idle(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(cardinal_or_idle(Vec2::new(1.0, 1.0)), Vec2::ZERO);
        assert_eq!(cardinal_or_idle(Vec2::new(0.5, 0.0)), Vec2::ZERO);
        assert_eq!(cardinal_or_idle(Vec2::new(0.0, -2.0)), Vec2::ZERO);
    }
}
