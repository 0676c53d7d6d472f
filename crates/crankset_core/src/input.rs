//! # Input Snapshot
//!
//! Button and crank state, read once at the start of a tick.

use bitflags::bitflags;

bitflags! {
    /// Button mask, bit-compatible with the console's button state word.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        /// D-pad left.
        const LEFT = 1 << 0;
        /// D-pad right.
        const RIGHT = 1 << 1;
        /// D-pad up.
        const UP = 1 << 2;
        /// D-pad down.
        const DOWN = 1 << 3;
        /// B button. Despawns.
        const B = 1 << 4;
        /// A button. Spawns.
        const A = 1 << 5;

        /// All four D-pad directions.
        const DPAD = Self::LEFT.bits() | Self::RIGHT.bits() | Self::UP.bits() | Self::DOWN.bits();
    }
}

/// Held buttons plus the edges since the previous poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Buttons held now.
    pub current: Buttons,
    /// Buttons that went down since the last poll.
    pub pushed: Buttons,
    /// Buttons that went up since the last poll.
    pub released: Buttons,
}

impl ButtonState {
    /// Derives edges from two consecutive held masks.
    #[must_use]
    pub fn from_transition(previous: Buttons, current: Buttons) -> Self {
        Self {
            current,
            pushed: current.difference(previous),
            released: previous.difference(current),
        }
    }
}

/// Where a tick reads its input from.
pub trait InputSource {
    /// Current button state with edges.
    fn button_state(&self) -> ButtonState;

    /// Absolute crank angle in degrees.
    fn crank_angle(&self) -> f32;
}

/// Input for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Button state with edges.
    pub buttons: ButtonState,
    /// Crank angle in `[0, 360)`.
    pub crank_angle: f32,
}

impl InputSnapshot {
    /// Reads a snapshot from an input source.
    pub fn read<S: InputSource + ?Sized>(source: &S) -> Self {
        Self::new(source.button_state(), source.crank_angle())
    }

    /// Builds a snapshot, wrapping the crank angle into `[0, 360)`.
    #[must_use]
    pub fn new(buttons: ButtonState, crank_angle: f32) -> Self {
        let crank_angle = if crank_angle.is_finite() {
            crank_angle.rem_euclid(360.0)
        } else {
            0.0
        };
        Self {
            buttons,
            crank_angle,
        }
    }

    /// Snapshot with the given buttons held and no edges.
    #[must_use]
    pub fn held(buttons: Buttons, crank_angle: f32) -> Self {
        Self::new(ButtonState::from_transition(buttons, buttons), crank_angle)
    }

    /// Returns `true` if the button went down this tick.
    #[inline]
    #[must_use]
    pub fn pushed(&self, button: Buttons) -> bool {
        self.buttons.pushed.contains(button)
    }

    /// Returns `true` if the button is held this tick.
    #[inline]
    #[must_use]
    pub fn is_held(&self, button: Buttons) -> bool {
        self.buttons.current.contains(button)
    }

    /// Step direction from the held D-pad, `-1`, `0` or `1` per axis.
    ///
    /// Opposing directions cancel.
    #[must_use]
    pub fn direction(&self) -> (i32, i32) {
        let axis = |neg: Buttons, pos: Buttons| {
            i32::from(self.is_held(pos)) - i32::from(self.is_held(neg))
        };
        (
            axis(Buttons::LEFT, Buttons::RIGHT),
            axis(Buttons::UP, Buttons::DOWN),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let state = ButtonState::from_transition(Buttons::A | Buttons::LEFT, Buttons::A | Buttons::B);
        assert_eq!(state.pushed, Buttons::B);
        assert_eq!(state.released, Buttons::LEFT);
        assert!(state.current.contains(Buttons::A));
    }

    #[test]
    fn test_held_has_no_edges() {
        let snapshot = InputSnapshot::held(Buttons::A, 0.0);
        assert!(snapshot.is_held(Buttons::A));
        assert!(!snapshot.pushed(Buttons::A));
    }

    #[test]
    fn test_direction() {
        assert_eq!(InputSnapshot::held(Buttons::RIGHT, 0.0).direction(), (1, 0));
        assert_eq!(InputSnapshot::held(Buttons::UP | Buttons::LEFT, 0.0).direction(), (-1, -1));
        assert_eq!(InputSnapshot::held(Buttons::LEFT | Buttons::RIGHT, 0.0).direction(), (0, 0));
        assert_eq!(InputSnapshot::held(Buttons::A, 0.0).direction(), (0, 0));
    }

    #[test]
    fn test_crank_wraps() {
        assert!((InputSnapshot::held(Buttons::empty(), 370.0).crank_angle - 10.0).abs() < 1e-4);
        assert!((InputSnapshot::held(Buttons::empty(), -90.0).crank_angle - 270.0).abs() < 1e-4);
        assert!(InputSnapshot::held(Buttons::empty(), f32::NAN).crank_angle.abs() < f32::EPSILON);
    }

    #[test]
    fn test_bit_layout() {
        assert_eq!(Buttons::LEFT.bits(), 1);
        assert_eq!(Buttons::A.bits(), 32);
        assert_eq!(Buttons::DPAD.bits(), 15);
    }
}
