//! Three-valued shift state.

use serde::{Deserialize, Serialize};

/// Letter casing mode of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShiftState {
    /// Lowercase.
    #[default]
    Off = 0,
    /// Uppercase for the next key, then back to `Off`.
    Once = 1,
    /// Caps lock.
    Locked = 2,
}

impl ShiftState {
    /// Cycle to the next state (`Off -> Once -> Locked -> Off`).
    pub fn next(self) -> Self {
        match self {
            ShiftState::Off => ShiftState::Once,
            ShiftState::Once => ShiftState::Locked,
            ShiftState::Locked => ShiftState::Off,
        }
    }

    /// Whether keys are upper-cased.
    pub fn is_active(self) -> bool {
        self != ShiftState::Off
    }

    pub fn is_locked(self) -> bool {
        self == ShiftState::Locked
    }

    /// State after a non-shift key press.
    pub fn after_key(self) -> Self {
        match self {
            ShiftState::Once => ShiftState::Off,
            other => other,
        }
    }
}

impl From<u8> for ShiftState {
    /// Out-of-range values map to `Off`.
    fn from(value: u8) -> Self {
        match value {
            1 => ShiftState::Once,
            2 => ShiftState::Locked,
            _ => ShiftState::Off,
        }
    }
}

impl From<ShiftState> for u8 {
    fn from(state: ShiftState) -> Self {
        state as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_off() {
        let state = ShiftState::Off.next().next().next();
        assert_eq!(state, ShiftState::Off);
        assert_eq!(ShiftState::Off.next(), ShiftState::Once);
        assert_eq!(ShiftState::Once.next(), ShiftState::Locked);
    }

    #[test]
    fn test_after_key() {
        assert_eq!(ShiftState::Once.after_key(), ShiftState::Off);
        assert_eq!(ShiftState::Locked.after_key(), ShiftState::Locked);
        assert_eq!(ShiftState::Off.after_key(), ShiftState::Off);
    }

    #[test]
    fn test_integer_conversion() {
        for value in 0u8..=2 {
            assert_eq!(u8::from(ShiftState::from(value)), value);
        }
        assert_eq!(ShiftState::from(7), ShiftState::Off);
    }
}
