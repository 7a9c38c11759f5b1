//! SoftKeys Core Library
//!
//! An on-screen virtual keyboard for retained-mode scene graphs: a panel of
//! key rows that routes presses to an attached text input and tracks
//! shift state.

pub mod config;
pub mod input;
pub mod keyboard;
pub mod observable;
pub mod style;

pub use config::{ConfigError, ConfigResult, KeyboardConfig};
pub use input::{ControlId, EditCommand, InputText, TextInput};
pub use keyboard::{
    KeyButton, KeyPosition, KeyRow, KeyboardLayout, KeyboardPanel, LayoutRow, ShiftState,
    BACKSPACE_KEY, ENTER_KEY, SHIFT_KEY, SPACE_KEY,
};
pub use observable::{Observable, Observer};
pub use style::{KeyStyle, SerializableColor, Shadow};
