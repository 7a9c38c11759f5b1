//! On-screen keyboard panel.
//!
//! The panel owns a typed tree of key rows and a three-valued shift state.
//! Pressing a key fires the panel's key-press event with the key's label.
//! When a text input is attached, the label is also translated into an
//! [`EditCommand`] and forwarded to it:
//!
//! - the shift key cycles the shift state and restyles every key
//! - backspace and enter forward their control commands
//! - any other key is inserted, upper-cased while shift is active
//!
//! The panel hides itself while attached and shows/hides with the focus of
//! the attached input.

mod key;
mod layout;
mod shift;

pub use key::{KeyButton, KeyRow};
pub use layout::{KeyboardLayout, LayoutRow, BACKSPACE_KEY, ENTER_KEY, SHIFT_KEY, SPACE_KEY};
pub use shift::ShiftState;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use uuid::Uuid;

use crate::config::KeyboardConfig;
use crate::input::{ControlId, EditCommand, TextInput};
use crate::observable::{Observable, Observer};
use crate::style::KeyStyle;

/// Location of a key on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPosition {
    pub row: usize,
    pub column: usize,
}

impl KeyPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Listeners registered on an attached input.
///
/// Holds the input's focus and blur events directly so detaching never
/// has to borrow the input.
struct Connection {
    input: Rc<RefCell<dyn TextInput>>,
    input_id: ControlId,
    focus_events: Rc<Observable<()>>,
    blur_events: Rc<Observable<()>>,
    on_focus: Observer,
    on_blur: Observer,
}

/// A vertical stack of key rows that drives an attached text input.
pub struct KeyboardPanel {
    id: ControlId,
    config: KeyboardConfig,
    rows: Vec<KeyRow>,
    shift_state: ShiftState,
    visible: Rc<Cell<bool>>,
    on_key_press: Observable<String>,
    connection: Option<Connection>,
}

impl KeyboardPanel {
    /// Create an empty, visible panel.
    pub fn new(config: KeyboardConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            rows: Vec::new(),
            shift_state: ShiftState::Off,
            visible: Rc::new(Cell::new(true)),
            on_key_press: Observable::new(),
            connection: None,
        }
    }

    /// Create a panel populated from a layout table.
    pub fn with_layout(config: KeyboardConfig, layout: &KeyboardLayout) -> Self {
        let mut panel = Self::new(config);
        for row in &layout.rows {
            panel.add_row(&row.keys, row.styles.as_deref());
        }
        panel
    }

    /// Create a panel with the compact QWERTY layout.
    pub fn create_default_layout(config: KeyboardConfig) -> Self {
        let layout = KeyboardLayout::compact_qwerty(&config);
        Self::with_layout(config, &layout)
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> &[KeyRow] {
        &self.rows
    }

    pub fn shift_state(&self) -> ShiftState {
        self.shift_state
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible.set(visible);
    }

    /// Fired with the label of every pressed key.
    pub fn on_key_press(&self) -> &Observable<String> {
        &self.on_key_press
    }

    /// Append a row of keys.
    ///
    /// `styles` is only used when it has exactly one entry per label;
    /// otherwise every key in the row takes the panel defaults.
    pub fn add_row<S: AsRef<str>>(&mut self, labels: &[S], styles: Option<&[KeyStyle]>) {
        let styles = match styles {
            Some(styles) if styles.len() == labels.len() => Some(styles),
            Some(styles) => {
                log::warn!(
                    "Ignoring {} key styles for a row of {} keys",
                    styles.len(),
                    labels.len()
                );
                None
            }
            None => None,
        };

        let keys = labels
            .iter()
            .enumerate()
            .map(|(i, label)| KeyButton::new(label.as_ref(), styles.map(|s| &s[i]), &self.config))
            .collect();
        let mut row = KeyRow::new(keys, self.config.button_height);

        if self.shift_state.is_active() {
            for key in row.keys_mut() {
                restyle_key(key, self.shift_state, &self.config);
            }
        }
        self.rows.push(row);
    }

    /// Restyle every key for `state`.
    ///
    /// Labels are upper-cased while shift is active and lower-cased otherwise.
    /// The shift key is tinted while active and gets a border while locked.
    /// Does not change the panel's shift state.
    pub fn apply_shift_state(&mut self, state: ShiftState) {
        let config = &self.config;
        for key in self.rows.iter_mut().flat_map(|row| row.keys_mut().iter_mut()) {
            restyle_key(key, state, config);
        }
    }

    /// Set the shift state and restyle the keys.
    pub fn set_shift_state(&mut self, state: ShiftState) {
        if self.shift_state != state {
            log::debug!("Shift state {:?} -> {:?}", self.shift_state, state);
        }
        self.shift_state = state;
        self.apply_shift_state(state);
    }

    /// The key at `position`, if any.
    pub fn key_at(&self, position: KeyPosition) -> Option<&KeyButton> {
        self.rows.get(position.row)?.keys().get(position.column)
    }

    /// Position of the first key created with `label`.
    pub fn find_key(&self, label: &str) -> Option<KeyPosition> {
        self.rows.iter().enumerate().find_map(|(row, key_row)| {
            key_row
                .keys()
                .iter()
                .position(|k| k.key() == label)
                .map(|column| KeyPosition::new(row, column))
        })
    }

    /// Pointer released over the key at `position`.
    ///
    /// Positions without a key are ignored.
    pub fn pointer_up(&mut self, position: KeyPosition) {
        let Some(key) = self.key_at(position).map(|k| k.key().to_string()) else {
            log::debug!("No key at {:?}", position);
            return;
        };
        self.press(&key);
    }

    /// Fire the key-press event for `key` and route it to the attached input.
    pub fn press(&mut self, key: &str) {
        self.on_key_press.notify(&key.to_string());
        self.route_key(key);
    }

    /// Attach a text input.
    ///
    /// The panel hides until the input gains focus, then follows its
    /// focus and blur. Attaching the input that is already attached does
    /// nothing; attaching another one detaches the previous input first.
    pub fn connect<I>(&mut self, input: Rc<RefCell<I>>)
    where
        I: TextInput + 'static,
    {
        let input: Rc<RefCell<dyn TextInput>> = input;
        let (input_id, focus_events, blur_events) = match input.try_borrow() {
            Ok(control) => (
                control.id(),
                control.on_focus().clone(),
                control.on_blur().clone(),
            ),
            Err(_) => {
                log::warn!("Cannot attach keyboard {} to an input that is being edited", self.id);
                return;
            }
        };

        if self.connected_input() == Some(input_id) {
            return;
        }
        self.disconnect();

        self.visible.set(false);
        let visible = self.visible.clone();
        let on_focus = focus_events.add(move |_| visible.set(true));
        let visible = self.visible.clone();
        let on_blur = blur_events.add(move |_| visible.set(false));

        log::debug!("Keyboard {} attached to input {}", self.id, input_id);
        self.connection = Some(Connection {
            input,
            input_id,
            focus_events,
            blur_events,
            on_focus,
            on_blur,
        });
    }

    /// Detach the attached input, if any. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };
        connection.focus_events.remove(connection.on_focus);
        connection.blur_events.remove(connection.on_blur);
        log::debug!("Keyboard {} detached from input {}", self.id, connection.input_id);
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Id of the attached input.
    pub fn connected_input(&self) -> Option<ControlId> {
        self.connection.as_ref().map(|c| c.input_id)
    }

    fn route_key(&mut self, key: &str) {
        let Some(input) = self.connection.as_ref().map(|c| c.input.clone()) else {
            return;
        };

        let command = match key {
            SHIFT_KEY => {
                self.set_shift_state(self.shift_state.next());
                return;
            }
            BACKSPACE_KEY => EditCommand::DeletePrevious,
            ENTER_KEY => EditCommand::Commit,
            _ if self.shift_state.is_active() => EditCommand::Insert(key.to_uppercase()),
            _ => EditCommand::Insert(key.to_string()),
        };
        let inserted = matches!(command, EditCommand::Insert(_));

        match input.try_borrow_mut() {
            Ok(mut control) => control.process_key(command),
            Err(_) => {
                log::warn!("Dropping {:?}: attached input is busy", command);
                return;
            }
        }

        let next = self.shift_state.after_key();
        if inserted && next != self.shift_state {
            self.set_shift_state(next);
        }
    }
}

impl Drop for KeyboardPanel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl std::fmt::Debug for KeyboardPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardPanel")
            .field("id", &self.id)
            .field("rows", &self.rows.len())
            .field("shift_state", &self.shift_state)
            .field("visible", &self.visible.get())
            .field("connected_input", &self.connected_input())
            .finish()
    }
}

fn restyle_key(key: &mut KeyButton, state: ShiftState, config: &KeyboardConfig) {
    if key.key() == SHIFT_KEY {
        key.color = if state.is_active() {
            config.shift_button_color
        } else {
            config.button_color
        };
        key.thickness = if state.is_locked() {
            config.selected_shift_thickness
        } else {
            0.0
        };
    }
    let text = if state.is_active() {
        key.key().to_uppercase()
    } else {
        key.key().to_lowercase()
    };
    key.set_text(text);
}
