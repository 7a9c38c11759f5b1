//! Text input controls that a keyboard panel can drive.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::observable::Observable;

/// Unique identifier for a control in the scene graph.
pub type ControlId = Uuid;

/// Host key code for deleting the previous character.
pub const KEY_CODE_BACKSPACE: i32 = 8;
/// Host key code for committing the input.
pub const KEY_CODE_ENTER: i32 = 13;
/// Host key code meaning "insert the accompanying character".
pub const KEY_CODE_CHARACTER: i32 = -1;

/// Edit command forwarded from the keyboard to a text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditCommand {
    /// Delete the character before the caret.
    DeletePrevious,
    /// Commit the current text (enter).
    Commit,
    /// Insert literal text.
    Insert(String),
}

impl EditCommand {
    /// Host key code and optional character for this command.
    pub fn key_code(&self) -> (i32, Option<&str>) {
        match self {
            EditCommand::DeletePrevious => (KEY_CODE_BACKSPACE, None),
            EditCommand::Commit => (KEY_CODE_ENTER, None),
            EditCommand::Insert(text) => (KEY_CODE_CHARACTER, Some(text.as_str())),
        }
    }

    /// Build a command from a host key code.
    ///
    /// Returns `None` for unknown codes or a character code without text.
    pub fn from_key_code(code: i32, character: Option<&str>) -> Option<Self> {
        match (code, character) {
            (KEY_CODE_BACKSPACE, _) => Some(EditCommand::DeletePrevious),
            (KEY_CODE_ENTER, _) => Some(EditCommand::Commit),
            (KEY_CODE_CHARACTER, Some(text)) => Some(EditCommand::Insert(text.to_string())),
            _ => None,
        }
    }
}

/// A text-editing control that accepts routed key commands.
pub trait TextInput {
    /// Identity of the control.
    fn id(&self) -> ControlId;

    /// Apply an edit command.
    fn process_key(&mut self, command: EditCommand);

    /// Fired when the control gains focus.
    ///
    /// Shared so listeners can be removed while the control is borrowed.
    fn on_focus(&self) -> &Rc<Observable<()>>;

    /// Fired when the control loses focus.
    fn on_blur(&self) -> &Rc<Observable<()>>;
}

/// Minimal single-line text input.
///
/// Keeps a text buffer and a focus flag. The caret always sits at the end.
#[derive(Debug)]
pub struct InputText {
    id: ControlId,
    text: String,
    focused: bool,
    on_focus: Rc<Observable<()>>,
    on_blur: Rc<Observable<()>>,
    on_text_changed: Observable<String>,
    on_commit: Observable<String>,
}

impl InputText {
    /// Create an empty, unfocused input.
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create an unfocused input holding `text`.
    pub fn with_text(text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            focused: false,
            on_focus: Rc::new(Observable::new()),
            on_blur: Rc::new(Observable::new()),
            on_text_changed: Observable::new(),
            on_commit: Observable::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, notifying listeners if it changed.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.on_text_changed.notify(&self.text);
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Give the input focus. No-op if already focused.
    pub fn focus(&mut self) {
        if !self.focused {
            self.focused = true;
            self.on_focus.notify(&());
        }
    }

    /// Take focus away. No-op if not focused.
    pub fn blur(&mut self) {
        if self.focused {
            self.focused = false;
            self.on_blur.notify(&());
        }
    }

    /// Fired with the new text after every change.
    pub fn on_text_changed(&self) -> &Observable<String> {
        &self.on_text_changed
    }

    /// Fired with the current text when the input is committed.
    pub fn on_commit(&self) -> &Observable<String> {
        &self.on_commit
    }
}

impl Default for InputText {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput for InputText {
    fn id(&self) -> ControlId {
        self.id
    }

    fn process_key(&mut self, command: EditCommand) {
        match command {
            EditCommand::Insert(text) => {
                if text.is_empty() {
                    return;
                }
                self.text.push_str(&text);
                self.on_text_changed.notify(&self.text);
            }
            EditCommand::DeletePrevious => {
                if self.text.pop().is_some() {
                    self.on_text_changed.notify(&self.text);
                }
            }
            EditCommand::Commit => {
                self.on_commit.notify(&self.text);
                self.blur();
            }
        }
    }

    fn on_focus(&self) -> &Rc<Observable<()>> {
        &self.on_focus
    }

    fn on_blur(&self) -> &Rc<Observable<()>> {
        &self.on_blur
    }
}
