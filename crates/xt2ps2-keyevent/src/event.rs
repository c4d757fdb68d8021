use crate::KeyCode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Release = 0,
    Press = 1,
    #[default]
    None = 2,
}

/// A single key transition.
///
/// `code` is only meaningful when `action` is not [`KeyAction::None`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub code: KeyCode,
}

impl KeyEvent {
    pub const fn new(action: KeyAction, code: KeyCode) -> Self {
        Self { action, code }
    }

    pub const fn press(code: KeyCode) -> Self {
        Self::new(KeyAction::Press, code)
    }

    pub const fn release(code: KeyCode) -> Self {
        Self::new(KeyAction::Release, code)
    }

    pub fn is_press(&self) -> bool {
        self.action == KeyAction::Press
    }

    pub fn is_release(&self) -> bool {
        self.action == KeyAction::Release
    }

    pub fn with_code(self, code: KeyCode) -> Self {
        Self { code, ..self }
    }
}
