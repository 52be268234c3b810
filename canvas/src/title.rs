//! Editable document title with a fallback default.

#[cfg(test)]
#[path = "title_test.rs"]
mod title_test;

use serde::Serialize;

use crate::consts::ENTER_KEY;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Title {
    value: String,
    default: String,
    editing: bool,
}

impl Title {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// Set the fallback title. An empty title takes it immediately.
    pub fn set_default(&mut self, value: impl Into<String>) {
        self.default = value.into();
        if self.value.is_empty() {
            self.value.clone_from(&self.default);
        }
    }

    /// Whether the field has keyboard focus.
    #[must_use]
    pub fn editing(&self) -> bool {
        self.editing
    }

    pub fn focus(&mut self) {
        self.editing = true;
    }

    /// Leave the field; an empty title reverts to the default.
    pub fn blur(&mut self) {
        self.editing = false;
        if self.value.is_empty() {
            self.value.clone_from(&self.default);
        }
    }

    /// Key pressed inside the field. Enter commits by blurring. Returns
    /// whether the key was consumed.
    pub fn commit_key(&mut self, code: &str) -> bool {
        if code.eq_ignore_ascii_case(ENTER_KEY) {
            self.blur();
            true
        } else {
            false
        }
    }
}
