//! Headless widget models for menus and modals.
//!
//! Each widget keeps the state a host needs to draw it plus an optional
//! callback. Setters (`set_checked`, `set_value`, `set_text`) are silent; the
//! user-action methods (`commit`, `select`, `input`, `press`, `click`) update
//! state and fire the callback.

#[cfg(test)]
#[path = "widgets_test.rs"]
mod widgets_test;

use std::fmt;

use tracing::debug;

use crate::error::ShellError;

// =============================================================
// Shared pieces
// =============================================================

/// Visibility shared by every widget.
pub trait Widget {
    fn is_shown(&self) -> bool;

    fn set_shown(&mut self, shown: bool);

    fn show(&mut self) {
        self.set_shown(true);
    }

    fn hide(&mut self) {
        self.set_shown(false);
    }
}

macro_rules! impl_widget {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Widget for $ty {
                fn is_shown(&self) -> bool {
                    self.shown
                }

                fn set_shown(&mut self, shown: bool) {
                    self.shown = shown;
                }
            }
        )*
    };
}

/// Optional user callback receiving a borrowed value.
pub struct Callback<A: ?Sized>(Option<Box<dyn FnMut(&A)>>);

impl<A: ?Sized> Callback<A> {
    fn set(&mut self, f: impl FnMut(&A) + 'static) {
        self.0 = Some(Box::new(f));
    }

    fn fire(&mut self, value: &A) {
        if let Some(f) = self.0.as_mut() {
            f(value);
        }
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl<A: ?Sized> Default for Callback<A> {
    fn default() -> Self {
        Self(None)
    }
}

impl<A: ?Sized> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_set() { "Callback(set)" } else { "Callback(none)" })
    }
}

// =============================================================
// Paragraph
// =============================================================

#[derive(Debug)]
pub struct Paragraph {
    pub text: String,
    shown: bool,
}

impl Paragraph {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), shown: true }
    }
}

// =============================================================
// Button
// =============================================================

/// Push button, optionally a download link.
#[derive(Debug)]
pub struct Button {
    pub label: String,
    pub url: Option<String>,
    pub filename: Option<String>,
    shown: bool,
    on_click: Callback<()>,
}

impl Button {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), url: None, filename: None, shown: true, on_click: Callback::default() }
    }

    /// Link target and suggested download name.
    #[must_use]
    pub fn with_link(mut self, url: impl Into<String>, filename: Option<String>) -> Self {
        self.url = Some(url.into());
        self.filename = filename;
        self
    }

    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(&()) + 'static) -> Self {
        self.on_click.set(f);
        self
    }

    pub fn click(&mut self) {
        debug!(label = %self.label, "button click");
        self.on_click.fire(&());
    }
}

// =============================================================
// Checkbox
// =============================================================

#[derive(Debug)]
pub struct Checkbox {
    pub name: String,
    pub label: String,
    checked: bool,
    shown: bool,
    on_change: Callback<bool>,
}

impl Checkbox {
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, checked: bool) -> Self {
        Self { name: name.into(), label: label.into(), checked, shown: true, on_change: Callback::default() }
    }

    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&bool) + 'static) -> Self {
        self.on_change.set(f);
        self
    }

    #[must_use]
    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// User toggled the box.
    pub fn commit(&mut self, checked: bool) {
        self.checked = checked;
        self.on_change.fire(&checked);
    }
}

// =============================================================
// Spread
// =============================================================

/// Horizontal single-choice selector.
#[derive(Debug)]
pub struct Spread {
    pub name: String,
    pub label: String,
    pub label_icon: Option<String>,
    options: Vec<String>,
    value: Option<usize>,
    shown: bool,
    on_change: Callback<usize>,
}

impl Spread {
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            label_icon: None,
            options,
            value: None,
            shown: true,
            on_change: Callback::default(),
        }
    }

    #[must_use]
    pub fn with_label_icon(mut self, icon: impl Into<String>) -> Self {
        self.label_icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&usize) + 'static) -> Self {
        self.on_change.set(f);
        self
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn value(&self) -> Option<usize> {
        self.value
    }

    /// # Errors
    ///
    /// Returns [`ShellError::OptionOutOfRange`] for an index past the options.
    pub fn set_value(&mut self, value: Option<usize>) -> Result<(), ShellError> {
        if let Some(index) = value {
            self.check(index)?;
        }
        self.value = value;
        Ok(())
    }

    /// User picked option `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::OptionOutOfRange`] for an index past the options.
    pub fn select(&mut self, index: usize) -> Result<(), ShellError> {
        self.check(index)?;
        self.value = Some(index);
        self.on_change.fire(&index);
        Ok(())
    }

    fn check(&self, index: usize) -> Result<(), ShellError> {
        if index < self.options.len() {
            Ok(())
        } else {
            Err(ShellError::OptionOutOfRange { index, len: self.options.len() })
        }
    }
}

// =============================================================
// TextEditor
// =============================================================

/// Multi-line text field.
#[derive(Debug)]
pub struct TextEditor {
    pub name: String,
    pub placeholder: String,
    text: String,
    valid: bool,
    editing: bool,
    shown: bool,
    on_change: Callback<str>,
}

impl TextEditor {
    #[must_use]
    pub fn new(name: impl Into<String>, placeholder: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            placeholder: placeholder.into(),
            text: text.into(),
            valid: true,
            editing: false,
            shown: true,
            on_change: Callback::default(),
        }
    }

    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change.set(f);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// User edited the text.
    pub fn input(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.on_change.fire(&self.text);
    }

    /// Whether the content passed the application's validation.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Whether the field has keyboard focus.
    #[must_use]
    pub fn editing(&self) -> bool {
        self.editing
    }

    pub fn focus(&mut self) {
        self.editing = true;
    }

    pub fn blur(&mut self) {
        self.editing = false;
    }
}

// =============================================================
// ButtonList
// =============================================================

/// Row of buttons, each reporting its value.
#[derive(Debug)]
pub struct ButtonList {
    pub label: String,
    entries: Vec<ButtonEntry>,
    shown: bool,
    on_change: Callback<str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonEntry {
    pub value: String,
    pub name: String,
}

impl ButtonList {
    /// Pairs `values` with `names` position by position; extra items on either
    /// side are dropped.
    #[must_use]
    pub fn new<V, N>(label: impl Into<String>, values: V, names: N) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let entries = values
            .into_iter()
            .zip(names)
            .map(|(value, name)| ButtonEntry { value: value.into(), name: name.into() })
            .collect();
        Self { label: label.into(), entries, shown: true, on_change: Callback::default() }
    }

    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change.set(f);
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[ButtonEntry] {
        &self.entries
    }

    /// User pressed button `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::OptionOutOfRange`] for an index past the entries.
    pub fn press(&mut self, index: usize) -> Result<(), ShellError> {
        let len = self.entries.len();
        let entry = self.entries.get(index).ok_or(ShellError::OptionOutOfRange { index, len })?;
        self.on_change.fire(&entry.value);
        Ok(())
    }
}

// =============================================================
// NumberInput
// =============================================================

/// Numeric field clamped to `[min, max]` on commit.
#[derive(Debug)]
pub struct NumberInput {
    pub name: String,
    pub label: String,
    pub icon: Option<String>,
    value: f64,
    min: f64,
    max: f64,
    shown: bool,
    on_change: Callback<f64>,
}

impl NumberInput {
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            icon: None,
            value,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            shown: true,
            on_change: Callback::default(),
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&f64) + 'static) -> Self {
        self.on_change.set(f);
        self
    }

    pub fn set_min(&mut self, min: f64) -> &mut Self {
        self.min = min;
        self
    }

    pub fn set_max(&mut self, max: f64) -> &mut Self {
        self.max = max;
        self
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// User entered `value`. Clamps into range, stores, fires the callback and
    /// returns the stored value. NaN is ignored.
    pub fn commit(&mut self, value: f64) -> f64 {
        if value.is_nan() {
            debug!(name = %self.name, "number input ignored NaN");
            return self.value;
        }
        self.value = if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        };
        self.on_change.fire(&self.value);
        self.value
    }
}

// =============================================================
// CanvasImage
// =============================================================

/// Labelled off-screen drawing area; the host owns the pixels.
#[derive(Debug)]
pub struct CanvasImage {
    pub label: String,
    width: u32,
    height: u32,
    shown: bool,
}

impl CanvasImage {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), width: 0, height: 0, shown: true }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl_widget!(Paragraph, Button, Checkbox, Spread, TextEditor, ButtonList, NumberInput, CanvasImage);
