//! Menus and modals: titled panels holding widgets.
//!
//! Menus and modals share one id sequence starting at 1. A modal differs from
//! a menu only in having a close button; closing it is handled by the shell
//! because it also resets the current tool.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::FIRST_ID;
use crate::error::ShellError;
use crate::widgets::{Button, ButtonList, CanvasImage, Checkbox, NumberInput, Paragraph, Spread, TextEditor, Widget};

/// Identifier of a menu or modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Menu,
    Modal,
}

/// One entry in a panel.
#[derive(Debug)]
pub enum PanelItem {
    Paragraph(Paragraph),
    Button(Button),
    Checkbox(Checkbox),
    Spread(Spread),
    TextEditor(TextEditor),
    ButtonList(ButtonList),
    NumberInput(NumberInput),
    CanvasImage(CanvasImage),
    Separator,
}

macro_rules! panel_item_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for PanelItem {
                fn from(widget: $variant) -> Self {
                    Self::$variant(widget)
                }
            }
        )*

        impl PanelItem {
            /// The widget behind this entry; `None` for separators.
            #[must_use]
            pub fn widget(&self) -> Option<&dyn Widget> {
                match self {
                    $(Self::$variant(w) => Some(w),)*
                    Self::Separator => None,
                }
            }

            pub fn widget_mut(&mut self) -> Option<&mut dyn Widget> {
                match self {
                    $(Self::$variant(w) => Some(w),)*
                    Self::Separator => None,
                }
            }
        }
    };
}

panel_item_from!(Paragraph, Button, Checkbox, Spread, TextEditor, ButtonList, NumberInput, CanvasImage);

/// A titled, initially hidden container of widgets.
#[derive(Debug)]
pub struct Panel {
    id: PanelId,
    kind: PanelKind,
    title: String,
    shown: bool,
    items: Vec<PanelItem>,
}

impl Panel {
    #[must_use]
    pub fn id(&self) -> PanelId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn show(&mut self) -> &mut Self {
        self.shown = true;
        self
    }

    pub fn hide(&mut self) -> &mut Self {
        self.shown = false;
        self
    }

    /// Append a widget and return its index.
    pub fn add(&mut self, item: impl Into<PanelItem>) -> usize {
        self.items.push(item.into());
        self.items.len() - 1
    }

    pub fn add_separator(&mut self) -> &mut Self {
        self.items.push(PanelItem::Separator);
        self
    }

    #[must_use]
    pub fn items(&self) -> &[PanelItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&PanelItem> {
        self.items.get(index)
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut PanelItem> {
        self.items.get_mut(index)
    }
}

/// All menus and modals of one shell.
#[derive(Debug)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
    next_id: u32,
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self { panels: Vec::new(), next_id: FIRST_ID }
    }
}

impl PanelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hidden panel and return its id.
    pub fn create(&mut self, kind: PanelKind, title: impl Into<String>) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        let title = title.into();
        debug!(id = id.0, ?kind, %title, "panel created");
        self.panels.push(Panel { id, kind, title, shown: false, items: Vec::new() });
        id
    }

    #[must_use]
    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    /// # Errors
    ///
    /// Returns [`ShellError::UnknownPanel`] if `id` was never created.
    pub fn require_mut(&mut self, id: PanelId) -> Result<&mut Panel, ShellError> {
        self.get_mut(id).ok_or(ShellError::UnknownPanel(id.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}
