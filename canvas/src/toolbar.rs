//! Tools and the toolbar that selects between them.
//!
//! Tools live in a [`ToolRegistry`] owned by the shell state. Ids are handed
//! out in registration order starting at 1. The [`Toolbar`] references tools
//! by id and tracks the current and default selection.

#[cfg(test)]
#[path = "toolbar_test.rs"]
mod toolbar_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::FIRST_ID;
use crate::error::ShellError;

/// Identifier of a registered tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolId(pub u32);

/// An editing tool offered on the toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Internal name.
    pub name: String,
    /// Human readable name for the tooltip.
    pub display_name: String,
    /// Icon resource path.
    pub icon: String,
    /// Lowercased key code that activates the tool, empty for none.
    #[serde(default)]
    pub key: String,
    /// Shortcut hint shown in the tooltip, empty for none.
    #[serde(default)]
    pub shortcut: String,
}

impl Tool {
    #[must_use]
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            icon: icon.into(),
            key: String::new(),
            shortcut: String::new(),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into().to_lowercase();
        self
    }

    #[must_use]
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = shortcut.into();
        self
    }
}

// =============================================================
// Registry
// =============================================================

/// Application-owned list of tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool and return its id.
    pub fn register(&mut self, tool: Tool) -> ToolId {
        let id = ToolId(self.next_id());
        debug!(id = id.0, name = %tool.name, "tool registered");
        self.tools.push(tool);
        id
    }

    #[must_use]
    pub fn get(&self, id: ToolId) -> Option<&Tool> {
        self.iter().find(|(tool_id, _)| *tool_id == id).map(|(_, tool)| tool)
    }

    #[must_use]
    pub fn contains(&self, id: ToolId) -> bool {
        self.get(id).is_some()
    }

    /// # Errors
    ///
    /// Returns [`ShellError::UnknownTool`] if `id` was never registered.
    pub fn require(&self, id: ToolId) -> Result<&Tool, ShellError> {
        self.get(id).ok_or(ShellError::UnknownTool(id.0))
    }

    /// Tool bound to a (lowercased) key code.
    #[must_use]
    pub fn find_by_key(&self, code: &str) -> Option<ToolId> {
        let code = code.to_lowercase();
        self.iter().find(|(_, tool)| !tool.key.is_empty() && tool.key == code).map(|(id, _)| id)
    }

    fn next_id(&self) -> u32 {
        self.iter().last().map_or(FIRST_ID, |(id, _)| id.0 + 1)
    }

    /// Tools with their ids, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ToolId, &Tool)> {
        (FIRST_ID..).zip(&self.tools).map(|(id, tool)| (ToolId(id), tool))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

// =============================================================
// Toolbar
// =============================================================

/// One slot on the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tool", rename_all = "snake_case")]
pub enum ToolbarItem {
    Tool(ToolId),
    Spacer,
}

/// Tool buttons, spacers and the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolbar {
    shown: bool,
    items: Vec<ToolbarItem>,
    tool: Option<ToolId>,
    default_tool: Option<ToolId>,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Toolbar {
    #[must_use]
    pub fn new(shown: bool) -> Self {
        Self { shown, items: Vec::new(), tool: None, default_tool: None }
    }

    // --- Layout ---

    /// Append a button for `id`. A default tool also becomes the current tool.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownTool`] if `id` is not in `registry`.
    pub fn add_tool(&mut self, registry: &ToolRegistry, id: ToolId, is_default: bool) -> Result<&mut Self, ShellError> {
        registry.require(id)?;
        self.items.push(ToolbarItem::Tool(id));
        if is_default {
            self.tool = Some(id);
            self.default_tool = Some(id);
        }
        Ok(self)
    }

    pub fn add_spacer(&mut self) -> &mut Self {
        self.items.push(ToolbarItem::Spacer);
        self
    }

    #[must_use]
    pub fn items(&self) -> &[ToolbarItem] {
        &self.items
    }

    #[must_use]
    pub fn has_tool(&self, id: ToolId) -> bool {
        self.items.contains(&ToolbarItem::Tool(id))
    }

    // --- Selection ---

    #[must_use]
    pub fn tool(&self) -> Option<ToolId> {
        self.tool
    }

    pub fn set_tool(&mut self, id: Option<ToolId>) {
        self.tool = id;
    }

    #[must_use]
    pub fn default_tool(&self) -> Option<ToolId> {
        self.default_tool
    }

    pub fn set_default_tool(&mut self, id: Option<ToolId>) {
        self.default_tool = id;
    }

    /// Button press: selects `id`, or falls back to the default tool when `id`
    /// is already current. Returns the new current tool.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownTool`] if the toolbar has no button for `id`.
    pub fn click(&mut self, id: ToolId) -> Result<Option<ToolId>, ShellError> {
        if !self.has_tool(id) {
            return Err(ShellError::UnknownTool(id.0));
        }
        self.tool = if self.tool == Some(id) { self.default_tool } else { Some(id) };
        debug!(clicked = id.0, current = ?self.tool, "toolbar click");
        Ok(self.tool)
    }

    // --- Visibility ---

    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn show(&mut self) {
        self.shown = true;
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }

    pub fn toggle_shown(&mut self) {
        self.shown = !self.shown;
    }
}
