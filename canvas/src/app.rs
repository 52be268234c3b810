//! Application shell: owns the shell state, the handler set and the surface.
//!
//! Hosts feed raw events into [`Apper`]; it normalizes them through the
//! input dispatcher, invokes the matching [`Handlers`] method, and redraws
//! synchronously according to the outcome rules in [`Dispatch::resolve`].
//! Everything runs to completion on the calling thread.
//!
//! [`ShellState`] is the part handlers can see and mutate: viewport, tools,
//! toolbar, panels, messages, title and the input snapshot.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::MESSAGE_DURATION;
use crate::dispatch::{Dispatch, EventClass, Handlers, InputDispatcher};
use crate::error::ShellError;
use crate::input::{ModifierState, RawKey, RawPointer, RawWheel, ResizeInfo};
use crate::menu::{Panel, PanelId, PanelKind, PanelRegistry};
use crate::message::{MessageBoard, MessageEvent, MessageId};
use crate::render::{self, Surface, pixel_dimension};
use crate::title::Title;
use crate::toolbar::{ToolId, ToolRegistry, Toolbar};
use crate::vector::Vector2;
use crate::viewport::Viewport;

// =============================================================
// Config
// =============================================================

/// Library-level settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// How long a status message stays up, and the fade fallback delay.
    pub message_duration: Duration,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { message_duration: MESSAGE_DURATION }
    }
}

// =============================================================
// ShellState
// =============================================================

/// Shell state visible to handlers.
#[derive(Debug)]
pub struct ShellState {
    pub viewport: Viewport,
    pub tools: ToolRegistry,
    pub panels: PanelRegistry,
    pub messages: MessageBoard,
    pub title: Title,
    toolbar: Option<Toolbar>,
    input: InputDispatcher,
}

impl ShellState {
    #[must_use]
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            viewport: Viewport::default(),
            tools: ToolRegistry::new(),
            panels: PanelRegistry::new(),
            messages: MessageBoard::new(config.message_duration),
            title: Title::new(),
            toolbar: None,
            input: InputDispatcher::new(),
        }
    }

    // --- Coordinates ---

    #[must_use]
    pub fn screen_pos(&self, world: Vector2) -> Vector2 {
        self.viewport.transform(world)
    }

    #[must_use]
    pub fn world_pos(&self, screen: Vector2) -> Vector2 {
        self.viewport.locate(screen)
    }

    /// Pointer position while it is over the surface.
    #[must_use]
    pub fn cursor_pos(&self) -> Option<Vector2> {
        self.input.cursor()
    }

    #[must_use]
    pub fn modifiers(&self) -> ModifierState {
        self.input.modifiers()
    }

    #[must_use]
    pub fn input(&self) -> &InputDispatcher {
        &self.input
    }

    // --- Toolbar ---

    /// Create the toolbar on first call; later calls return the same one.
    pub fn enable_toolbar(&mut self) -> &mut Toolbar {
        self.toolbar.get_or_insert_with(|| {
            debug!("toolbar enabled");
            Toolbar::new(true)
        })
    }

    #[must_use]
    pub fn toolbar(&self) -> Option<&Toolbar> {
        self.toolbar.as_ref()
    }

    pub fn toolbar_mut(&mut self) -> Option<&mut Toolbar> {
        self.toolbar.as_mut()
    }

    /// Place a registered tool on the toolbar, enabling it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownTool`] if `id` was never registered.
    pub fn add_tool(&mut self, id: ToolId, is_default: bool) -> Result<(), ShellError> {
        let toolbar = self.toolbar.get_or_insert_with(Toolbar::default);
        toolbar.add_tool(&self.tools, id, is_default)?;
        Ok(())
    }

    /// Current tool; `None` without a toolbar or selection.
    #[must_use]
    pub fn tool(&self) -> Option<ToolId> {
        self.toolbar.as_ref().and_then(Toolbar::tool)
    }

    /// Select a tool. Without a toolbar there is no selection to change.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownTool`] if `id` is set and was never registered.
    pub fn set_tool(&mut self, id: Option<ToolId>) -> Result<(), ShellError> {
        if let Some(id) = id {
            self.tools.require(id)?;
        }
        match self.toolbar.as_mut() {
            Some(toolbar) => toolbar.set_tool(id),
            None => debug!(?id, "set_tool without toolbar"),
        }
        Ok(())
    }

    // --- Panels ---

    pub fn add_menu(&mut self, title: impl Into<String>) -> PanelId {
        self.panels.create(PanelKind::Menu, title)
    }

    pub fn add_modal(&mut self, title: impl Into<String>) -> PanelId {
        self.panels.create(PanelKind::Modal, title)
    }

    #[must_use]
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id)
    }

    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.get_mut(id)
    }

    /// Close button of a modal: hide it and return to the default tool.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownPanel`] if `id` was never created and
    /// [`ShellError::NotModal`] if it names a menu.
    pub fn close_modal(&mut self, id: PanelId) -> Result<(), ShellError> {
        let panel = self.panels.require_mut(id)?;
        if panel.kind() != PanelKind::Modal {
            return Err(ShellError::NotModal(id.0));
        }
        panel.hide();
        if let Some(toolbar) = self.toolbar.as_mut() {
            toolbar.set_tool(toolbar.default_tool());
        }
        debug!(id = id.0, tool = ?self.tool(), "modal closed");
        Ok(())
    }
}

// =============================================================
// Apper
// =============================================================

/// The application shell over handler set `H` and surface `S`.
#[derive(Debug)]
pub struct Apper<H, S> {
    state: ShellState,
    handlers: H,
    surface: S,
}

impl<H: Handlers<S>, S: Surface> Apper<H, S> {
    #[must_use]
    pub fn new(handlers: H, surface: S, config: &ShellConfig) -> Self {
        Self { state: ShellState::new(config), handlers, surface }
    }

    // --- Accessors ---

    #[must_use]
    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    #[must_use]
    pub fn handlers(&self) -> &H {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut H {
        &mut self.handlers
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give up the shell, returning the handler set and surface.
    pub fn into_parts(self) -> (H, S) {
        (self.handlers, self.surface)
    }

    // --- Lifecycle ---

    /// First layout pass: size everything and draw the first frame.
    ///
    /// # Errors
    ///
    /// Same as [`Self::window_resize`].
    pub fn start(&mut self, width: f64, height: f64, pixel_scale: f64) -> Result<(), ShellError> {
        info!(width, height, pixel_scale, "shell starting");
        self.window_resize(width, height, pixel_scale)
    }

    /// The host element now measures `width` x `height` logical pixels.
    ///
    /// Resizes the viewport and the surface's backing store to device pixels,
    /// notifies the handlers, then redraws. The center is kept; zoom follows
    /// the pixel scale, so one world unit spans `pixel_scale` device pixels
    /// at the start. A rejected resize leaves the viewport untouched.
    ///
    /// # Errors
    ///
    /// Non-finite or negative sizes, a non-positive pixel scale, or a surface
    /// failure.
    pub fn window_resize(&mut self, width: f64, height: f64, pixel_scale: f64) -> Result<(), ShellError> {
        let logical = Vector2::try_new(width, height)?;
        let device = logical * pixel_scale;
        self.state.viewport.resize(device, pixel_scale)?;
        self.surface.resize(pixel_dimension(device.x), pixel_dimension(device.y))?;
        debug!(width, height, pixel_scale, "window resized");
        self.handlers.window_resize(&mut self.state, &ResizeInfo { width, height });
        self.update()
    }

    /// Page offset of the surface's top-left corner, in logical pixels.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::NonFiniteVector`] for non-finite components.
    pub fn set_origin(&mut self, origin: Vector2) -> Result<(), ShellError> {
        self.state.input.set_origin(origin)
    }

    /// Redraw now.
    ///
    /// # Errors
    ///
    /// Surface or render failure.
    pub fn update(&mut self) -> Result<(), ShellError> {
        let state = &self.state;
        let handlers = &mut self.handlers;
        render::redraw(&mut self.surface, &state.viewport, |surface| handlers.render(state, surface))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Surface failure.
    pub fn focus_canvas(&mut self) -> Result<(), ShellError> {
        self.surface.focus()?;
        Ok(())
    }

    // --- Toolbar ---

    pub fn enable_toolbar(&mut self) -> &mut Toolbar {
        self.state.enable_toolbar()
    }

    /// Toolbar button press: toggle the tool, focus the surface, redraw.
    ///
    /// # Errors
    ///
    /// [`ShellError::UnknownTool`] if no toolbar button exists for `id`, or a
    /// surface failure.
    pub fn click_tool(&mut self, id: ToolId) -> Result<Option<ToolId>, ShellError> {
        let toolbar = self.state.toolbar.as_mut().ok_or(ShellError::UnknownTool(id.0))?;
        let tool = toolbar.click(id)?;
        self.focus_canvas()?;
        self.update()?;
        Ok(tool)
    }

    #[must_use]
    pub fn tool(&self) -> Option<ToolId> {
        self.state.tool()
    }

    /// Select a tool and redraw.
    ///
    /// # Errors
    ///
    /// [`ShellError::UnknownTool`] or a surface failure.
    pub fn set_tool(&mut self, id: Option<ToolId>) -> Result<(), ShellError> {
        self.state.set_tool(id)?;
        self.update()
    }

    // --- Panels ---

    pub fn add_menu(&mut self, title: impl Into<String>) -> PanelId {
        self.state.add_menu(title)
    }

    pub fn add_modal(&mut self, title: impl Into<String>) -> PanelId {
        self.state.add_modal(title)
    }

    /// Close a modal, reset the tool and redraw.
    ///
    /// # Errors
    ///
    /// [`ShellError::UnknownPanel`], [`ShellError::NotModal`] or a surface failure.
    pub fn close_modal(&mut self, id: PanelId) -> Result<(), ShellError> {
        self.state.close_modal(id)?;
        self.update()
    }

    // --- Messages ---

    pub fn show_message(&mut self, text: impl Into<String>, now: Duration) -> MessageId {
        self.state.messages.show_at(text, false, now)
    }

    pub fn show_error(&mut self, text: impl Into<String>, now: Duration) -> MessageId {
        self.state.messages.show_at(text, true, now)
    }

    pub fn hide_message(&mut self, now: Duration) -> Option<MessageId> {
        self.state.messages.hide_at(now)
    }

    /// The host's fade-out animation for `id` ended.
    pub fn message_animation_finished(&mut self, id: MessageId) -> bool {
        self.state.messages.animation_finished(id)
    }

    /// Fire due timers.
    pub fn tick(&mut self, now: Duration) -> Vec<MessageEvent> {
        self.state.messages.tick(now)
    }

    // --- Coordinates ---

    #[must_use]
    pub fn screen_pos(&self, world: Vector2) -> Vector2 {
        self.state.screen_pos(world)
    }

    #[must_use]
    pub fn world_pos(&self, screen: Vector2) -> Vector2 {
        self.state.world_pos(screen)
    }

    #[must_use]
    pub fn cursor_pos(&self) -> Option<Vector2> {
        self.state.cursor_pos()
    }

    #[must_use]
    pub fn modifiers(&self) -> ModifierState {
        self.state.modifiers()
    }

    // --- Input ---

    /// # Errors
    ///
    /// Malformed event (see [`InputDispatcher::pointer_down`]) or a surface failure.
    pub fn pointer_down(&mut self, raw: &RawPointer) -> Result<Dispatch, ShellError> {
        let Some(info) = self.state.input.pointer_down(raw, &self.state.viewport)? else {
            return Ok(Dispatch::IGNORED);
        };
        self.focus_canvas()?;
        let handled = self.handlers.mouse_down(&mut self.state, &info);
        self.finish(EventClass::Down, handled)
    }

    /// # Errors
    ///
    /// Malformed event or a surface failure.
    pub fn pointer_move(&mut self, raw: &RawPointer) -> Result<Dispatch, ShellError> {
        let info = self.state.input.pointer_move(raw, &self.state.viewport)?;
        let handled = self.handlers.mouse_move(&mut self.state, &info);
        self.finish(EventClass::Move, handled)
    }

    /// # Errors
    ///
    /// Malformed event or a surface failure.
    pub fn pointer_up(&mut self, raw: &RawPointer) -> Result<Dispatch, ShellError> {
        let info = self.state.input.pointer_up(raw, &self.state.viewport)?;
        let handled = self.handlers.mouse_up(&mut self.state, &info);
        self.finish(EventClass::Up, handled)
    }

    /// # Errors
    ///
    /// Malformed event or a surface failure.
    pub fn context_menu(&mut self, raw: &RawPointer) -> Result<Dispatch, ShellError> {
        let Some(info) = self.state.input.context_menu(raw, &self.state.viewport)? else {
            return Ok(Dispatch::IGNORED);
        };
        let handled = self.handlers.open_context_menu(&mut self.state, &info);
        self.finish(EventClass::ContextMenu, handled)
    }

    /// # Errors
    ///
    /// Malformed event or a surface failure.
    pub fn scroll_wheel(&mut self, raw: &RawWheel) -> Result<Dispatch, ShellError> {
        let Some(info) = self.state.input.wheel(raw, &self.state.viewport)? else {
            return Ok(Dispatch::IGNORED);
        };
        let handled = self.handlers.scroll_wheel(&mut self.state, &info);
        self.finish(EventClass::Wheel, handled)
    }

    /// # Errors
    ///
    /// Surface failure.
    pub fn key_down(&mut self, raw: &RawKey) -> Result<Dispatch, ShellError> {
        let Some(info) = self.state.input.key(raw) else {
            return self.finish_off_surface_key();
        };
        let handled = self.handlers.key_down(&mut self.state, &info);
        self.finish(EventClass::KeyDown, handled)
    }

    /// # Errors
    ///
    /// Surface failure.
    pub fn key_up(&mut self, raw: &RawKey) -> Result<Dispatch, ShellError> {
        let Some(info) = self.state.input.key(raw) else {
            return self.finish_off_surface_key();
        };
        let handled = self.handlers.key_up(&mut self.state, &info);
        self.finish(EventClass::KeyUp, handled)
    }

    fn finish(&mut self, class: EventClass, handled: bool) -> Result<Dispatch, ShellError> {
        let outcome = Dispatch::resolve(class, handled);
        debug!(?class, handled, prevent_default = outcome.prevent_default, "dispatched");
        if outcome.redrawn {
            self.update()?;
        }
        Ok(outcome)
    }

    fn finish_off_surface_key(&mut self) -> Result<Dispatch, ShellError> {
        self.update()?;
        Ok(Dispatch::REDRAW)
    }
}
