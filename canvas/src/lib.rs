//! Headless application shell for canvas-based editors.
//!
//! The crate owns everything between raw platform input and an application's
//! draw call: a pan/zoom viewport, input normalization with sticky modifiers
//! and keyboard scoping, a toolbar with tool selection, menus and modals with
//! widget models, a transient status message, and a fixed redraw pass. The
//! application plugs in through the [`dispatch::Handlers`] trait and draws
//! onto a [`render::Surface`].
//!
//! Without features the crate is platform-free and fully testable on the host.
//! The `web` feature adds [`web::WebShell`], a binding to a browser `<canvas>`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | [`app::Apper`] shell, [`app::ShellState`] and [`app::ShellConfig`] |
//! | [`dispatch`] | Input dispatcher, [`dispatch::Handlers`] trait and dispatch outcomes |
//! | [`input`] | Raw host events, modifier state and normalized event records |
//! | [`viewport`] | World/screen transform, zoom-to-cursor and pan |
//! | [`vector`] | 2D vector with scalar/pair/vector operands |
//! | [`rect`] | Axis-aligned rectangle with derived accessors |
//! | [`render`] | [`render::Surface`] trait, redraw pass and a recording surface |
//! | [`toolbar`] | Tool registry and toolbar selection |
//! | [`menu`] | Menus and modals |
//! | [`widgets`] | Headless widget models |
//! | [`message`] | Status messages with auto-hide and fade fallback |
//! | [`title`] | Document title field |
//! | [`error`] | Error types |
//! | [`consts`] | Shared constants (button masks, message duration, id base) |

pub mod app;
pub mod consts;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod menu;
pub mod message;
pub mod rect;
pub mod render;
pub mod title;
pub mod toolbar;
pub mod vector;
pub mod viewport;
#[cfg(feature = "web")]
pub mod web;
pub mod widgets;

pub use app::{Apper, ShellConfig, ShellState};
pub use dispatch::{Dispatch, Handlers};
pub use error::{ShellError, SurfaceError};
pub use vector::Vector2;
