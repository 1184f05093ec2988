//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`format`]: Number, date and text formatting
//! - [`helpers`]: Cursor positioning and match highlighting
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod format;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CountriesView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, HomeView, ScreenBody,
    SearchBarInfo, SortButton, StatCell, StatKind, StatSegment, UIViewModel,
};
