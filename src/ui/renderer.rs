//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: the body variant picks the screen layout

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ScreenBody, UIViewModel};

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output; Zellij clears the pane before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.body {
        ScreenBody::Empty(empty) => components::render_message_screen(vm, empty, theme, cols, rows),
        ScreenBody::Home(home) => components::render_home_screen(vm, home, theme, cols, rows),
        ScreenBody::Countries(view) => {
            components::render_countries_screen(vm, view, theme, cols, rows);
        }
    }
}
