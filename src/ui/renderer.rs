//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the [`UIViewModel`] from the application
//! state, then hand it to the layout for the current screen.

use crate::app::{AppState, Screen};
use crate::ui::components;
use crate::ui::helpers::{clear_screen, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Clears the terminal and draws one frame of `state` to stdout.
///
/// The caller flushes stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    clear_screen();
    position_cursor(1, 1);
    render_viewmodel(&viewmodel, &state.theme, rows, cols);
    position_cursor(rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match vm.screen {
        Screen::Notes => components::render_list_screen(vm, theme, cols, rows),
        Screen::Compose => components::render_compose_screen(vm, theme, cols, rows),
        Screen::Detail => components::render_detail_screen(vm, theme, cols, rows),
    }
}
