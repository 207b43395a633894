//! Status line renderer: loading, error and notice messages.

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

/// Renders the status line at `row`, or a blank line when there is none.
///
/// The row is always consumed so the table below does not shift when a
/// status appears or clears.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let Some(status) = status else {
        print_padded("", cols);
        return row + 1;
    };

    let color = match status.kind {
        StatusKind::Loading => &theme.colors.loading_fg,
        StatusKind::Error => &theme.colors.error_fg,
        StatusKind::Notice => &theme.colors.notice_fg,
    };
    if status.kind == StatusKind::Error {
        print!("{}", Theme::bold());
    }
    print!("{}", Theme::fg(color));
    print_padded(&format!(" {}", status.message), cols);
    print!("{}", Theme::reset());
    row + 1
}
