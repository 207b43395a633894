//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at a given row and returns the
//! next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with route and page position
//! - [`footer`]: Key hints for the current screen
//! - [`search`]: Search input box
//! - [`status`]: Loading, error and notice line
//! - [`table`]: Note list with `#`, `TITLE`, `TAG` and `CREATED` columns
//! - [`pagination`]: Page selector
//! - [`empty`]: Empty state message
//! - [`form`]: Create-note form
//! - [`detail`]: Single note
//!
//! # Layouts
//!
//! One layout function per screen: [`render_list_screen`],
//! [`render_compose_screen`] and [`render_detail_screen`].

mod detail;
mod empty;
mod footer;
mod form;
mod header;
mod pagination;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use form::render_form;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Draws the bottom border and footer on the last two rows.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.max(2);
    render_border(footer_row - 1, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

/// Renders the note list screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Status]
/// [Table Headers]
/// [Table Rows | Empty State]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
pub fn render_list_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else if !vm.display_items.is_empty() {
        current_row = render_table_headers(current_row, theme, cols);
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    if let Some(pagination) = &vm.pagination {
        render_pagination(rows.saturating_sub(3), pagination, theme);
    }
    render_bottom(vm, theme, cols, rows);
}

/// Renders the create-note form screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Form fields and submit state]
/// [Border]
/// [Footer]
/// ```
pub fn render_compose_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(form) = &vm.form {
        render_form(current_row + 1, form, theme, cols);
    }
    render_bottom(vm, theme, cols, rows);
}

/// Renders the single-note screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Status]
/// [Title, tag and age]
/// [Body]
/// [Border]
/// [Footer]
/// ```
pub fn render_detail_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    if let Some(detail) = &vm.detail {
        render_detail(current_row, detail, theme, cols, rows.saturating_sub(3));
    }
    render_bottom(vm, theme, cols, rows);
}
