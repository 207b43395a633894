//! Note table renderer.
//!
//! Four columns: position, title, tag and age. Titles arrive truncated from
//! the view model; committed search matches are highlighted inside them.

use crate::ui::helpers::{self, position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const INDEX_WIDTH: usize = 4;
const TITLE_WIDTH: usize = 42;
const TAG_WIDTH: usize = 12;

/// Renders the column headers at `row`.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    let headers = format!(
        "{:<INDEX_WIDTH$}{:<TITLE_WIDTH$}{:<TAG_WIDTH$}{}",
        "#", "TITLE", "TAG", "CREATED"
    );
    print_padded(&headers, cols);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every item, one per row, starting at `row`.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_padded(&item.index.to_string(), INDEX_WIDTH);

    print!("{}", Theme::fg(&theme.colors.text_normal));
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme);
    print!("{}", " ".repeat(TITLE_WIDTH.saturating_sub(item.title.chars().count())));

    print!("{}", Theme::fg(&theme.colors.tag_fg));
    print_padded(&item.tag, TAG_WIDTH);

    print!("{}", Theme::fg(&theme.colors.text_dim));
    let used = INDEX_WIDTH + TITLE_WIDTH + TAG_WIDTH;
    print_padded(&item.age, cols.saturating_sub(used));

    print!("{}", Theme::reset());
    row + 1
}
