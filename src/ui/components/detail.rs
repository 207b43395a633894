//! Single-note renderer.

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailPanel;

/// Renders the note title, its tag and age, then the wrapped body.
///
/// Body lines beyond `last_row` are dropped.
pub fn render_detail(row: usize, detail: &DetailPanel, theme: &Theme, cols: usize, last_row: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print_padded(&format!(" {}", detail.title), cols);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.tag_fg));
    print!(" {}", detail.tag);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_padded(&format!(" · {}", detail.created), cols.saturating_sub(detail.tag.chars().count() + 1));
    print!("{}", Theme::reset());

    let mut current_row = row + 3;
    print!("{}", Theme::fg(&theme.colors.text_normal));
    for line in &detail.body {
        if current_row > last_row {
            break;
        }
        position_cursor(current_row, 1);
        print_padded(&format!("  {line}"), cols);
        current_row += 1;
    }
    print!("{}", Theme::reset());

    current_row
}
