//! Create-note form renderer.

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormPanel;

const LABEL_WIDTH: usize = 10;

/// Renders each field with its inline error below it, then the submit state.
///
/// ```text
///  Title     Weekly sync
///            Title must be at least 3 characters
///  Content   (empty)
///  Tag       Todo
///
///  Submitting…
/// ```
///
/// Multi-line content shows its first line followed by a line count.
pub fn render_form(row: usize, form: &FormPanel, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    let value_width = cols.saturating_sub(LABEL_WIDTH + 1);

    for field in &form.fields {
        position_cursor(current_row, 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.header_fg));
        print_padded(&format!(" {}", field.label), LABEL_WIDTH + 1);
        print!("{}", Theme::reset());

        print!("{}", Theme::fg(&theme.colors.text_normal));
        print_padded(&summarize(&field.value), value_width);
        print!("{}", Theme::reset());
        current_row += 1;

        if let Some(error) = &field.error {
            position_cursor(current_row, 1);
            print!("{}", " ".repeat(LABEL_WIDTH + 1));
            print!("{}", Theme::fg(&theme.colors.error_fg));
            print_padded(error, value_width);
            print!("{}", Theme::reset());
            current_row += 1;
        }
    }

    current_row += 1;
    position_cursor(current_row, 1);
    if form.submitting {
        print!("{}", Theme::fg(&theme.colors.loading_fg));
        print_padded(" Submitting…", cols);
    } else if let Some(error) = &form.submit_error {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.error_fg));
        print_padded(&format!(" {error}"), cols);
    } else {
        print_padded("", cols);
    }
    print!("{}", Theme::reset());

    current_row + 1
}

fn summarize(value: &str) -> String {
    if value.is_empty() {
        return "(empty)".to_string();
    }
    let mut lines = value.lines();
    let first = lines.next().unwrap_or_default();
    match lines.count() {
        0 => first.to_string(),
        more => format!("{first} (+{more} lines)"),
    }
}

#[cfg(test)]
mod tests {
    use super::summarize;

    #[test]
    fn summarizes_multiline_values() {
        assert_eq!(summarize(""), "(empty)");
        assert_eq!(summarize("one line"), "one line");
        assert_eq!(summarize("first\nsecond\nthird"), "first (+2 lines)");
    }
}
