//! Shared rendering utilities.
//!
//! Every component writes straight to stdout with ANSI escape sequences and
//! positions itself with [`position_cursor`]. Text widths are measured in
//! characters, never bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Clears the whole screen.
pub fn clear_screen() {
    print!("\u{1b}[2J");
}

/// Prints `text` padded with spaces to `width` characters, cutting it if longer.
pub fn print_padded(text: &str, width: usize) {
    let len = text.chars().count();
    if len > width {
        let cut: String = text.chars().take(width).collect();
        print!("{cut}");
    } else {
        print!("{text}{}", " ".repeat(width - len));
    }
}

/// Prints `text` centered within `width` characters.
pub fn print_centered(text: &str, width: usize) {
    let len = text.chars().count().min(width);
    let padding = width.saturating_sub(len) / 2;
    print!("{}", " ".repeat(padding));
    print_padded(text, width.saturating_sub(padding));
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices with an exclusive end. After
/// each highlighted section the normal text color is restored.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
