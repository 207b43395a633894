//! Page selector renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Page numbers shown on each side of the current page before eliding.
const PAGE_WINDOW: u32 = 2;

/// Renders the page selector at `row`.
///
/// ```text
///  ‹ 1 … 4 5 [6] 7 8 … 12 ›
/// ```
///
/// The current page is drawn in the highlight colors. First and last pages
/// are always listed.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" ‹");

    for entry in page_entries(pagination.current, pagination.total) {
        print!(" ");
        match entry {
            Some(page) if page == pagination.current => {
                print!("{}", Theme::fg(&theme.colors.page_current_fg));
                print!("{}", Theme::bg(&theme.colors.page_current_bg));
                print!("[{page}]");
                print!("{}", Theme::reset());
                print!("{}", Theme::fg(&theme.colors.text_dim));
            }
            Some(page) => print!("{page}"),
            None => print!("…"),
        }
    }

    print!(" ›");
    print!("{}", Theme::reset());
    row + 1
}

/// Page numbers to list, with `None` marking an elided gap.
fn page_entries(current: u32, total: u32) -> Vec<Option<u32>> {
    let low = current.saturating_sub(PAGE_WINDOW).max(1);
    let high = current.saturating_add(PAGE_WINDOW).min(total);

    let mut entries = Vec::new();
    if low > 1 {
        entries.push(Some(1));
        if low > 2 {
            entries.push(None);
        }
    }
    entries.extend((low..=high).map(Some));
    if high < total {
        if high + 1 < total {
            entries.push(None);
        }
        entries.push(Some(total));
    }
    entries
}
