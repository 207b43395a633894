//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth of the running client: the
//! query caches, the mounted list controller, the create-note form, the
//! open note and the current screen. It is mutated only by
//! [`handle_event`](super::handle_event).
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a renderable
//! [`UIViewModel`]: it derives the list view state from the cache, windows
//! the rows to the terminal height, computes fuzzy match highlights for the
//! committed search and picks the status line.

use super::detail::{DetailController, DetailView, NOTE_ERROR_MESSAGE};
use super::form::NoteForm;
use super::list::{ListController, ListView, EMPTY_MESSAGE, FETCH_ERROR_MESSAGE};
use super::modes::Screen;
use crate::cache::QueryClient;
use crate::domain::{Field, Note, NoteTag, NotesPage, TagFilter};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailPanel, DisplayItem, EmptyState, FooterInfo, FormFieldRow, FormPanel, HeaderInfo,
    PaginationInfo, SearchBarInfo, StatusKind, StatusLine, UIViewModel,
};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::sync::Arc;
use std::time::Duration;

/// Width of the title column in characters.
const TITLE_COLUMN_WIDTH: usize = 40;

/// Rows used by header, borders, search bar, table header, status,
/// pagination and footer.
const LIST_CHROME_ROWS: usize = 12;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Every cached query. Owned here and lent to controllers.
    pub queries: QueryClient,

    /// Controller of the currently mounted list route.
    pub list: ListController,

    /// Tag route whose initial data is being produced; the list is mounted
    /// once it arrives.
    pub pending_route: Option<TagFilter>,

    pub form: NoteForm,

    /// Open note, on the detail screen.
    pub detail: Option<DetailController>,

    pub screen: Screen,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// One-shot message shown in the status line ("Note created").
    pub notice: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme, debounce: Duration, cache_capacity: usize) -> Self {
        Self {
            queries: QueryClient::new(cache_capacity),
            list: ListController::new(None, debounce),
            pending_route: None,
            form: NoteForm::default(),
            detail: None,
            screen: Screen::Notes,
            theme,
            notice: None,
        }
    }

    /// View state of the list, treating a route still being rendered as loading.
    #[must_use]
    pub fn list_view(&self) -> ListView {
        if self.pending_route.is_some() {
            return ListView::Loading {
                previous: self.list.displayed(),
            };
        }
        self.list.view(&self.queries.lists)
    }

    /// Notes currently on screen, in display order.
    #[must_use]
    pub fn visible_notes(&self) -> Option<Arc<NotesPage>> {
        self.list_view().visible_data()
    }

    #[must_use]
    pub fn detail_view(&self) -> Option<DetailView> {
        self.detail.as_ref().map(|detail| detail.view(&self.queries.notes))
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", screen = ?self.screen, rows, cols).entered();

        let view = self.list_view();
        let now = Utc::now();

        let mut vm = UIViewModel {
            screen: self.screen,
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.list.search_input().to_string(),
                pending: self.list.is_search_pending(),
            },
            status: None,
            display_items: vec![],
            pagination: None,
            empty_state: None,
            form: None,
            detail: None,
            footer: FooterInfo {
                keybindings: self.screen.hints().to_string(),
            },
            flags: view.flags(),
        };

        match self.screen {
            Screen::Notes => {
                vm.status = self.compute_list_status(&view);
                if let Some(page) = view.visible_data() {
                    vm.display_items = self.compute_display_items(&page, rows, now);
                    if page.total_pages > 1 {
                        vm.pagination = Some(PaginationInfo {
                            current: self.list.page(),
                            total: page.total_pages,
                        });
                    }
                }
                if view == ListView::Empty {
                    vm.empty_state = Some(EmptyState {
                        message: EMPTY_MESSAGE.to_string(),
                        subtitle: "Type c to write one".to_string(),
                    });
                }
            }
            Screen::Compose => {
                vm.form = Some(self.compute_form_panel());
            }
            Screen::Detail => match self.detail_view() {
                Some(DetailView::Loaded(note)) => {
                    vm.detail = Some(Self::compute_detail_panel(&note, cols, now));
                }
                Some(DetailView::Error) => {
                    vm.status = Some(StatusLine {
                        kind: StatusKind::Error,
                        message: NOTE_ERROR_MESSAGE.to_string(),
                    });
                }
                Some(DetailView::Loading) | None => {
                    vm.status = Some(StatusLine {
                        kind: StatusKind::Loading,
                        message: "Loading note…".to_string(),
                    });
                }
            },
        }

        vm
    }

    fn compute_header(&self) -> HeaderInfo {
        let route = self
            .pending_route
            .unwrap_or_else(|| self.list.route_tag())
            .map_or("All notes", NoteTag::as_str);
        let title = match self.screen {
            Screen::Notes => match self.list.total_pages() {
                Some(total) if total > 0 => {
                    format!(" NoteHub · {route} · page {} of {total} ", self.list.page())
                }
                _ => format!(" NoteHub · {route} "),
            },
            Screen::Compose => " NoteHub · New note ".to_string(),
            Screen::Detail => " NoteHub · Note ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_list_status(&self, view: &ListView) -> Option<StatusLine> {
        match view {
            ListView::Loading { .. } => Some(StatusLine {
                kind: StatusKind::Loading,
                message: "Loading notes…".to_string(),
            }),
            ListView::Error { .. } => Some(StatusLine {
                kind: StatusKind::Error,
                message: FETCH_ERROR_MESSAGE.to_string(),
            }),
            _ => self.notice.as_ref().map(|notice| StatusLine {
                kind: StatusKind::Notice,
                message: notice.clone(),
            }),
        }
    }

    fn compute_display_items(&self, page: &NotesPage, rows: usize, now: DateTime<Utc>) -> Vec<DisplayItem> {
        let available_rows = rows.saturating_sub(LIST_CHROME_ROWS).max(1);
        let query = self.list.search();
        let matcher = (!query.is_empty()).then(SkimMatcherV2::default);

        page.notes
            .iter()
            .take(available_rows)
            .enumerate()
            .map(|(idx, note)| DisplayItem {
                index: idx + 1,
                title: truncate(&note.title, TITLE_COLUMN_WIDTH),
                tag: note.tag.to_string(),
                age: note.created_ago(now),
                highlight_ranges: matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| compute_highlight_ranges(&note.title, query, m)),
            })
            .collect()
    }

    fn compute_form_panel(&self) -> FormPanel {
        let draft = &self.form.draft;
        let fields = [
            (Field::Title, &draft.title),
            (Field::Content, &draft.content),
            (Field::Tag, &draft.tag),
        ]
        .into_iter()
        .map(|(field, value)| FormFieldRow {
            label: field.label(),
            value: value.clone(),
            error: self.form.errors.get(field).map(String::from),
        })
        .collect();

        FormPanel {
            fields,
            submitting: self.form.is_submitting(),
            submit_error: self.form.submit_error().map(String::from),
        }
    }

    fn compute_detail_panel(note: &Note, cols: usize, now: DateTime<Utc>) -> DetailPanel {
        let width = cols.saturating_sub(4).max(20);
        DetailPanel {
            title: note.title.clone(),
            tag: note.tag.to_string(),
            created: note.created_ago(now),
            body: wrap(&note.content, width),
        }
    }
}

/// Truncates to `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Greedy word wrap on character counts. Blank lines are kept.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = line.chars().count() + usize::from(!line.is_empty()) + word.chars().count();
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
