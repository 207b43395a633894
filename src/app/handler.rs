//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user commands
//! and worker responses, translating them into state changes and action
//! sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the command line reader or the fetch worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. Controllers mutate state and hand out cache tickets
//! 4. Tickets become [`Action::PostToWorker`] requests for the runtime
//!
//! # Event Types
//!
//! - **Routing**: `OpenRoute`
//! - **List**: `SearchInput`, `NextPage`, `PrevPage`, `GoToPage`, `Retry`
//! - **Create flow**: `OpenCompose`, `EditField`, `SubmitNote`, `CloseCompose`
//! - **Detail**: `OpenNote`, `CloseNote`
//! - **Worker**: `WorkerResponse` with typed message variants

use super::detail::DetailController;
use super::list::ListController;
use super::modes::Screen;
use crate::app::{Action, AppState};
use crate::cache::{FetchTicket, ListKey, NOTES_NAMESPACE};
use crate::domain::{Field, NoteTag, Result};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user commands or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Opens the list route of a tag. The raw segment is normalized; absent,
    /// empty, `All` and unknown values select every tag.
    OpenRoute { tag: Option<String> },

    /// Replaces the search input text. Committed after the debounce period.
    SearchInput(String),

    NextPage,
    PrevPage,

    /// Jumps to a 1-based page.
    GoToPage(u32),

    /// Refetches whatever the current screen shows.
    Retry,

    OpenCompose,

    /// Leaves the form without submitting. The draft is kept for the next open.
    CloseCompose,

    EditField { field: Field, value: String },

    SubmitNote,

    /// Opens the note at a 1-based position of the visible page.
    OpenNote { index: usize },

    CloseNote,

    Quit,

    /// A line that did not parse as a command on the current screen.
    Unrecognized(String),

    /// Wraps a response from the fetch worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the screen should be redrawn.
///
/// # Errors
///
/// Reserved for failures the runtime must see; every current event is
/// handled by updating state.
///
/// # Example
///
/// ```rust
/// use notehub::{handle_event, AppState, Event, Theme};
/// use std::time::Duration;
///
/// let mut state = AppState::new(Theme::default(), Duration::from_millis(700), 64);
/// let (render, actions) = handle_event(&mut state, &Event::OpenRoute { tag: Some("work".into()) })?;
/// assert!(render);
/// assert_eq!(actions.len(), 1);
/// # Ok::<(), notehub::NoteHubError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::OpenRoute { tag } => Ok((true, open_route(state, tag.as_deref()))),

        Event::SearchInput(text) => {
            if state.screen != Screen::Notes {
                return Ok((false, vec![]));
            }
            state.notice = None;
            let ticket = state.list.set_search_input(text.clone());
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::start_debounce(ticket))],
            ))
        }

        Event::NextPage => list_command(state, |list, cache| list.next_page(cache)),
        Event::PrevPage => list_command(state, |list, cache| list.prev_page(cache)),
        Event::GoToPage(page) => list_command(state, |list, cache| list.set_page(*page, cache)),

        Event::Retry => match state.screen {
            Screen::Notes => list_command(state, |list, cache| list.retry(cache)),
            Screen::Detail => {
                let ticket = state
                    .detail
                    .as_ref()
                    .and_then(|detail| detail.retry(&mut state.queries.notes));
                Ok((
                    true,
                    ticket
                        .map(|t| Action::PostToWorker(WorkerMessage::fetch_note(t)))
                        .into_iter()
                        .collect(),
                ))
            }
            Screen::Compose => Ok((false, vec![])),
        },

        Event::OpenCompose => {
            state.notice = None;
            state.screen = Screen::Compose;
            Ok((true, vec![]))
        }

        Event::CloseCompose => {
            state.screen = Screen::Notes;
            Ok((true, vec![]))
        }

        Event::EditField { field, value } => {
            if state.screen != Screen::Compose {
                return Ok((false, vec![]));
            }
            state.form.set_field(*field, value.clone());
            Ok((true, vec![]))
        }

        Event::SubmitNote => {
            if state.screen != Screen::Compose {
                return Ok((false, vec![]));
            }
            let actions = state
                .form
                .submit()
                .map(|payload| Action::PostToWorker(WorkerMessage::create_note(payload)))
                .into_iter()
                .collect();
            Ok((true, actions))
        }

        Event::OpenNote { index } => Ok((true, open_note(state, *index))),

        Event::CloseNote => {
            state.detail = None;
            state.screen = Screen::Notes;
            Ok((true, vec![]))
        }

        Event::Quit => Ok((false, vec![Action::Quit])),

        Event::Unrecognized(line) => {
            tracing::debug!(line = %line, screen = ?state.screen, "unrecognized command");
            state.notice = Some(format!("Unknown command: {line}"));
            Ok((true, vec![]))
        }

        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn fetch_notes(ticket: Option<FetchTicket<ListKey>>) -> Vec<Action> {
    ticket
        .map(|t| Action::PostToWorker(WorkerMessage::fetch_notes(t)))
        .into_iter()
        .collect()
}

/// Runs a list operation on the list screen and posts its fetch, if any.
fn list_command<F>(state: &mut AppState, op: F) -> Result<(bool, Vec<Action>)>
where
    F: FnOnce(&mut ListController, &mut crate::cache::QueryCache<ListKey, crate::domain::NotesPage>) -> Option<FetchTicket<ListKey>>,
{
    if state.screen != Screen::Notes || state.pending_route.is_some() {
        return Ok((false, vec![]));
    }
    state.notice = None;
    let ticket = op(&mut state.list, &mut state.queries.lists);
    Ok((true, fetch_notes(ticket)))
}

fn open_route(state: &mut AppState, raw: Option<&str>) -> Vec<Action> {
    let tag = NoteTag::from_route(raw);
    tracing::debug!(route_tag = ?tag, "opening route");

    state.screen = Screen::Notes;
    state.detail = None;
    state.notice = None;
    state.list = state.list.remount(tag);

    if state.queries.lists.is_valid(&ListKey::route_default(tag)) {
        state.pending_route = None;
        let ticket = state.list.mount(&mut state.queries.lists, None);
        return fetch_notes(ticket);
    }

    state.pending_route = Some(tag);
    vec![Action::PostToWorker(WorkerMessage::render_route(tag))]
}

fn open_note(state: &mut AppState, index: usize) -> Vec<Action> {
    let note = state
        .visible_notes()
        .and_then(|page| index.checked_sub(1).and_then(|i| page.notes.get(i).cloned()));

    let Some(note) = note else {
        state.notice = Some(format!("No note {index} on this page"));
        return vec![];
    };

    tracing::debug!(note_id = %note.id, "opening note");
    let detail = DetailController::new(note.id.clone());
    let ticket = detail.mount(&mut state.queries.notes, Some(note));
    state.detail = Some(detail);
    state.screen = Screen::Detail;
    state.notice = None;

    ticket
        .map(|t| Action::PostToWorker(WorkerMessage::fetch_note(t)))
        .into_iter()
        .collect()
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::RouteRendered { tag, result } => {
            if state.pending_route != Some(*tag) {
                tracing::debug!(route_tag = ?tag, "ignoring render of abandoned route");
                return Ok((false, vec![]));
            }
            state.pending_route = None;

            let seed = match result {
                Ok(page) => Some(page.clone()),
                Err(e) => {
                    tracing::warn!(route_tag = ?tag, error = %e, "route render failed, fetching live");
                    None
                }
            };
            let ticket = state.list.mount(&mut state.queries.lists, seed);
            Ok((true, fetch_notes(ticket)))
        }

        WorkerResponse::DebounceElapsed { generation } => {
            let ticket = state.list.debounce_elapsed(*generation, &mut state.queries.lists);
            Ok((ticket.is_some(), fetch_notes(ticket)))
        }

        WorkerResponse::NotesFetched { ticket, result } => {
            state.queries.lists.resolve(ticket, result.clone());
            state.list.refresh(&state.queries.lists);
            Ok((true, vec![]))
        }

        WorkerResponse::NoteFetched { ticket, result } => {
            state.queries.notes.resolve(ticket, result.clone());
            Ok((state.screen == Screen::Detail, vec![]))
        }

        WorkerResponse::NoteCreated { result: Ok(note) } => {
            tracing::debug!(note_id = %note.id, tag = %note.tag, "note created");
            let invalidated = state.queries.invalidate_namespace(NOTES_NAMESPACE);
            tracing::debug!(invalidated, "list queries invalidated");

            state.form.submit_succeeded();
            state.screen = Screen::Notes;
            state.notice = Some("Note created".to_string());
            let ticket = state.list.sync(&mut state.queries.lists);
            Ok((true, fetch_notes(ticket)))
        }

        WorkerResponse::NoteCreated { result: Err(e) } => {
            tracing::warn!(error = %e, "create note failed");
            state.form.submit_failed();
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, NotesPage};
    use crate::ui::Theme;
    use chrono::Utc;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(Theme::default(), Duration::from_millis(700), 16)
    }

    fn note(id: &str, tag: NoteTag) -> Note {
        Note {
            id: id.into(),
            title: format!("Note {id}"),
            content: String::new(),
            tag,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn page(notes: Vec<Note>, total_pages: u32) -> NotesPage {
        NotesPage { notes, total_pages }
    }

    fn single_fetch(actions: &[Action]) -> FetchTicket<ListKey> {
        match actions {
            [Action::PostToWorker(WorkerMessage::FetchNotes { ticket, .. })] => ticket.clone(),
            other => panic!("expected one list fetch, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, response: WorkerResponse) -> Vec<Action> {
        handle_event(state, &Event::WorkerResponse(response)).unwrap().1
    }

    fn open(state: &mut AppState, tag: Option<&str>, initial: NotesPage) {
        let (_, actions) = handle_event(state, &Event::OpenRoute { tag: tag.map(String::from) }).unwrap();
        let normalized = NoteTag::from_route(tag);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::RenderRoute { tag, .. })] if *tag == normalized
        ));
        let follow_up = respond(state, WorkerResponse::RouteRendered { tag: normalized, result: Ok(initial) });
        assert!(follow_up.is_empty(), "seeded route must not refetch");
    }

    #[test]
    fn route_tag_is_normalized() {
        let mut state = state();
        open(&mut state, Some("shopping"), page(vec![], 0));
        assert_eq!(state.list.route_tag(), Some(NoteTag::Shopping));

        open(&mut state, Some("All"), page(vec![], 0));
        assert_eq!(state.list.route_tag(), None);
    }

    #[test]
    fn revisiting_a_cached_route_needs_no_request() {
        let mut state = state();
        open(&mut state, Some("work"), page(vec![note("1", NoteTag::Work)], 1));
        open(&mut state, None, page(vec![], 0));

        let (_, actions) = handle_event(&mut state, &Event::OpenRoute { tag: Some("Work".into()) }).unwrap();
        assert!(actions.is_empty());
        assert!(state.pending_route.is_none());
        assert_eq!(state.visible_notes().unwrap().notes.len(), 1);
    }

    #[test]
    fn late_render_of_abandoned_route_is_ignored() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenRoute { tag: Some("work".into()) }).unwrap();
        handle_event(&mut state, &Event::OpenRoute { tag: Some("todo".into()) }).unwrap();

        let actions = respond(
            &mut state,
            WorkerResponse::RouteRendered {
                tag: Some(NoteTag::Work),
                result: Ok(page(vec![], 0)),
            },
        );
        assert!(actions.is_empty());
        assert_eq!(state.pending_route, Some(Some(NoteTag::Todo)));
    }

    #[test]
    fn debounce_tick_from_previous_route_is_ignored() {
        let mut state = state();
        open(&mut state, Some("work"), page(vec![note("1", NoteTag::Work)], 1));
        let stale = match handle_event(&mut state, &Event::SearchInput("old".into())).unwrap().1.as_slice() {
            [Action::PostToWorker(WorkerMessage::StartDebounce { ticket, .. })] => ticket.generation,
            other => panic!("unexpected actions {other:?}"),
        };

        open(&mut state, Some("todo"), page(vec![note("2", NoteTag::Todo)], 1));
        handle_event(&mut state, &Event::SearchInput("fresh".into())).unwrap();

        let actions = respond(&mut state, WorkerResponse::DebounceElapsed { generation: stale });
        assert!(actions.is_empty());
        assert!(state.list.is_search_pending());
        assert_eq!(state.list.search(), "");
    }

    #[test]
    fn tag_change_keeps_previous_notes_while_loading() {
        let mut state = state();
        open(&mut state, Some("work"), page(vec![note("1", NoteTag::Work)], 1));

        handle_event(&mut state, &Event::OpenRoute { tag: Some("todo".into()) }).unwrap();
        let view = state.list_view();
        assert!(view.flags().loading);
        let shown = view.visible_data().unwrap();
        assert_eq!(shown.notes[0].id, "1");

        respond(
            &mut state,
            WorkerResponse::RouteRendered {
                tag: Some(NoteTag::Todo),
                result: Ok(page(vec![note("2", NoteTag::Todo)], 1)),
            },
        );
        assert_eq!(state.visible_notes().unwrap().notes[0].id, "2");
    }

    #[test]
    fn failed_render_falls_back_to_live_fetch() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenRoute { tag: None }).unwrap();
        let actions = respond(
            &mut state,
            WorkerResponse::RouteRendered {
                tag: None,
                result: Err("down".into()),
            },
        );
        assert_eq!(single_fetch(&actions).key, ListKey::route_default(None));
    }

    #[test]
    fn search_is_debounced_and_resets_page() {
        let mut state = state();
        open(&mut state, None, page(vec![note("1", NoteTag::Todo)], 5));
        let ticket = single_fetch(&handle_event(&mut state, &Event::GoToPage(3)).unwrap().1);
        respond(&mut state, WorkerResponse::NotesFetched { ticket, result: Ok(page(vec![], 5)) });

        let mut generations = vec![];
        for text in ["m", "mi", "milk"] {
            let (_, actions) = handle_event(&mut state, &Event::SearchInput(text.into())).unwrap();
            match actions.as_slice() {
                [Action::PostToWorker(WorkerMessage::StartDebounce { ticket, .. })] => {
                    generations.push(ticket.generation);
                }
                other => panic!("unexpected actions {other:?}"),
            }
        }

        let mut fetches = vec![];
        for generation in generations {
            fetches.extend(respond(&mut state, WorkerResponse::DebounceElapsed { generation }));
        }
        assert_eq!(single_fetch(&fetches).key, ListKey::new("milk", 1, None));
    }

    #[test]
    fn invalid_submission_sends_nothing() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenCompose).unwrap();
        handle_event(
            &mut state,
            &Event::EditField {
                field: Field::Title,
                value: "ab".into(),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::SubmitNote).unwrap();
        assert!(actions.is_empty());
        assert!(state.form.errors.get(Field::Title).is_some());
    }

    #[test]
    fn created_note_invalidates_lists_and_refetches() {
        let mut state = state();
        open(&mut state, None, page(vec![], 0));
        handle_event(&mut state, &Event::OpenCompose).unwrap();
        handle_event(
            &mut state,
            &Event::EditField {
                field: Field::Title,
                value: "Plan sprint".into(),
            },
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::EditField {
                field: Field::Tag,
                value: "Work".into(),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::SubmitNote).unwrap();
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::CreateNote { payload, .. })] if payload.tag == NoteTag::Work
        ));

        let actions = respond(
            &mut state,
            WorkerResponse::NoteCreated {
                result: Ok(note("new", NoteTag::Work)),
            },
        );
        assert_eq!(single_fetch(&actions).key, ListKey::route_default(None));
        assert_eq!(state.screen, Screen::Notes);
        assert_eq!(state.form.draft.title, "");
        assert!(state.queries.lists.get(&ListKey::route_default(None)).unwrap().is_fetching());
    }

    #[test]
    fn failed_creation_keeps_the_draft() {
        let mut state = state();
        open(&mut state, None, page(vec![note("1", NoteTag::Todo)], 1));
        handle_event(&mut state, &Event::OpenCompose).unwrap();
        handle_event(
            &mut state,
            &Event::EditField {
                field: Field::Title,
                value: "Keep me".into(),
            },
        )
        .unwrap();
        handle_event(&mut state, &Event::SubmitNote).unwrap();

        let actions = respond(&mut state, WorkerResponse::NoteCreated { result: Err("500".into()) });
        assert!(actions.is_empty());
        assert!(state.queries.lists.is_valid(&ListKey::route_default(None)));
        assert_eq!(state.screen, Screen::Compose);
        assert_eq!(state.form.draft.title, "Keep me");
        assert_eq!(state.form.submit_error(), Some("Failed to create note"));
    }

    #[test]
    fn cancelled_form_reopens_with_its_values() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenCompose).unwrap();
        assert_eq!(state.form.draft.tag, "Todo");
        handle_event(
            &mut state,
            &Event::EditField {
                field: Field::Title,
                value: "Half written".into(),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::CloseCompose).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.screen, Screen::Notes);

        handle_event(&mut state, &Event::OpenCompose).unwrap();
        assert_eq!(state.form.draft.title, "Half written");
    }

    #[test]
    fn opening_a_listed_note_uses_list_data() {
        let mut state = state();
        open(&mut state, None, page(vec![note("a", NoteTag::Todo), note("b", NoteTag::Work)], 1));

        let (_, actions) = handle_event(&mut state, &Event::OpenNote { index: 2 }).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.screen, Screen::Detail);
        assert_eq!(state.detail.as_ref().unwrap().id(), "b");

        let (_, actions) = handle_event(&mut state, &Event::OpenNote { index: 9 }).unwrap();
        assert!(actions.is_empty());
        assert!(state.notice.is_some());
    }

    #[test]
    fn stale_list_response_leaves_view_alone() {
        let mut state = state();
        open(&mut state, None, page(vec![note("p1", NoteTag::Todo)], 3));
        let slow = single_fetch(&handle_event(&mut state, &Event::NextPage).unwrap().1);
        state.queries.invalidate_namespace(NOTES_NAMESPACE);

        respond(
            &mut state,
            WorkerResponse::NotesFetched {
                ticket: slow,
                result: Ok(page(vec![note("p2", NoteTag::Todo)], 3)),
            },
        );
        let entry = state.queries.lists.get(&ListKey::new("", 2, None)).unwrap();
        assert!(entry.data().is_none());
    }
}
