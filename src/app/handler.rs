//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! search responses, and worker responses, translating them into state
//! changes and action sequences. It encodes the pagination and favorites
//! business rules:
//!
//! - A submit with an empty trimmed term fails validation locally and never
//!   issues a network call.
//! - Page 1 replaces the result list wholesale; later pages append in
//!   arrival order.
//! - Zero records on page 1 is surfaced as "No results found."; a failed
//!   load-more leaves the already-fetched pages untouched.
//! - Load-more is accepted only while `Loaded` with more available, so at
//!   most one fetch is outstanding; a submit supersedes an in-flight fetch
//!   and the stale response is discarded by comparing generations.
//! - Toggling a favorite is a synchronous involution on the favorites
//!   sequence, mirrored to durable storage after every mutation.

use crate::api;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{BibliofindError, BookRecord, FavoriteRecord};
use crate::worker::{WorkerMessage, WorkerResponse};

use super::modes::{InputMode, SearchStatus, ViewMode};

/// Events triggered by user input, search responses, or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor down by one position (wraps to top).
    CursorDown,
    /// Moves the cursor up by one position (wraps to bottom).
    CursorUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Gives the search form input field focus.
    EditQuery,
    /// Returns focus to the list without clearing the form buffer.
    ExitEdit,
    /// Appends a character to the search form buffer.
    Char(char),
    /// Removes the last character from the search form buffer.
    Backspace,
    /// Cycles the field selector (title, author, general).
    CycleField,
    /// Submits the search form for page 1 of a new query.
    SubmitSearch,
    /// Requests the next page of the active query.
    LoadMore,
    /// Toggles the selected record in the favorites sequence.
    ToggleFavorite,
    /// Opens the selected record on Open Library.
    OpenSelected,
    /// Switches the main panel to the results list.
    ShowResults,
    /// Switches the main panel to the favorites list.
    ShowFavorites,

    /// A search response arrived from the host.
    ///
    /// Carries the generation and page echoed through the request context,
    /// the HTTP status (0 when the transport itself failed), and the raw
    /// body bytes.
    SearchResponse {
        /// Request generation echoed from the fetch.
        generation: u64,
        /// Page number echoed from the fetch.
        page: u32,
        /// HTTP status code, or 0 for a transport failure.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to
/// execute.
///
/// This is the primary event handler coordinating all state transitions and
/// side effects. The boolean in the return value indicates whether the UI
/// should re-render.
///
/// # Errors
///
/// Returns errors from state mutation methods. Search failures are not
/// errors at this level; they become the `Error` status shown inline.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::CursorDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::EditQuery => {
            state.input_mode = InputMode::Editing;
            Ok((true, vec![]))
        }
        Event::ExitEdit => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.query.push(*c);
            tracing::trace!(query = %state.query, "query buffer updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.query.pop();
            Ok((true, vec![]))
        }
        Event::CycleField => {
            state.field = state.field.next();
            Ok((true, vec![]))
        }
        Event::SubmitSearch => submit_search(state),
        Event::LoadMore => load_more(state),
        Event::ToggleFavorite => toggle_favorite(state),
        Event::OpenSelected => {
            let url = match state.view_mode {
                ViewMode::Results => state.selected_book().and_then(BookRecord::open_library_url),
                ViewMode::Favorites => state
                    .selected_favorite()
                    .and_then(FavoriteRecord::open_library_url),
            };
            match url {
                Some(url) => {
                    tracing::debug!(url = %url, "opening record");
                    Ok((false, vec![Action::OpenUrl { url }]))
                }
                None => Ok((false, vec![])),
            }
        }
        Event::ShowResults => {
            state.view_mode = ViewMode::Results;
            state.selected_index = 0;
            Ok((true, vec![]))
        }
        Event::ShowFavorites => {
            state.view_mode = ViewMode::Favorites;
            state.selected_index = 0;
            Ok((true, vec![]))
        }
        Event::SearchResponse {
            generation,
            page,
            status,
            body,
        } => search_response(state, *generation, *page, *status, body),
        Event::WorkerResponse(response) => worker_response(state, response),
    }
}

/// Validates and submits the search form.
///
/// An empty trimmed term becomes an inline validation error with the list
/// cleared and no fetch issued. Otherwise the generation advances, the
/// active query is captured, and a page-1 fetch is emitted. A submit while a
/// fetch is in flight supersedes it; the old response will fail the
/// generation check on arrival.
fn submit_search(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let term = state.query.trim().to_string();
    state.input_mode = InputMode::Normal;
    state.view_mode = ViewMode::Results;

    if term.is_empty() {
        tracing::debug!("rejecting empty search term");
        state.books.clear();
        state.active = None;
        state.selected_index = 0;
        state.status = SearchStatus::Error {
            message: BibliofindError::EmptyQuery.to_string(),
        };
        return Ok((true, vec![]));
    }

    if state.status.is_loading() {
        tracing::debug!("superseding in-flight fetch");
    }

    state.generation = state.generation.wrapping_add(1);
    state.active = Some(super::state::ActiveQuery {
        term: term.clone(),
        field: state.field,
    });
    state.status = SearchStatus::Loading { page: 1 };

    tracing::debug!(term = %term, field = ?state.field, generation = state.generation, "submitting search");

    Ok((
        true,
        vec![Action::FetchPage {
            term,
            field: state.field,
            page: 1,
            generation: state.generation,
        }],
    ))
}

/// Requests the next page of the active query.
///
/// A no-op unless the last fetch resolved with more pages available, which
/// also makes it a no-op while a fetch is in flight.
fn load_more(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let SearchStatus::Loaded {
        page,
        has_more: true,
    } = &state.status
    else {
        tracing::debug!(status = ?state.status, "ignoring load more");
        return Ok((false, vec![]));
    };
    let next = *page + 1;

    let Some(active) = state.active.clone() else {
        return Ok((false, vec![]));
    };

    state.generation = state.generation.wrapping_add(1);
    state.status = SearchStatus::Loading { page: next };

    tracing::debug!(page = next, generation = state.generation, "loading next page");

    Ok((
        true,
        vec![Action::FetchPage {
            term: active.term,
            field: active.field,
            page: next,
            generation: state.generation,
        }],
    ))
}

/// Toggles the selected record in the favorites sequence and mirrors the
/// full sequence into durable storage.
fn toggle_favorite(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.view_mode {
        ViewMode::Results => {
            let Some(book) = state.selected_book().cloned() else {
                return Ok((false, vec![]));
            };
            state.toggle_favorite(&book);
        }
        ViewMode::Favorites => {
            let Some(favorite) = state.selected_favorite().cloned() else {
                return Ok((false, vec![]));
            };
            state.remove_favorite(&favorite.key);
            state.clamp_selection();
        }
    }

    Ok((
        true,
        vec![Action::PostToWorker(WorkerMessage::save_favorites(
            state.favorites.clone(),
        ))],
    ))
}

/// Applies a search response to the state.
///
/// A response whose generation does not match the current one belongs to a
/// superseded request and is discarded without touching state. Otherwise
/// the raw response is classified: page 1 replaces the list (or surfaces
/// "No results found." when empty), later pages append, and failures become
/// the inline error status while leaving already-fetched pages alone.
fn search_response(
    state: &mut AppState,
    generation: u64,
    page: u32,
    status: u16,
    body: &[u8],
) -> Result<(bool, Vec<Action>)> {
    if generation != state.generation {
        tracing::debug!(
            stale_generation = generation,
            current_generation = state.generation,
            "discarding stale search response"
        );
        return Ok((false, vec![]));
    }

    match api::parse_response(status, body, page) {
        Ok(result_page) => {
            tracing::debug!(
                page = page,
                records = result_page.records.len(),
                has_more = result_page.has_more,
                "search page resolved"
            );

            if result_page.records.is_empty() && page == 1 {
                state.books.clear();
                state.selected_index = 0;
                state.status = SearchStatus::Error {
                    message: BibliofindError::NoResults.to_string(),
                };
            } else {
                if page == 1 {
                    state.books = result_page.records;
                    state.selected_index = 0;
                } else {
                    state.books.extend(result_page.records);
                }
                state.status = SearchStatus::Loaded {
                    page,
                    has_more: result_page.has_more,
                };
                state.clamp_selection();
            }
        }
        Err(e) => {
            tracing::debug!(page = page, error = %e, "search page failed");
            state.status = SearchStatus::Error {
                message: e.to_string(),
            };
        }
    }

    Ok((true, vec![]))
}

/// Applies a worker response to the state.
fn worker_response(
    state: &mut AppState,
    response: &WorkerResponse,
) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::FavoritesLoaded { favorites } => {
            if &state.favorites == favorites {
                tracing::debug!("favorites unchanged, skipping render");
                Ok((false, vec![]))
            } else {
                state.favorites.clone_from(favorites);
                state.clamp_selection();
                Ok((true, vec![]))
            }
        }
        WorkerResponse::FavoritesSaved { count } => {
            tracing::debug!(count = count, "favorites persisted");
            Ok((false, vec![]))
        }
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            Ok((false, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SearchField;
    use crate::ui::theme::Theme;

    fn new_state() -> AppState {
        AppState::new(vec![], Theme::default())
    }

    fn submit(state: &mut AppState, term: &str) -> Vec<Action> {
        state.query = term.to_string();
        let (_, actions) = handle_event(state, &Event::SubmitSearch).expect("submit");
        actions
    }

    fn respond(state: &mut AppState, generation: u64, page: u32, status: u16, body: &str) {
        handle_event(
            state,
            &Event::SearchResponse {
                generation,
                page,
                status,
                body: body.as_bytes().to_vec(),
            },
        )
        .expect("response");
    }

    const HARRY_POTTER_PAGE: &str = r#"{
        "docs": [{
            "key": "/works/OL1W",
            "title": "Harry Potter",
            "author_name": ["J.K. Rowling"],
            "first_publish_year": 1997,
            "cover_i": 123
        }],
        "numFound": 1,
        "start": 0
    }"#;

    #[test]
    fn empty_term_fails_validation_without_a_fetch() {
        let mut state = new_state();
        state.books = vec![BookRecord {
            title: "Leftover".to_string(),
            ..BookRecord::default()
        }];

        let actions = submit(&mut state, "   ");

        assert!(actions.is_empty());
        assert!(state.books.is_empty());
        assert_eq!(
            state.status,
            SearchStatus::Error {
                message: "Please enter a search term.".to_string()
            }
        );
    }

    #[test]
    fn submit_issues_a_page_one_fetch() {
        let mut state = new_state();
        let actions = submit(&mut state, "  harry potter  ");

        assert_eq!(state.status, SearchStatus::Loading { page: 1 });
        assert_eq!(
            actions,
            vec![Action::FetchPage {
                term: "harry potter".to_string(),
                field: SearchField::Title,
                page: 1,
                generation: 1,
            }]
        );
    }

    #[test]
    fn page_one_replaces_the_list_wholesale() {
        let mut state = new_state();
        state.books = vec![BookRecord {
            title: "Stale".to_string(),
            ..BookRecord::default()
        }];
        state.selected_index = 0;

        submit(&mut state, "harry potter");
        respond(&mut state, 1, 1, 200, HARRY_POTTER_PAGE);

        assert_eq!(state.books.len(), 1);
        assert_eq!(state.books[0].title, "Harry Potter");
        assert_eq!(
            state.status,
            SearchStatus::Loaded {
                page: 1,
                has_more: false
            }
        );
    }

    #[test]
    fn empty_first_page_reports_no_results() {
        let mut state = new_state();
        submit(&mut state, "asimov");
        respond(&mut state, 1, 1, 200, r#"{"docs": [], "numFound": 0}"#);

        assert!(state.books.is_empty());
        assert_eq!(
            state.status,
            SearchStatus::Error {
                message: "No results found.".to_string()
            }
        );
    }

    #[test]
    fn load_more_appends_in_arrival_order() {
        let mut state = new_state();
        submit(&mut state, "dune");
        respond(
            &mut state,
            1,
            1,
            200,
            r#"{"docs": [{"title": "A"}, {"title": "B"}], "numFound": 4, "start": 0}"#,
        );
        assert_eq!(
            state.status,
            SearchStatus::Loaded {
                page: 1,
                has_more: true
            }
        );

        let (_, actions) = handle_event(&mut state, &Event::LoadMore).expect("load more");
        assert_eq!(
            actions,
            vec![Action::FetchPage {
                term: "dune".to_string(),
                field: SearchField::Title,
                page: 2,
                generation: 2,
            }]
        );

        respond(
            &mut state,
            2,
            2,
            200,
            r#"{"docs": [{"title": "C"}, {"title": "D"}], "numFound": 4, "start": 2}"#,
        );

        let titles: Vec<&str> = state.books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
        assert_eq!(
            state.status,
            SearchStatus::Loaded {
                page: 2,
                has_more: false
            }
        );
    }

    #[test]
    fn load_more_is_a_no_op_while_loading_or_exhausted() {
        let mut state = new_state();
        submit(&mut state, "dune");

        // in flight
        let (_, actions) = handle_event(&mut state, &Event::LoadMore).expect("load more");
        assert!(actions.is_empty());
        assert_eq!(state.status, SearchStatus::Loading { page: 1 });

        // resolved with nothing further
        respond(
            &mut state,
            1,
            1,
            200,
            r#"{"docs": [{"title": "A"}], "numFound": 1, "start": 0}"#,
        );
        let (_, actions) = handle_event(&mut state, &Event::LoadMore).expect("load more");
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_load_more_keeps_existing_results() {
        let mut state = new_state();
        submit(&mut state, "dune");
        respond(
            &mut state,
            1,
            1,
            200,
            r#"{"docs": [{"title": "A"}], "numFound": 2, "start": 0}"#,
        );
        handle_event(&mut state, &Event::LoadMore).expect("load more");
        respond(&mut state, 2, 2, 500, "");

        assert_eq!(state.books.len(), 1);
        assert_eq!(
            state.status,
            SearchStatus::Error {
                message: "API returned status 500".to_string()
            }
        );
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut state = new_state();
        submit(&mut state, "first");
        submit(&mut state, "second");

        // response for the superseded generation 1 arrives late
        respond(&mut state, 1, 1, 200, HARRY_POTTER_PAGE);
        assert!(state.books.is_empty());
        assert_eq!(state.status, SearchStatus::Loading { page: 1 });

        // the live generation still applies
        respond(&mut state, 2, 1, 200, HARRY_POTTER_PAGE);
        assert_eq!(state.books.len(), 1);
    }

    #[test]
    fn transport_failure_surfaces_the_generic_message() {
        let mut state = new_state();
        submit(&mut state, "dune");
        respond(&mut state, 1, 1, 0, "");

        assert_eq!(
            state.status,
            SearchStatus::Error {
                message: "Something went wrong during fetch.".to_string()
            }
        );
    }

    #[test]
    fn toggle_favorite_is_an_involution() {
        let mut state = new_state();
        state.favorites = vec![FavoriteRecord {
            key: "/works/OL9W".to_string(),
            title: "Existing".to_string(),
            author_name: None,
            first_publish_year: None,
            cover_i: None,
        }];
        submit(&mut state, "harry potter");
        respond(&mut state, 1, 1, 200, HARRY_POTTER_PAGE);

        let before = state.favorites.clone();

        let (_, actions) = handle_event(&mut state, &Event::ToggleFavorite).expect("toggle");
        assert_eq!(state.favorites.len(), 2);
        assert_eq!(state.favorites[0].key, "/works/OL1W");
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::SaveFavorites { .. })]
        ));

        handle_event(&mut state, &Event::ToggleFavorite).expect("toggle");
        assert_eq!(state.favorites, before);
    }

    #[test]
    fn removing_from_the_favorites_view_persists_the_sequence() {
        let mut state = new_state();
        submit(&mut state, "harry potter");
        respond(&mut state, 1, 1, 200, HARRY_POTTER_PAGE);
        handle_event(&mut state, &Event::ToggleFavorite).expect("toggle");

        handle_event(&mut state, &Event::ShowFavorites).expect("switch");
        let (_, actions) = handle_event(&mut state, &Event::ToggleFavorite).expect("remove");

        assert!(state.favorites.is_empty());
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::SaveFavorites { favorites, .. })]
                if favorites.is_empty()
        ));
    }

    #[test]
    fn typing_only_edits_the_buffer_in_editing_mode() {
        let mut state = new_state();

        handle_event(&mut state, &Event::Char('x')).expect("char");
        assert!(state.query.is_empty());

        handle_event(&mut state, &Event::EditQuery).expect("edit");
        handle_event(&mut state, &Event::Char('x')).expect("char");
        handle_event(&mut state, &Event::Char('y')).expect("char");
        handle_event(&mut state, &Event::Backspace).expect("backspace");
        assert_eq!(state.query, "x");

        handle_event(&mut state, &Event::ExitEdit).expect("exit");
        assert_eq!(state.query, "x");
    }

    #[test]
    fn open_selected_emits_the_outbound_link() {
        let mut state = new_state();
        submit(&mut state, "harry potter");
        respond(&mut state, 1, 1, 200, HARRY_POTTER_PAGE);

        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).expect("open");
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://openlibrary.org/works/OL1W".to_string()
            }]
        );
    }

    #[test]
    fn loaded_favorites_replace_the_sequence() {
        let mut state = new_state();
        let stored = vec![FavoriteRecord {
            key: "Untitled-".to_string(),
            title: "Untitled".to_string(),
            author_name: None,
            first_publish_year: None,
            cover_i: None,
        }];

        let (rendered, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::FavoritesLoaded {
                favorites: stored.clone(),
            }),
        )
        .expect("load");

        assert!(rendered);
        assert_eq!(state.favorites, stored);
    }
}
