//! Tests for the list sidebar state

use super::*;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn summary(id: &str, name: &str) -> ListSummary {
    ListSummary {
        id: ListId(id.to_string()),
        name: name.to_string(),
    }
}

fn id(s: &str) -> ListId {
    ListId(s.to_string())
}

fn loaded(lists: Vec<ListSummary>) -> ListsState {
    let mut state = ListsState::new();
    state.on_lists_loaded(Ok(lists), None);
    state
}

fn type_name(state: &mut ListsState, text: &str) {
    for c in text.chars() {
        state
            .name_input_mut()
            .input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
}

#[test]
fn test_first_list_is_opened_when_nothing_current() {
    let mut state = ListsState::new();
    state.begin_loading();
    let open = state.on_lists_loaded(Ok(vec![summary("a", "A"), summary("b", "B")]), None);

    assert_eq!(open, Some(id("a")));
    assert_eq!(state.selected_index(), 0);
    assert!(!state.is_loading());
}

#[test]
fn test_reload_keeps_current_selected() {
    let mut state = loaded(vec![summary("a", "A")]);
    let open = state.on_lists_loaded(
        Ok(vec![summary("a", "A"), summary("b", "B")]),
        Some(&id("b")),
    );

    assert_eq!(open, None);
    assert_eq!(state.selected_list(), Some(&summary("b", "B")));
}

#[test]
fn test_no_lists_opens_nothing() {
    let mut state = ListsState::new();
    assert_eq!(state.on_lists_loaded(Ok(Vec::new()), None), None);
    assert_eq!(state.selected_list(), None);
}

#[test]
fn test_load_failure_message() {
    let mut state = ListsState::new();
    state.begin_loading();
    state.on_lists_loaded(Err(BackendError::Network("down".to_string())), None);
    assert_eq!(state.error(), Some(LOAD_ERROR));
    assert!(!state.is_loading());
}

#[test]
fn test_selection_is_clamped() {
    let mut state = loaded(vec![summary("a", "A"), summary("b", "B")]);
    state.select_previous();
    assert_eq!(state.selected_index(), 0);
    state.select_next();
    state.select_next();
    assert_eq!(state.selected_index(), 1);
}

#[test]
fn test_create_requires_non_blank_name() {
    let mut state = loaded(Vec::new());
    state.start_create();
    type_name(&mut state, "   ");

    assert_eq!(state.submit_name(), None);
    assert_eq!(state.mode(), &ListsMode::Create);

    state.name_input_mut().set_text("  Party ");
    assert_eq!(
        state.submit_name(),
        Some(ListCommand::Create {
            name: "Party".to_string()
        })
    );
    assert_eq!(state.mode(), &ListsMode::Browse);
}

#[test]
fn test_created_list_is_selected() {
    let mut state = loaded(vec![summary("a", "A")]);
    state.on_created(Ok(summary("b", "B")));
    assert_eq!(state.selected_list(), Some(&summary("b", "B")));
}

#[test]
fn test_create_failure_message() {
    let mut state = loaded(Vec::new());
    state.on_created(Err(BackendError::Network("down".to_string())));
    assert_eq!(state.error(), Some(CREATE_ERROR));
}

#[test]
fn test_rename_prefills_and_renames_in_place() {
    let mut state = loaded(vec![summary("a", "Weekend"), summary("b", "B")]);
    state.start_rename();
    assert_eq!(state.name_input().text(), "Weekend");
    assert!(state.is_editing_name());

    type_name(&mut state, " trip");
    let command = state.submit_name().unwrap();
    assert_eq!(
        command,
        ListCommand::Rename {
            list_id: id("a"),
            name: "Weekend trip".to_string()
        }
    );

    state.on_renamed(&id("a"), "Weekend trip", Ok(()));
    assert_eq!(state.lists()[0].name, "Weekend trip");
    assert_eq!(state.lists()[1].name, "B");
}

#[test]
fn test_rename_without_lists_is_noop() {
    let mut state = loaded(Vec::new());
    state.start_rename();
    assert_eq!(state.mode(), &ListsMode::Browse);
}

#[test]
fn test_permission_denied_uses_backend_message() {
    let mut state = loaded(vec![summary("a", "A")]);
    state.on_renamed(
        &id("a"),
        "B",
        Err(BackendError::Forbidden(
            "You don't have permission to modify this list".to_string(),
        )),
    );
    assert_eq!(
        state.error(),
        Some("You don't have permission to modify this list")
    );
    assert_eq!(state.lists()[0].name, "A");
}

#[test]
fn test_delete_needs_confirmation() {
    let mut state = loaded(vec![summary("a", "A")]);
    assert_eq!(state.confirm_delete(), None);

    state.start_delete();
    assert_eq!(state.mode(), &ListsMode::ConfirmDelete { list_id: id("a") });
    assert_eq!(
        state.confirm_delete(),
        Some(ListCommand::Delete { list_id: id("a") })
    );
    assert_eq!(state.mode(), &ListsMode::Browse);
}

#[test]
fn test_cancel_delete() {
    let mut state = loaded(vec![summary("a", "A")]);
    state.start_delete();
    state.cancel();
    assert_eq!(state.mode(), &ListsMode::Browse);
}

#[test]
fn test_deleting_current_opens_first_remaining() {
    let mut state = loaded(vec![summary("a", "A"), summary("b", "B")]);
    state.select_next();

    let after = state.on_deleted(&id("b"), Ok(()), Some(&id("b")));

    assert_eq!(after, AfterDelete::Open(id("a")));
    assert_eq!(state.lists().len(), 1);
}

#[test]
fn test_deleting_other_list_keeps_current() {
    let mut state = loaded(vec![summary("a", "A"), summary("b", "B")]);
    let after = state.on_deleted(&id("b"), Ok(()), Some(&id("a")));
    assert_eq!(after, AfterDelete::KeepCurrent);
}

#[test]
fn test_deleting_last_list_closes() {
    let mut state = loaded(vec![summary("a", "A")]);
    assert_eq!(
        state.on_deleted(&id("a"), Ok(()), Some(&id("a"))),
        AfterDelete::Close
    );
    assert!(state.lists().is_empty());
}

#[test]
fn test_delete_failure_keeps_list() {
    let mut state = loaded(vec![summary("a", "A")]);
    let after = state.on_deleted(
        &id("a"),
        Err(BackendError::Network("down".to_string())),
        Some(&id("a")),
    );
    assert_eq!(after, AfterDelete::KeepCurrent);
    assert_eq!(state.lists().len(), 1);
    assert_eq!(state.error(), Some(DELETE_ERROR));
}
