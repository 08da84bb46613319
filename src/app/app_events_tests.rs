//! Tests for keyboard and paste handling

use ratatui::crossterm::event::KeyCode;

use crate::app::{Focus, Screen};
use crate::model::{Category, ListId};
use crate::sidebar::ListsMode;
use crate::test_utils::test_helpers::{Harness, test_list};
use crate::worker::BackendRequest;

fn harness() -> Harness {
    Harness::signed_in_with(test_list(
        "L1",
        "Weekend",
        &[("Milk", Category::Dairy, false)],
    ))
}

#[test]
fn test_ctrl_c_quits_from_any_screen() {
    let mut h = Harness::new();
    h.app.start();
    h.press_ctrl(KeyCode::Char('c'));
    assert!(h.app.should_quit());
}

#[test]
fn test_q_is_typed_on_auth_form() {
    let mut h = Harness::new();
    h.app.start();
    h.type_text("q");
    assert!(!h.app.should_quit());
    assert_eq!(h.app.auth.email().text(), "q");
}

#[test]
fn test_q_quits_from_items() {
    let mut h = harness();
    h.app.focus = Focus::Items;
    h.press(KeyCode::Char('q'));
    assert!(h.app.should_quit());
}

#[test]
fn test_login_submission() {
    let mut h = Harness::new();
    h.app.start();
    h.type_text("ann@example.com");
    h.press(KeyCode::Tab);
    h.type_text("secret");
    h.press(KeyCode::Enter);

    assert!(matches!(
        h.sent().as_slice(),
        [BackendRequest::LogIn { username, password }]
            if username == "ann@example.com" && password == "secret"
    ));

    // A second Enter while waiting sends nothing
    h.press(KeyCode::Enter);
    assert!(h.sent().is_empty());
}

#[test]
fn test_sign_up_submission() {
    let mut h = Harness::new();
    h.app.start();
    h.press_ctrl(KeyCode::Char('n'));
    h.type_text("new@example.com");
    h.press(KeyCode::Tab);
    h.type_text("pw");
    h.press(KeyCode::Enter);

    assert!(matches!(
        h.sent().as_slice(),
        [BackendRequest::SignUp { email, .. }] if email == "new@example.com"
    ));
}

#[test]
fn test_create_list_from_sidebar() {
    let mut h = harness();
    h.press(KeyCode::Char('n'));
    assert_eq!(h.app.lists.mode(), &ListsMode::Create);

    // Keys go to the name field, not the sidebar
    h.type_text("Party q");
    assert!(!h.app.should_quit());
    h.press(KeyCode::Enter);

    assert!(matches!(
        h.sent().as_slice(),
        [BackendRequest::CreateList { name, .. }] if name == "Party q"
    ));
    assert_eq!(h.app.lists.mode(), &ListsMode::Browse);
}

#[test]
fn test_blank_list_name_is_not_sent() {
    let mut h = harness();
    h.press(KeyCode::Char('n'));
    h.type_text("   ");
    h.press(KeyCode::Enter);

    assert!(h.sent().is_empty());
    assert_eq!(h.app.lists.mode(), &ListsMode::Create);

    h.press(KeyCode::Esc);
    assert_eq!(h.app.lists.mode(), &ListsMode::Browse);
}

#[test]
fn test_rename_prefills_and_sends() {
    let mut h = harness();
    h.press(KeyCode::Char('r'));
    assert_eq!(h.app.lists.name_input().text(), "Weekend");

    h.type_text("er");
    h.press(KeyCode::Enter);

    assert!(matches!(
        h.sent().as_slice(),
        [BackendRequest::RenameList { list_id, name, .. }]
            if list_id == &ListId("L1".to_string()) && name == "Weekender"
    ));
}

#[test]
fn test_delete_needs_confirmation() {
    let mut h = harness();
    h.press(KeyCode::Char('d'));
    assert!(h.sent().is_empty());

    h.press(KeyCode::Char('y'));
    assert!(matches!(
        h.sent().as_slice(),
        [BackendRequest::DeleteList { list_id, .. }] if list_id == &ListId("L1".to_string())
    ));
}

#[test]
fn test_enter_opens_selected_list() {
    let mut h = harness();
    h.press(KeyCode::Enter);

    assert!(matches!(
        h.sent().as_slice(),
        [BackendRequest::LoadList { .. }]
    ));
    assert_eq!(h.app.focus, Focus::Items);
}

#[test]
fn test_tab_cycles_focus() {
    let mut h = harness();
    h.press(KeyCode::Tab);
    assert_eq!(h.app.focus, Focus::Items);
    h.press(KeyCode::Tab);
    assert_eq!(h.app.focus, Focus::ItemInput);
    h.press(KeyCode::Tab);
    assert_eq!(h.app.focus, Focus::Sidebar);
    h.press(KeyCode::BackTab);
    assert_eq!(h.app.focus, Focus::ItemInput);
}

#[test]
fn test_a_focuses_input_and_esc_leaves() {
    let mut h = harness();
    h.app.focus = Focus::Items;
    h.press(KeyCode::Char('a'));
    assert_eq!(h.app.focus, Focus::ItemInput);

    h.type_text("q");
    assert!(!h.app.should_quit());

    h.press(KeyCode::Esc);
    assert_eq!(h.app.focus, Focus::Items);
}

#[test]
fn test_blank_item_is_not_added() {
    let mut h = harness();
    h.app.focus = Focus::ItemInput;
    h.type_text("  ");
    h.press(KeyCode::Enter);
    assert!(h.sent().is_empty());
}

#[test]
fn test_paste_goes_to_item_input() {
    let mut h = harness();
    h.app.focus = Focus::Items;
    h.app.handle_paste_event("Oat milk\nignored");

    assert_eq!(h.app.focus, Focus::ItemInput);
    assert_eq!(h.app.item_input.text(), "Oat milk");
}

#[test]
fn test_log_out_key_ignored_on_auth() {
    let mut h = Harness::new();
    h.app.start();
    h.press_ctrl(KeyCode::Char('o'));
    assert_eq!(h.app.screen, Screen::Auth);
    assert!(h.sent().is_empty());
    assert_eq!(h.app.notification.current_message(), None);
}

#[test]
fn test_esc_dismisses_error_before_anything_else() {
    let mut h = harness();
    h.app.focus = Focus::ItemInput;
    h.app.notification.show_error("Backend worker is not running");

    h.press(KeyCode::Esc);
    assert_eq!(h.app.notification.current_message(), None);
    assert_eq!(h.app.focus, Focus::ItemInput);

    h.press(KeyCode::Esc);
    assert_eq!(h.app.focus, Focus::Items);
}
