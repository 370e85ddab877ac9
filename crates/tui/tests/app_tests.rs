//! App state machine tests: keys to actions, actions to state and
//! follow-ups. No network and no terminal.

use std::sync::Arc;

use apiconn_client::testing::{sample_connection, sample_history, sample_provider};
use apiconn_client::{ClientError, CreatedConnection, NotificationKind, ResourceId, Settings};
use apiconn_config::PersistedState;
use apiconn_tui::{Action, App, CurrentScreen, Popup};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;

fn app() -> App {
    App::new("http://localhost:5001", PersistedState::default())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Press a key and apply the resulting action chain, returning the first
/// action that needs a side effect.
fn press(app: &mut App, code: KeyCode) -> Option<Action> {
    let mut pending = app.handle_input(key(code));
    while let Some(action) = pending.take() {
        match action {
            Action::SwitchTo(_) | Action::NextScreen | Action::PreviousScreen => {
                pending = app.update(action);
            }
            other => return Some(other),
        }
    }
    None
}

fn two_connections() -> Vec<apiconn_client::Connection> {
    vec![
        sample_connection(1, "GitHub", "https://api.github.com"),
        sample_connection(2, "Weather", "https://api.openweathermap.org/data/2.5"),
    ]
}

#[test]
fn test_tab_cycles_screens_and_loads_data() {
    let mut app = app();
    assert_eq!(app.current_screen, CurrentScreen::Dashboard);

    let load = press(&mut app, KeyCode::Tab);
    assert_eq!(app.current_screen, CurrentScreen::Connections);
    assert!(matches!(load, Some(Action::LoadConnections)));

    let load = press(&mut app, KeyCode::BackTab);
    assert_eq!(app.current_screen, CurrentScreen::Dashboard);
    assert!(matches!(load, Some(Action::LoadDashboard)));
}

#[test]
fn test_number_keys_jump_to_screens() {
    let mut app = app();
    let load = press(&mut app, KeyCode::Char('4'));
    assert_eq!(app.current_screen, CurrentScreen::History);
    assert!(matches!(load, Some(Action::LoadHistory)));

    let load = press(&mut app, KeyCode::Char('8'));
    assert_eq!(app.current_screen, CurrentScreen::Docs);
    assert!(load.is_none(), "docs are static");
}

#[test]
fn test_q_quits_outside_text_entry() {
    let mut app = app();
    assert!(matches!(
        app.handle_input(key(KeyCode::Char('q'))),
        Some(Action::Quit)
    ));

    app.current_screen = CurrentScreen::Query;
    assert!(app.handle_input(key(KeyCode::Char('q'))).is_none());
    assert_eq!(app.query.input.value(), "q");
    assert!(matches!(app.handle_input(ctrl('c')), Some(Action::Quit)));
}

#[test]
fn test_connections_loaded_on_query_screen_requests_providers() {
    let mut app = app();
    app.current_screen = CurrentScreen::Query;

    let follow_up = app.update(Action::ConnectionsLoaded(Ok(two_connections())));

    assert!(matches!(follow_up, Some(Action::LoadProviders)));
    assert_eq!(app.query.connection_index, Some(0));
}

#[test]
fn test_last_connection_is_restored() {
    let persisted = PersistedState {
        last_connection_id: Some("2".to_string()),
        ..PersistedState::default()
    };
    let mut app = App::new("http://localhost:5001", persisted);
    app.update(Action::ConnectionsLoaded(Ok(two_connections())));
    assert_eq!(app.selected_connection().map(|c| c.name.as_str()), Some("Weather"));
}

#[test]
fn test_query_requires_connection_and_text() {
    let mut app = app();
    app.current_screen = CurrentScreen::Query;

    assert!(app.handle_input(key(KeyCode::Enter)).is_none());
    let toast = app.toasts.last().expect("validation toast");
    assert_eq!(toast.message, "Please select a connection and enter a query");

    app.update(Action::ConnectionsLoaded(Ok(two_connections())));
    assert!(app.handle_input(key(KeyCode::Enter)).is_none(), "empty query");

    app.query.input.set_value("  Get my repositories ");
    match app.handle_input(key(KeyCode::Enter)) {
        Some(Action::RunQuery(request)) => {
            assert_eq!(request.query, "Get my repositories");
            assert_eq!(request.connection_id, ResourceId::Int(1));
        }
        other => panic!("expected RunQuery, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_query_connection_cycles_and_is_remembered() {
    let mut app = app();
    app.current_screen = CurrentScreen::Query;
    app.update(Action::ConnectionsLoaded(Ok(two_connections())));

    app.handle_input(ctrl('n'));
    assert_eq!(app.query.connection_index, Some(1));
    assert_eq!(app.persisted.last_connection_id.as_deref(), Some("2"));

    app.handle_input(ctrl('n'));
    assert_eq!(app.query.connection_index, Some(0));
}

#[test]
fn test_running_query_blocks_resubmit() {
    let mut app = app();
    app.current_screen = CurrentScreen::Query;
    app.update(Action::ConnectionsLoaded(Ok(two_connections())));
    app.query.input.set_value("List open issues");

    let run = app.handle_input(key(KeyCode::Enter)).expect("run");
    app.update(run);
    assert!(app.query.running);
    assert!(app.handle_input(key(KeyCode::Enter)).is_none());
}

#[test]
fn test_query_failure_becomes_result_and_notification() {
    let mut app = app();
    app.query.running = true;
    let err = ClientError::ApiError {
        status: 400,
        url: "http://localhost:5001/api/query".to_string(),
        message: "Could not interpret query".to_string(),
    };
    app.update(Action::QueryCompleted(Err(Arc::new(err))));

    assert!(!app.query.running);
    let result = app.query.result.as_ref().expect("result");
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Could not interpret query"));
    let latest = app.notifications.all().first().expect("notification");
    assert_eq!(latest.kind, NotificationKind::Error);
    assert_eq!(latest.message, "Query failed: Could not interpret query");
}

#[test]
fn test_history_pagination() {
    let mut app = app();
    app.current_screen = CurrentScreen::History;
    app.update(Action::ConnectionsLoaded(Ok(two_connections())));
    app.update(Action::HistoryLoaded(Ok(sample_history(25))));
    assert_eq!(app.history_view.per_page, 10);
    assert_eq!(app.history_view.page, 1);

    app.handle_input(key(KeyCode::Right));
    app.handle_input(key(KeyCode::Right));
    assert_eq!(app.history_view.page, 3);
    app.handle_input(key(KeyCode::Right));
    assert_eq!(app.history_view.page, 3, "no page past the last");

    app.handle_input(key(KeyCode::Left));
    assert_eq!(app.history_view.page, 2);
}

#[test]
fn test_history_search_resets_page() {
    let mut app = app();
    app.current_screen = CurrentScreen::History;
    app.update(Action::HistoryLoaded(Ok(sample_history(25))));
    app.handle_input(key(KeyCode::Right));

    app.handle_input(key(KeyCode::Char('/')));
    assert!(app.is_editing());
    app.handle_input(key(KeyCode::Char('2')));
    assert_eq!(app.current_screen, CurrentScreen::History, "digits type while searching");
    assert_eq!(app.history_view.page, 1);
    assert_eq!(app.history_view.search.value(), "2");

    app.handle_input(key(KeyCode::Esc));
    assert!(!app.history_view.searching);
}

#[test]
fn test_history_loaded_fetches_connection_names_once() {
    let mut app = app();
    let follow_up = app.update(Action::HistoryLoaded(Ok(sample_history(3))));
    assert!(matches!(follow_up, Some(Action::LoadConnections)));

    app.update(Action::ConnectionsLoaded(Ok(two_connections())));
    let follow_up = app.update(Action::HistoryLoaded(Ok(sample_history(3))));
    assert!(follow_up.is_none());
}

#[test]
fn test_explorer_favorite_toggle_persists() {
    let mut app = app();
    app.current_screen = CurrentScreen::Explorer;
    app.update(Action::ProvidersLoaded(Ok(vec![
        sample_provider("github", "GitHub", "Developer Tools", "https://api.github.com"),
        sample_provider("stripe", "Stripe", "Payments", "https://api.stripe.com"),
    ])));

    match app.handle_input(key(KeyCode::Char('f'))) {
        Some(Action::SavePreferences(state)) => assert!(state.is_favorite("github")),
        other => panic!("expected SavePreferences, got {:?}", other.map(|_| ())),
    }
    assert!(app.persisted.is_favorite("github"));

    app.handle_input(key(KeyCode::Char('v')));
    app.handle_input(key(KeyCode::Char('v')));
    let visible: Vec<_> = app.visible_providers().iter().map(|p| p.key.clone()).collect();
    assert_eq!(visible, vec!["github".to_string()], "favorites tab");
}

#[test]
fn test_explorer_connect_prefills_form() {
    let mut app = app();
    app.current_screen = CurrentScreen::Explorer;
    app.update(Action::ProvidersLoaded(Ok(vec![sample_provider(
        "stripe",
        "Stripe",
        "Payments",
        "https://api.stripe.com",
    )])));

    let action = press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.current_screen, CurrentScreen::Connections);
    assert!(matches!(action, Some(Action::LoadConnections)));
    let form = app.connection_form.as_ref().expect("form");
    assert_eq!(form.name.value(), "Stripe");
    assert_eq!(form.base_url.value(), "https://api.stripe.com");
}

#[test]
fn test_delete_connection_needs_confirmation() {
    let mut app = app();
    app.current_screen = CurrentScreen::Connections;
    app.update(Action::ConnectionsLoaded(Ok(two_connections())));

    assert!(app.handle_input(key(KeyCode::Char('d'))).is_none());
    assert!(matches!(app.popup, Some(Popup::ConfirmDeleteConnection { .. })));

    // Unrelated keys leave the confirmation open.
    assert!(app.handle_input(key(KeyCode::Char('x'))).is_none());
    assert!(app.popup.is_some());

    match app.handle_input(key(KeyCode::Char('y'))) {
        Some(Action::DeleteConnection(id)) => assert_eq!(id, ResourceId::Int(1)),
        other => panic!("expected DeleteConnection, got {:?}", other.map(|_| ())),
    }
    assert!(app.popup.is_none());
}

#[test]
fn test_connection_created_closes_form_and_reloads() {
    let mut app = app();
    app.current_screen = CurrentScreen::Connections;
    app.handle_input(key(KeyCode::Char('n')));
    assert!(app.connection_form.is_some());

    let follow_up = app.update(Action::ConnectionCreated(Ok(CreatedConnection {
        id: ResourceId::Int(3),
        name: "GitHub".to_string(),
        message: "Connection created successfully".to_string(),
    })));

    assert!(matches!(follow_up, Some(Action::LoadConnections)));
    assert!(app.connection_form.is_none());
    assert_eq!(app.notifications.unread_count(), 1);
    assert_eq!(
        app.toasts.last().map(|t| t.message.as_str()),
        Some("Connection created successfully!")
    );
}

#[test]
fn test_connection_form_rejects_blank_name() {
    let mut app = app();
    app.current_screen = CurrentScreen::Connections;
    app.handle_input(key(KeyCode::Char('n')));

    assert!(app.handle_input(key(KeyCode::Enter)).is_none());
    assert!(app.connection_form.is_some(), "form stays open");
    assert!(app.toasts.iter().any(|t| t.message.contains("name is required")));
}

#[test]
fn test_settings_toggle_and_save() {
    let mut app = app();
    app.current_screen = CurrentScreen::Settings;
    let settings: Settings = serde_json::from_value(json!({
        "notifications": {"email": "True"}
    }))
    .expect("settings");
    let follow_up = app.update(Action::SettingsLoaded(Ok(settings)));
    assert!(matches!(follow_up, Some(Action::LoadApiKeys)));

    let (section, name, _) = app
        .settings
        .as_ref()
        .and_then(|s| s.entries().next().map(|(a, b, c)| (a.to_string(), b.to_string(), c.clone())))
        .expect("first entry");
    let before = app.settings.as_ref().and_then(|s| s.get_bool(&section, &name));

    app.handle_input(key(KeyCode::Char(' ')));
    let after = app.settings.as_ref().and_then(|s| s.get_bool(&section, &name));
    if before.is_some() {
        assert_eq!(after, before.map(|b| !b));
        assert!(app.settings_view.dirty);
    }

    assert!(matches!(
        app.handle_input(key(KeyCode::Char('s'))),
        Some(Action::SaveSettings(_))
    ));
}

#[test]
fn test_theme_cycle_persists() {
    let mut app = app();
    app.current_screen = CurrentScreen::Settings;
    let before = app.persisted.selected_theme;
    match app.handle_input(key(KeyCode::Char('c'))) {
        Some(Action::SavePreferences(state)) => assert_ne!(state.selected_theme, before),
        other => panic!("expected SavePreferences, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_load_error_is_shown_only_on_its_screen() {
    let mut app = app();
    app.current_screen = CurrentScreen::History;
    let err = ClientError::InvalidResponse("bad json".to_string());
    app.update(Action::HistoryLoaded(Err(Arc::new(err))));

    assert!(matches!(app.load_error, Some((CurrentScreen::History, _))));
    assert!(!app.loading);
    assert!(app.toasts.iter().any(|t| t.message.starts_with("Failed to load history")));

    app.update(Action::HistoryLoaded(Ok(sample_history(1))));
    assert!(app.load_error.is_none());
}

#[test]
fn test_persisted_state_captures_session() {
    let mut app = app();
    app.query.input.set_value("Get weather for London");
    app.history_view.per_page = 25;
    let state = app.persisted_state();
    assert_eq!(state.last_query.as_deref(), Some("Get weather for London"));
    assert_eq!(state.history_page_size, 25);
}
