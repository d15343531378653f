//! End-to-end scenarios: the real HTTP client against a mock backend

use roster_client::{ClientConfig, UsersClient};
use roster_core::types::{DraftField, UserId};
use roster_view::{ViewConfig, ViewEvent, ViewRuntime, EMPTY_MESSAGE};
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn runtime_for(base_url: impl Into<String>) -> ViewRuntime<UsersClient> {
    let client = UsersClient::new(ClientConfig::new(base_url)).unwrap();
    ViewRuntime::new(Arc::new(client), ViewConfig::default())
}

#[tokio::test]
async fn test_single_user_is_listed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 1, "name": "Ana"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut runtime = runtime_for(mock_server.uri());
    runtime.mount().unwrap();
    assert!(runtime.render().loading);
    runtime.settle().await;

    let render = runtime.render();
    assert_eq!(render.list.rows().len(), 1);
    assert_eq!(render.list.rows()[0].label, "Ana");
    assert_eq!(render.list.keys(), vec![&UserId::from(1)]);
    assert!(render.read_error.is_none());
}

#[tokio::test]
async fn test_empty_collection_shows_empty_state() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let mut runtime = runtime_for(mock_server.uri());
    runtime.mount().unwrap();
    runtime.settle().await;

    let render = runtime.render();
    assert!(render.list.is_empty_state());
    assert!(render.to_string().contains(EMPTY_MESSAGE));
}

#[tokio::test]
async fn test_created_user_joins_the_list() {
    let mock_server = MockServer::start().await;

    // First read sees only Ana; reads after the creation see Bo too
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 1, "name": "Ana"}])),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Ana"},
            {"id": 2, "name": "Bo"}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .and(body_json(serde_json::json!({"name": "Bo"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 2, "name": "Bo"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut runtime = runtime_for(mock_server.uri());
    runtime.mount().unwrap();
    runtime.settle().await;
    assert_eq!(runtime.render().list.rows().len(), 1);

    runtime.edit(DraftField::Name, "Bo").unwrap();
    runtime.submit().unwrap();
    let events = runtime.settle().await;

    assert!(events.iter().any(|e| matches!(e, ViewEvent::UserCreated { user: Some(_) })));
    let render = runtime.render();
    let labels: Vec<&str> = render.list.rows().iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Ana", "Bo"]);
    assert_eq!(
        render.list.keys(),
        vec![&UserId::from(1), &UserId::from(2)]
    );
    assert_eq!(render.form.name, "");
}

#[tokio::test]
async fn test_transport_error_is_visible() {
    let mut runtime = runtime_for("http://127.0.0.1:9");
    runtime.mount().unwrap();

    let events = runtime.settle().await;

    assert!(matches!(events.as_slice(), [ViewEvent::ReadFailed { .. }]));
    let render = runtime.render();
    assert!(render.list.is_empty_state());
    let message = render.read_error.clone().expect("visible error");
    assert!(message.starts_with("Could not load users:"));
    assert!(render.to_string().contains(&message));
}

#[tokio::test]
async fn test_server_error_keeps_previous_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 1, "name": "Ana"}])),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
        .mount(&mock_server)
        .await;

    let mut runtime = runtime_for(mock_server.uri());
    runtime.mount().unwrap();
    runtime.settle().await;
    runtime.reload().unwrap();
    runtime.settle().await;

    let render = runtime.render();
    assert_eq!(render.list.rows()[0].label, "Ana");
    assert_eq!(
        render.read_error.as_deref(),
        Some("Could not load users: Server error (500): database is down")
    );
}

#[tokio::test]
async fn test_server_side_validation_lands_on_field() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "detail": [{"loc": ["body", "email"], "msg": "email already registered"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut runtime = runtime_for(mock_server.uri());
    runtime.mount().unwrap();
    runtime.settle().await;
    runtime.edit(DraftField::Name, "Bo").unwrap();
    runtime.edit(DraftField::Email, "bo@example.com").unwrap();
    runtime.submit().unwrap();
    runtime.settle().await;

    let render = runtime.render();
    assert_eq!(render.form.field_errors.len(), 1);
    assert_eq!(render.form.field_errors[0].field, DraftField::Email);
    assert_eq!(render.form.email, "bo@example.com");
    assert!(render.form.error.is_some());
}
