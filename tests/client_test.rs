//! HTTP client integration tests
//!
//! Bearer attachment, 401 interception, error mapping, and the typed
//! endpoint surfaces.

mod common;

use common::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use eventhub_client::api;
use eventhub_client::error::ApiError;
use eventhub_client::router::names;
use eventhub_client::types::{EventQuery, RsvpRequest};

#[tokio::test]
async fn bearer_token_is_attached_to_requests() {
    let app = TestApp::authenticated(&sample_user()).await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user()))
        .expect(1)
        .mount(&app.server)
        .await;

    let user = api::auth::me(app.session.client()).await.unwrap();
    assert_eq!(user.username, "a");
}

#[tokio::test]
async fn anonymous_requests_carry_no_credential() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;

    api::events::list(app.session.client(), &EventQuery::default())
        .await
        .unwrap();

    let requests = app.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn unauthorized_response_invalidates_and_propagates() {
    let app = TestApp::authenticated(&sample_user()).await;
    Mock::given(method("GET"))
        .and(path("/events/my-rsvps"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
        .mount(&app.server)
        .await;

    let result = api::events::my_rsvps(app.session.client()).await;

    // the error reaches the caller unchanged
    match result {
        Err(ApiError::Unauthorized { message }) => assert_eq!(message, "expired"),
        other => panic!("expected Unauthorized, got {:?}", other.map(|_| ())),
    }
    // and the session was invalidated as a side effect
    assert!(!app.session.is_authenticated());
    assert_eq!(app.router.current().name, names::LOGIN);
}

#[tokio::test]
async fn four_xx_maps_to_validation_with_server_message() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/events/5/rsvp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Event is at capacity"
        })))
        .mount(&app.server)
        .await;

    let result = api::events::rsvp(
        app.session.client(),
        5,
        &RsvpRequest {
            num_people: 2,
            ..Default::default()
        },
    )
    .await;

    match result {
        Err(ApiError::Validation { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Event is at capacity");
        }
        other => panic!("expected Validation, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn five_xx_maps_to_server_error() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/events/9"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.server)
        .await;

    let result = api::events::get(app.session.client(), 9).await;
    match result {
        Err(ApiError::Server { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected Server, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn transport_failure_maps_to_network_error() {
    let app = spawn_app().await;
    let uri = app.server.uri();
    drop(app.server);

    let client = eventhub_client::client::ApiClient::anonymous(
        eventhub_client::config::Config::with_api_url(uri).unwrap(),
    );
    let result: Result<serde_json::Value, _> = client.get_json("/events").await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn event_listing_sends_query_parameters() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("category", "Sports Matches"))
        .and(query_param("page", "2"))
        .and(query_param("date_from", "2026-09-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&app.server)
        .await;

    let events = api::events::list(
        app.session.client(),
        &EventQuery {
            category: Some("Sports Matches".to_string()),
            date_from: chrono::NaiveDate::from_ymd_opt(2026, 9, 1),
            page: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn admin_actions_use_put_without_a_body() {
    let app = TestApp::authenticated(&admin_user()).await;
    Mock::given(method("PUT"))
        .and(path("/admin/events/3/approve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "title": "Street fair",
            "category": "Small Festivals",
            "start_datetime": "2026-09-01T10:00:00Z",
            "location_address": "Main St",
            "status": "APPROVED",
            "organizer_id": 2
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let event = api::admin::approve_event(app.session.client(), 3)
        .await
        .unwrap();
    assert_eq!(event.status, eventhub_client::types::EventStatus::Approved);
}

#[tokio::test]
async fn guest_rsvp_cancellation_passes_the_email() {
    let app = spawn_app().await;
    Mock::given(method("DELETE"))
        .and(path("/events/4/rsvp"))
        .and(query_param("guest_email", "g@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "cancelled" })))
        .expect(1)
        .mount(&app.server)
        .await;

    api::events::cancel_rsvp(app.session.client(), 4, Some("g@example.com"))
        .await
        .unwrap();
}
