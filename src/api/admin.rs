//! Administration endpoints
//!
//! All of these require an admin session; a non-admin token gets a 403 back
//! as a validation error, and a stale token invalidates the session like any
//! other 401.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Event, User};

/// Events awaiting approval
pub async fn pending_events(client: &ApiClient) -> Result<Vec<Event>, ApiError> {
    client.get_json("/admin/events/pending").await
}

/// Approve a pending event
pub async fn approve_event(client: &ApiClient, event_id: i64) -> Result<Event, ApiError> {
    client
        .put_action(&format!("/admin/events/{}/approve", event_id))
        .await
}

/// Reject a pending event
pub async fn reject_event(client: &ApiClient, event_id: i64) -> Result<Event, ApiError> {
    client
        .put_action(&format!("/admin/events/{}/reject", event_id))
        .await
}

/// Cancel an approved event
pub async fn cancel_event(client: &ApiClient, event_id: i64) -> Result<Event, ApiError> {
    client
        .put_action(&format!("/admin/events/{}/cancel", event_id))
        .await
}

/// All registered users
pub async fn users(client: &ApiClient) -> Result<Vec<User>, ApiError> {
    client.get_json("/admin/users").await
}

/// Toggle a user's verified-organizer flag
pub async fn toggle_verified_organizer(client: &ApiClient, user_id: i64) -> Result<User, ApiError> {
    client
        .put_action(&format!("/admin/users/{}/verify-organizer", user_id))
        .await
}

/// Toggle a user's banned flag
pub async fn toggle_ban(client: &ApiClient, user_id: i64) -> Result<User, ApiError> {
    client
        .put_action(&format!("/admin/users/{}/ban", user_id))
        .await
}
