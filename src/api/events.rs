//! Event and RSVP endpoints

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Event, EventInput, EventQuery, Rsvp, RsvpRequest};

/// List approved events, filtered and paginated
pub async fn list(client: &ApiClient, query: &EventQuery) -> Result<Vec<Event>, ApiError> {
    client
        .get_json_with_query("/events", &query.to_query_pairs())
        .await
}

/// Fetch a single event
pub async fn get(client: &ApiClient, event_id: i64) -> Result<Event, ApiError> {
    client.get_json(&format!("/events/{}", event_id)).await
}

/// Create an event. Requires an authenticated session; the event starts in
/// pending status until an administrator approves it.
pub async fn create(client: &ApiClient, event: &EventInput) -> Result<Event, ApiError> {
    client.post_json("/events", event).await
}

/// Update an event the session's user organizes
pub async fn update(
    client: &ApiClient,
    event_id: i64,
    event: &EventInput,
) -> Result<Event, ApiError> {
    client.put_json(&format!("/events/{}", event_id), event).await
}

/// Delete an event the session's user organizes
pub async fn delete(client: &ApiClient, event_id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/events/{}", event_id)).await
}

/// RSVP to an event, as the session's user or as a guest
pub async fn rsvp(client: &ApiClient, event_id: i64, rsvp: &RsvpRequest) -> Result<Rsvp, ApiError> {
    client
        .post_json(&format!("/events/{}/rsvp", event_id), rsvp)
        .await
}

/// Cancel an RSVP. Pass the guest email for RSVPs made without an account.
pub async fn cancel_rsvp(
    client: &ApiClient,
    event_id: i64,
    guest_email: Option<&str>,
) -> Result<(), ApiError> {
    let path = format!("/events/{}/rsvp", event_id);
    match guest_email {
        Some(email) => {
            client
                .delete_with_query(&path, &[("guest_email", email.to_string())])
                .await
        }
        None => client.delete(&path).await,
    }
}

/// List RSVPs for an event. Organizer or admin only.
pub async fn rsvps(client: &ApiClient, event_id: i64) -> Result<Vec<Rsvp>, ApiError> {
    client.get_json(&format!("/events/{}/rsvps", event_id)).await
}

/// Events organized by the session's user
pub async fn my_organized(client: &ApiClient) -> Result<Vec<Event>, ApiError> {
    client.get_json("/events/my-organized-events").await
}

/// Events the session's user has RSVP'd to
pub async fn my_rsvps(client: &ApiClient) -> Result<Vec<Rsvp>, ApiError> {
    client.get_json("/events/my-rsvps").await
}
