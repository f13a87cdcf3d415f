//! Typed endpoint surfaces over [`crate::client::ApiClient`]
//!
//! Thin request/response wrappers grouped the way the service groups its
//! resources. All of them go through the shared client, so every call carries
//! the session's bearer credential and participates in 401 invalidation.

pub mod admin;
pub mod auth;
pub mod events;
