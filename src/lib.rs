//! EventHub Client - Main Library
//!
//! Client library for the EventHub event-management service: users browse and
//! search events, RSVP, organizers create events, and administrators approve
//! them. This crate is the state and integration core a UI drives; it owns
//! the authenticated session, wraps the HTTP surface, and gates navigation.
//!
//! # Overview
//!
//! - **Session lifecycle**: token acquisition via login/register, persistence
//!   to a key/value store, rehydration on restart, invalidation when the
//!   server rejects the credential
//! - **HTTP client**: bearer-credential attachment on every request and
//!   global 401 interception
//! - **Navigation guard**: per-route authorization metadata checked before
//!   every transition
//! - **Typed endpoints**: auth, event/RSVP, and admin resources
//!
//! # Module Structure
//!
//! - **`session`** - the session store (token, user record, error, loading)
//! - **`client`** - reqwest wrapper with the [`client::AuthBridge`] seam
//! - **`guard`** - pre-navigation authorization checks
//! - **`router`** - route table, navigation by path or name, history
//! - **`storage`** - session persistence behind [`storage::SessionStorage`]
//! - **`api`** - typed endpoint surfaces
//! - **`notify`** - transient notification queue
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use eventhub_client::config::Config;
//! use eventhub_client::guard::NavigationGuard;
//! use eventhub_client::router::Router;
//! use eventhub_client::session::SessionStore;
//! use eventhub_client::storage::FileStorage;
//! use eventhub_client::types::LoginRequest;
//!
//! # async fn example() {
//! let router = Arc::new(Router::with_default_routes());
//! let storage = Arc::new(FileStorage::open_default());
//! let session = Arc::new(SessionStore::new(Config::new(), storage, router.clone()));
//! let guard = NavigationGuard::new(session.clone(), router.clone());
//!
//! session
//!     .login(LoginRequest {
//!         email_or_username: "a@b.com".to_string(),
//!         password: "secret".to_string(),
//!     })
//!     .await;
//! guard.navigate("/my-events").await;
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The session store and router use interior mutability and are shared behind
//! `Arc`. Locks are held only across synchronous sections, never across an
//! await, so interleaved operations stay consistent: a user record is only
//! ever present alongside its token.
//!
//! # Error Handling
//!
//! Endpoint surfaces return `Result<T, error::ApiError>`. Session store
//! actions absorb their errors into session state; see [`session`].

/// Typed endpoint surfaces
pub mod api;

/// HTTP client wrapper
pub mod client;

/// Client configuration
pub mod config;

/// API error taxonomy
pub mod error;

/// Navigation guard
pub mod guard;

/// Transient notifications
pub mod notify;

/// Route table and navigation
pub mod router;

/// Session store
pub mod session;

/// Session persistence
pub mod storage;

/// Wire types
pub mod types;

pub use client::{ApiClient, AuthBridge};
pub use config::Config;
pub use error::ApiError;
pub use guard::{GuardDecision, NavigationGuard};
pub use router::{NavTarget, Route, RouteMeta, Router};
pub use session::{SessionState, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
