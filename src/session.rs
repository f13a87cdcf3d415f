//! Session store
//!
//! Owns the authenticated-session state: the bearer token, the current user
//! record, the last operation's error message, and the advisory loading flag.
//! State is written through to a [`SessionStorage`] so a restarted client can
//! resume, and cleared from both places on logout or when the server rejects
//! the credential.
//!
//! Actions never return their errors. A failed login or register leaves a
//! human-readable message in [`SessionState::error`] and otherwise touches
//! nothing; callers observe outcomes through the state only.
//!
//! # Concurrency
//!
//! Operations suspend at their network calls and the state lock is never held
//! across an await. The `loading` flag is advisory. Nothing serializes two
//! interleaved operations, but every interleaving preserves the invariant
//! that a user record is only ever present alongside a token.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api;
use crate::client::{ApiClient, AuthBridge};
use crate::config::Config;
use crate::error::ApiError;
use crate::router::{names, NavTarget, Router};
use crate::storage::{SessionStorage, TOKEN_KEY, USER_KEY};
use crate::types::{LoginRequest, RegisterRequest, User};

const LOGIN_FALLBACK: &str = "Login failed. Please try again.";
const REGISTER_FALLBACK: &str = "Registration failed. Please try again.";
const FETCH_USER_FALLBACK: &str = "Could not fetch user details.";

/// The session's observable state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Bearer credential; present exactly when the session is authenticated
    pub token: Option<String>,
    /// Current user record, only ever present alongside a token
    pub user: Option<User>,
    /// Last operation's failure message
    pub error: Option<String>,
    /// True while an auth operation is in flight. Advisory only.
    pub loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn is_verified_organizer(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_verified_organizer)
    }
}

/// Shared session context: state plus its persistence and navigation
/// collaborators. This is the piece the HTTP client sees, through the narrow
/// [`AuthBridge`] surface.
struct SessionInner {
    state: RwLock<SessionState>,
    storage: Arc<dyn SessionStorage>,
    router: Arc<Router>,
}

impl SessionInner {
    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_token(&self, token: String) {
        self.write().token = Some(token.clone());
        self.storage.set(TOKEN_KEY, &token);
    }

    fn set_user(&self, user: User) {
        {
            let mut state = self.write();
            // The session may have been invalidated while the fetch was in
            // flight; a user record must never outlive its token.
            if state.token.is_none() {
                return;
            }
            state.user = Some(user.clone());
        }
        match serde_json::to_string(&user) {
            Ok(raw) => self.storage.set(USER_KEY, &raw),
            Err(err) => tracing::warn!(%err, "failed to serialize user for storage"),
        }
    }

    fn set_error(&self, message: impl Into<String>) {
        self.write().error = Some(message.into());
    }

    /// Clear token and user everywhere and return to the login route.
    /// Idempotent; safe to call with no active session.
    fn invalidate(&self) {
        {
            let mut state = self.write();
            state.token = None;
            state.user = None;
        }
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        if let Err(err) = self.router.push(NavTarget::name(names::LOGIN)) {
            tracing::warn!(%err, "could not navigate to login route");
        }
    }
}

impl AuthBridge for SessionInner {
    fn bearer_token(&self) -> Option<String> {
        self.read().token.clone()
    }

    fn on_unauthorized(&self) {
        self.invalidate();
    }
}

/// The session store. Cheap to share behind an `Arc`; all methods take
/// `&self`.
pub struct SessionStore {
    inner: Arc<SessionInner>,
    client: ApiClient,
}

impl SessionStore {
    /// Build a store, rehydrating any persisted session.
    ///
    /// A stored user record without a stored token is stale and is discarded,
    /// as is a record that no longer parses. A token without a user record is
    /// the normal post-restart state; the user is re-fetched by the first
    /// navigation (see [`crate::guard::NavigationGuard`]).
    pub fn new(config: Config, storage: Arc<dyn SessionStorage>, router: Arc<Router>) -> Self {
        let token = storage.get(TOKEN_KEY);
        let user = match (&token, storage.get(USER_KEY)) {
            (Some(_), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(%err, "discarding unreadable stored user record");
                    storage.remove(USER_KEY);
                    None
                }
            },
            (None, Some(_)) => {
                storage.remove(USER_KEY);
                None
            }
            _ => None,
        };
        let inner = Arc::new(SessionInner {
            state: RwLock::new(SessionState {
                token,
                user,
                error: None,
                loading: false,
            }),
            storage,
            router,
        });
        let client = ApiClient::new(config, inner.clone() as Arc<dyn AuthBridge>);
        Self { inner, client }
    }

    /// The HTTP client bound to this session. Endpoint surfaces share it so
    /// every request carries the session credential and 401 handling.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.inner.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.inner.read().is_admin()
    }

    pub fn is_verified_organizer(&self) -> bool {
        self.inner.read().is_verified_organizer()
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.read().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().loading
    }

    pub fn clear_error(&self) {
        self.inner.write().error = None;
    }

    /// Authenticate against the service.
    ///
    /// On success the token is stored and persisted, the user record is
    /// fetched, and only then does navigation to the home route occur. On
    /// failure the server's message (or a generic fallback) lands in `error`
    /// and nothing else changes.
    pub async fn login(&self, credentials: LoginRequest) {
        self.begin();
        match api::auth::login(&self.client, &credentials).await {
            Ok(auth) => {
                self.inner.set_token(auth.access_token);
                self.fetch_user().await;
                self.push_home();
            }
            Err(err) => {
                tracing::error!(%err, "login failed");
                self.store_failure(&err, LOGIN_FALLBACK);
            }
        }
        self.finish();
    }

    /// Create an account. Same contract as [`SessionStore::login`].
    pub async fn register(&self, profile: RegisterRequest) {
        self.begin();
        match api::auth::register(&self.client, &profile).await {
            Ok(auth) => {
                self.inner.set_token(auth.access_token);
                self.fetch_user().await;
                self.push_home();
            }
            Err(err) => {
                tracing::error!(%err, "registration failed");
                self.store_failure(&err, REGISTER_FALLBACK);
            }
        }
        self.finish();
    }

    /// Fetch and persist the current user record. No-op without a token. A
    /// 401 here means the stored token is no longer valid, so the session is
    /// logged out.
    pub async fn fetch_user(&self) {
        if !self.is_authenticated() {
            return;
        }
        self.inner.write().loading = true;
        match api::auth::me(&self.client).await {
            Ok(user) => self.inner.set_user(user),
            Err(err) => {
                tracing::error!(%err, "failed to fetch current user");
                if err.is_unauthorized() {
                    self.logout();
                }
                self.inner.set_error(FETCH_USER_FALLBACK);
            }
        }
        self.inner.write().loading = false;
    }

    /// Clear the session in memory and storage and return to the login
    /// route. Idempotent.
    pub fn logout(&self) {
        self.inner.invalidate();
    }

    fn begin(&self) {
        let mut state = self.inner.write();
        state.loading = true;
        state.error = None;
    }

    fn finish(&self) {
        self.inner.write().loading = false;
    }

    fn store_failure(&self, err: &ApiError, fallback: &str) {
        let message = err.server_message().unwrap_or(fallback).to_string();
        self.inner.set_error(message);
    }

    fn push_home(&self) {
        if let Err(err) = self.inner.router.push(NavTarget::name(names::HOME)) {
            tracing::warn!(%err, "could not navigate to home route");
        }
    }
}
