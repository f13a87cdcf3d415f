//! Shared test harness
//!
//! Assembles a session store, router, and in-memory storage against a
//! wiremock server, plus mounters for the auth endpoints.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eventhub_client::config::Config;
use eventhub_client::guard::NavigationGuard;
use eventhub_client::router::Router;
use eventhub_client::session::SessionStore;
use eventhub_client::storage::{MemoryStorage, SessionStorage, TOKEN_KEY, USER_KEY};
use eventhub_client::types::User;

/// Everything a test needs to drive the session core
pub struct TestApp {
    pub server: MockServer,
    pub storage: Arc<MemoryStorage>,
    pub router: Arc<Router>,
    pub session: Arc<SessionStore>,
}

/// Start a mock server and build a fresh session store against it
pub async fn spawn_app() -> TestApp {
    // An unpooled server: wiremock's pooled `MockServer::start()` keeps the
    // listener open after drop, so tests that drop the server to simulate an
    // unreachable host need an exclusive one.
    let server = MockServer::builder().start().await;
    let storage = Arc::new(MemoryStorage::new());
    spawn_app_with_storage(server, storage).await
}

/// Build the store over pre-seeded storage, as after an application restart
pub async fn spawn_app_with_storage(server: MockServer, storage: Arc<MemoryStorage>) -> TestApp {
    let router = Arc::new(Router::with_default_routes());
    let config = Config::with_api_url(server.uri()).unwrap();
    let session = Arc::new(SessionStore::new(config, storage.clone(), router.clone()));
    TestApp {
        server,
        storage,
        router,
        session,
    }
}

/// Seed only a token, as after a restart that lost the user record
pub async fn spawn_app_with_token(token: &str) -> TestApp {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, token);
    spawn_app_with_storage(server, storage).await
}

/// Session store pointed at an address nothing listens on
pub async fn unreachable_session() -> (Arc<SessionStore>, Arc<Router>) {
    // Unpooled for the same reason as `spawn_app`: drop must close the port
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);
    let router = Arc::new(Router::with_default_routes());
    let session = Arc::new(SessionStore::new(
        Config::with_api_url(uri).unwrap(),
        Arc::new(MemoryStorage::new()),
        router.clone(),
    ));
    (session, router)
}

impl TestApp {
    pub fn guard(&self) -> NavigationGuard {
        NavigationGuard::new(self.session.clone(), self.router.clone())
    }

    /// Seed an authenticated session directly into storage and rebuild the
    /// store so it rehydrates
    pub async fn authenticated(user: &User) -> TestApp {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "T1");
        storage.set(USER_KEY, &serde_json::to_string(user).unwrap());
        spawn_app_with_storage(server, storage).await
    }

    /// Count history entries for a given route name
    pub fn visits_to(&self, name: &str) -> usize {
        self.router
            .history()
            .iter()
            .filter(|l| l.name == name)
            .count()
    }
}

pub fn sample_user() -> User {
    User {
        id: 1,
        username: "a".to_string(),
        email: "a@b.com".to_string(),
        phone_number: None,
        is_admin: false,
        is_verified_organizer: false,
    }
}

pub fn admin_user() -> User {
    User {
        is_admin: true,
        ..sample_user()
    }
}

/// `POST /auth/login` succeeding with the given token
pub async fn mount_login_ok(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": token })))
        .mount(server)
        .await;
}

/// `POST /auth/login` failing with a server message
pub async fn mount_login_err(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
        .mount(server)
        .await;
}

/// `POST /auth/register` succeeding with the given token
pub async fn mount_register_ok(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": token })))
        .mount(server)
        .await;
}

/// `GET /auth/me` returning the given user
pub async fn mount_me_ok(server: &MockServer, user: &User) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user))
        .mount(server)
        .await;
}

/// `GET /auth/me` rejecting the credential
pub async fn mount_me_unauthorized(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "token expired" })),
        )
        .mount(server)
        .await;
}
