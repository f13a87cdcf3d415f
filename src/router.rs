//! Route table and navigation
//!
//! The router holds the static route table with per-route authorization
//! metadata, tracks the current location, and records navigation history.
//! Navigation is by raw path or by route name with parameters. Pushing the
//! location the router is already at is a no-op, so repeated redirects to the
//! same place (for example several 401 responses racing to the login route)
//! leave a single history entry.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Well-known route names in the default table
pub mod names {
    pub const HOME: &str = "Home";
    pub const LOGIN: &str = "Login";
    pub const REGISTER: &str = "Register";
    pub const CREATE_EVENT: &str = "CreateEvent";
    pub const EVENT_DETAIL: &str = "EventDetail";
    pub const EDIT_EVENT: &str = "EditEvent";
    pub const MY_ORGANIZED_EVENTS: &str = "MyOrganizedEvents";
    pub const MY_RSVPS: &str = "MyRsvps";
    pub const ADMIN_DASHBOARD: &str = "AdminDashboard";
    pub const ADMIN_PENDING_EVENTS: &str = "AdminPendingEvents";
    pub const ADMIN_USERS: &str = "AdminUsers";
    pub const NOT_FOUND: &str = "NotFound";
}

/// Static per-route authorization metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub guest_only: bool,
    pub requires_admin: bool,
}

impl RouteMeta {
    /// Route reachable only with an authenticated session
    pub const fn auth() -> Self {
        Self {
            requires_auth: true,
            guest_only: false,
            requires_admin: false,
        }
    }

    /// Route reachable only without an authenticated session
    pub const fn guest() -> Self {
        Self {
            requires_auth: false,
            guest_only: true,
            requires_admin: false,
        }
    }

    /// Route reachable only by administrators
    pub const fn admin() -> Self {
        Self {
            requires_auth: true,
            guest_only: false,
            requires_admin: true,
        }
    }
}

/// A route definition. The path is a pattern where `:name` segments match any
/// single segment and `*` matches any path.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

impl Route {
    pub const fn new(path: &'static str, name: &'static str, meta: RouteMeta) -> Self {
        Self { path, name, meta }
    }
}

/// The default route table, mirroring the EventHub frontend
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::new("/", names::HOME, RouteMeta::default()),
        Route::new("/login", names::LOGIN, RouteMeta::guest()),
        Route::new("/register", names::REGISTER, RouteMeta::guest()),
        Route::new("/event/new", names::CREATE_EVENT, RouteMeta::auth()),
        Route::new("/event/:id", names::EVENT_DETAIL, RouteMeta::default()),
        Route::new("/event/:id/edit", names::EDIT_EVENT, RouteMeta::auth()),
        Route::new("/my-events", names::MY_ORGANIZED_EVENTS, RouteMeta::auth()),
        Route::new("/my-rsvps", names::MY_RSVPS, RouteMeta::auth()),
        Route::new("/admin", names::ADMIN_DASHBOARD, RouteMeta::admin()),
        Route::new(
            "/admin/pending-events",
            names::ADMIN_PENDING_EVENTS,
            RouteMeta::admin(),
        ),
        Route::new("/admin/users", names::ADMIN_USERS, RouteMeta::admin()),
        Route::new("*", names::NOT_FOUND, RouteMeta::default()),
    ]
}

/// A resolved position in the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    /// The path with its query string, as a guard would preserve it for a
    /// post-login redirect. Query values have their structural characters
    /// percent-encoded so a value containing `&` or `=` survives the round
    /// trip through [`NavTarget::path`].
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_query_value(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

/// Where to navigate: a raw path or a named route with parameters
#[derive(Debug, Clone)]
pub struct NavTarget {
    kind: TargetKind,
    query: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
enum TargetKind {
    Path(String),
    Name {
        name: String,
        params: HashMap<String, String>,
    },
}

impl NavTarget {
    /// Target a raw path, optionally carrying `?key=value` pairs.
    /// Percent-encoded query values are decoded.
    pub fn path(path: impl Into<String>) -> Self {
        let raw = path.into();
        let (path, query) = match raw.split_once('?') {
            Some((p, q)) => {
                let query = url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
                (p.to_string(), query)
            }
            None => (raw, Vec::new()),
        };
        Self {
            kind: TargetKind::Path(path),
            query,
        }
    }

    /// Target a route by name
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Name {
                name: name.into(),
                params: HashMap::new(),
            },
            query: Vec::new(),
        }
    }

    /// Supply a value for a `:param` segment of the target route's pattern
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let TargetKind::Name { params, .. } = &mut self.kind {
            params.insert(key.into(), value.into());
        }
        self
    }

    /// Append a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Navigation errors
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("no route named '{0}'")]
    UnknownRoute(String),
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },
}

/// A route matched against a concrete path
#[derive(Debug)]
pub struct Matched<'a> {
    pub route: &'a Route,
    pub params: HashMap<String, String>,
}

/// Route table plus current location and history
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    current: RwLock<Location>,
    history: RwLock<Vec<Location>>,
}

impl Router {
    /// Create a router over an explicit route table, positioned at `/`
    pub fn new(routes: Vec<Route>) -> Self {
        let start = Location {
            name: routes
                .iter()
                .find(|r| r.path == "/")
                .map(|r| r.name)
                .unwrap_or(names::NOT_FOUND),
            path: "/".to_string(),
            query: Vec::new(),
        };
        Self {
            routes,
            current: RwLock::new(start),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Create a router over the default EventHub route table
    pub fn with_default_routes() -> Self {
        Self::new(default_routes())
    }

    /// Match a concrete path against the table, first match wins
    pub fn match_path(&self, path: &str) -> Option<Matched<'_>> {
        self.routes.iter().find_map(|route| {
            match_pattern(route.path, path).map(|params| Matched { route, params })
        })
    }

    /// Resolve a target to a concrete location
    pub fn resolve(&self, target: &NavTarget) -> Result<Location, RouterError> {
        match &target.kind {
            TargetKind::Path(path) => {
                let name = self
                    .match_path(path)
                    .map(|m| m.route.name)
                    .unwrap_or(names::NOT_FOUND);
                Ok(Location {
                    name,
                    path: path.clone(),
                    query: target.query.clone(),
                })
            }
            TargetKind::Name { name, params } => {
                let route = self
                    .routes
                    .iter()
                    .find(|r| r.name == name.as_str())
                    .ok_or_else(|| RouterError::UnknownRoute(name.clone()))?;
                let path = expand_pattern(route.path, params).map_err(|param| {
                    RouterError::MissingParam {
                        route: name.clone(),
                        param,
                    }
                })?;
                Ok(Location {
                    name: route.name,
                    path,
                    query: target.query.clone(),
                })
            }
        }
    }

    /// Navigate to a target. Returns `false` without touching history when the
    /// target is the location the router is already at.
    pub fn push(&self, target: NavTarget) -> Result<bool, RouterError> {
        let location = self.resolve(&target)?;
        {
            let current = self.read_current();
            if current.full_path() == location.full_path() {
                return Ok(false);
            }
        }
        tracing::debug!(to = %location.full_path(), "navigating");
        *self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = location.clone();
        self.history
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(location);
        Ok(true)
    }

    /// The location the router is currently at
    pub fn current(&self) -> Location {
        self.read_current().clone()
    }

    /// All locations navigated to, oldest first
    pub fn history(&self) -> Vec<Location> {
        self.history
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn read_current(&self) -> std::sync::RwLockReadGuard<'_, Location> {
        self.current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Minimally encode a query-parameter value: only the characters that are
/// structurally significant inside a query string (`&`, `=`, `#`, `+`) and
/// the escape character (`%`) are percent-encoded, keeping redirect targets
/// like `/event/5` readable. The `url::form_urlencoded::parse` decoder in
/// [`NavTarget::path`] treats `+` as a space, so a literal `+` is encoded as
/// `%2B` to avoid the ambiguity.
fn encode_query_value(s: &str) -> Cow<'_, str> {
    if !s.contains(['%', '&', '=', '#', '+']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '#' => out.push_str("%23"),
            '+' => out.push_str("%2B"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Match `path` against `pattern`, collecting `:param` captures
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    if pattern == "*" {
        return Some(HashMap::new());
    }
    let pattern_segments: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let path_segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }
    let mut params = HashMap::new();
    for (pat, seg) in pattern_segments.iter().zip(&path_segments) {
        if let Some(param) = pat.strip_prefix(':') {
            if seg.is_empty() {
                return None;
            }
            params.insert(param.to_string(), (*seg).to_string());
        } else if pat != seg {
            return None;
        }
    }
    Some(params)
}

/// Expand a pattern's `:param` segments from the supplied parameters, failing
/// with the first missing parameter name
fn expand_pattern(pattern: &str, params: &HashMap<String, String>) -> Result<String, String> {
    if !pattern.contains(':') {
        return Ok(pattern.to_string());
    }
    let mut segments = Vec::new();
    for segment in pattern.split('/') {
        if let Some(param) = segment.strip_prefix(':') {
            match params.get(param) {
                Some(value) => segments.push(value.clone()),
                None => return Err(param.to_string()),
            }
        } else {
            segments.push(segment.to_string());
        }
    }
    Ok(segments.join("/"))
}
