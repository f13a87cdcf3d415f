//! Navigation guard
//!
//! Gates every route transition on the target route's authorization metadata
//! and the current session. Checks run in a fixed order and the first match
//! wins, so exactly one redirect-or-allow happens per navigation:
//!
//! 1. a token without a user record (the normal state right after a restart)
//!    triggers a user fetch before anything is decided;
//! 2. auth-required route, anonymous session: redirect to login, preserving
//!    the intended path in the `redirect` query parameter;
//! 3. guest-only route, authenticated session: redirect to home;
//! 4. admin-required route, non-admin session: redirect to home;
//! 5. otherwise the transition is allowed.

use std::sync::Arc;

use crate::router::{names, NavTarget, Router};
use crate::session::SessionStore;

/// Outcome of a guard evaluation
#[derive(Debug, Clone)]
pub enum GuardDecision {
    /// The transition may proceed
    Allow,
    /// The transition is replaced by a navigation to this target
    Redirect(NavTarget),
}

/// Pre-navigation authorization gate
pub struct NavigationGuard {
    session: Arc<SessionStore>,
    router: Arc<Router>,
}

impl NavigationGuard {
    pub fn new(session: Arc<SessionStore>, router: Arc<Router>) -> Self {
        Self { session, router }
    }

    /// Evaluate the guard for a target path without navigating
    pub async fn before_each(&self, to: &str) -> GuardDecision {
        // Refresh the user record when only the token survived a reload. A
        // failure here is already handled inside fetch_user (401 logs the
        // session out); the checks below run against whatever state resulted.
        if self.session.is_authenticated() && self.session.current_user().is_none() {
            self.session.fetch_user().await;
        }

        // Metadata is keyed by path alone; a query string on the target must
        // not change which route's flags apply.
        let path = to.split('?').next().unwrap_or(to);
        let meta = self
            .router
            .match_path(path)
            .map(|m| m.route.meta)
            .unwrap_or_default();

        if meta.requires_auth && !self.session.is_authenticated() {
            tracing::debug!(%to, "unauthenticated, redirecting to login");
            return GuardDecision::Redirect(
                NavTarget::name(names::LOGIN).with_query("redirect", to),
            );
        }
        if meta.guest_only && self.session.is_authenticated() {
            tracing::debug!(%to, "authenticated on guest-only route, redirecting home");
            return GuardDecision::Redirect(NavTarget::name(names::HOME));
        }
        if meta.requires_admin && !self.session.is_admin() {
            tracing::debug!(%to, "missing admin privilege, redirecting home");
            return GuardDecision::Redirect(NavTarget::name(names::HOME));
        }
        GuardDecision::Allow
    }

    /// Navigate to a path through the guard: either the requested transition
    /// or its replacement redirect is pushed, never both.
    pub async fn navigate(&self, to: &str) {
        let result = match self.before_each(to).await {
            GuardDecision::Allow => self.router.push(NavTarget::path(to)),
            GuardDecision::Redirect(target) => self.router.push(target),
        };
        if let Err(err) = result {
            tracing::warn!(%to, %err, "navigation failed");
        }
    }
}
