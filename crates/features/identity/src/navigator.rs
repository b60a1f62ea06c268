//! Guarded navigation with last-navigation-wins semantics.
//!
//! Every [`Navigator::navigate`] call takes a ticket from a generation counter. The guard may
//! await a profile refresh on the first protected navigation of the process; when a newer
//! navigation (or a forced login after an expired token) has started in the meantime, the older
//! one reports [`Navigation::Superseded`] and leaves the current location alone.

use crate::error::IdentityError;
use crate::guard::{self, Outcome};
use crate::routes::RouteTable;
use crate::session::SessionState;
use crate::state::AuthState;
use async_trait::async_trait;
use parking_lot::RwLock;
use resbook_domain::constants::ROUTE_LOGIN;
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{OnceCell, broadcast};
use tracing::{debug, info, warn};

const NOTICE_CAPACITY: usize = 16;

/// Fetches the latest profile into the session.
#[async_trait]
pub trait ProfileSource: Debug + Send + Sync {
    async fn refresh_profile(&self) -> Result<AuthState, IdentityError>;
}

/// Where the client currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Full path including the query string.
    pub path: String,
    pub title: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The requested page was entered.
    Arrived(Location),
    /// The guard sent the client elsewhere.
    Redirected { outcome: Outcome, location: Location, notice: Option<&'static str> },
    /// A newer navigation finished first; nothing changed.
    Superseded,
}

impl Navigation {
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        match self {
            Self::Arrived(location) | Self::Redirected { location, .. } => Some(location),
            Self::Superseded => None,
        }
    }
}

#[resbook_derive::shared_handle]
pub struct Navigator {
    session: SessionState,
    routes: RouteTable,
    profile_source: Option<Arc<dyn ProfileSource>>,
    generation: AtomicU64,
    current: RwLock<Option<Location>>,
    profile_refresh: OnceCell<()>,
    notices: broadcast::Sender<String>,
}

impl Navigator {
    #[must_use]
    pub fn with_routes(
        session: SessionState,
        routes: RouteTable,
        profile_source: Option<Arc<dyn ProfileSource>>,
    ) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self::new(NavigatorInner {
            session,
            routes,
            profile_source,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
            profile_refresh: OnceCell::new(),
            notices,
        })
    }

    #[must_use]
    pub fn current(&self) -> Option<Location> {
        self.current.read().clone()
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Receiver for user-facing notices (guard redirects, expired sessions).
    #[must_use]
    pub fn notices(&self) -> broadcast::Receiver<String> {
        self.notices.subscribe()
    }

    pub fn notify(&self, message: impl Into<String>) {
        let _ = self.notices.send(message.into());
    }

    /// Navigates to `path` through the guard.
    ///
    /// The first protected navigation of a logged-in process refreshes the profile before the
    /// guard decides, so a stale persisted audit status is not trusted. Protected navigations
    /// started while that refresh is pending wait for the same fetch. A failed refresh is logged
    /// and the persisted profile is used.
    pub async fn navigate(&self, path: &str) -> Navigation {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let path = self.routes.canonical(path);
        let resolved = self.routes.resolve(&path);
        let requirement = resolved.requirement();

        if requirement.requires_auth() && self.session.is_logged_in() {
            self.profile_refresh.get_or_init(|| self.refresh_before_guard()).await;
        }

        if !self.is_current(ticket) {
            debug!(%path, "Navigation superseded before the guard ran");
            return Navigation::Superseded;
        }

        let state = self.session.auth_state();
        let outcome = guard::decide(requirement, state, &path);
        let notice = guard::notice(state, &outcome);
        let location = match outcome.target() {
            None => Location { path, title: resolved.title() },
            Some(target) => {
                let title = self.routes.resolve(&target).title();
                Location { path: target, title }
            },
        };

        {
            let mut current = self.current.write();
            if !self.is_current(ticket) {
                debug!(path = %location.path, "Navigation superseded");
                return Navigation::Superseded;
            }
            *current = Some(location.clone());
        }

        if outcome.is_allowed() {
            debug!(path = %location.path, "Navigated");
            return Navigation::Arrived(location);
        }

        info!(%state, target = %location.path, "Navigation redirected by guard");
        if let Some(text) = notice {
            self.notify(text);
        }
        Navigation::Redirected { outcome, location, notice }
    }

    /// Moves to the login page, cancelling any navigation still in flight. The page the client
    /// was on becomes the post-login redirect.
    pub fn force_login(&self) -> Location {
        let mut current = self.current.write();
        self.generation.fetch_add(1, Ordering::SeqCst);

        let from = current.as_ref().map(|l| l.path.clone()).unwrap_or_default();
        let path = Outcome::login(&from).target().unwrap_or_else(|| ROUTE_LOGIN.to_owned());
        let location = Location { path, title: self.routes.resolve(ROUTE_LOGIN).title() };
        *current = Some(location.clone());
        info!(path = %location.path, "Forced navigation to login");
        location
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    async fn refresh_before_guard(&self) {
        let Some(source) = &self.profile_source else {
            return;
        };
        match source.refresh_profile().await {
            Ok(state) => debug!(%state, "Profile refreshed before guard"),
            Err(err) if err.is_auth_expired() => debug!("Session expired during profile refresh"),
            Err(err) => warn!(error = %err, "Profile refresh failed, using persisted profile"),
        }
    }
}
