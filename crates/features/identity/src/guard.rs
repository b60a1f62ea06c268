//! The navigation guard: a pure function from (route requirement, auth state) to an outcome.

use crate::state::AuthState;
use resbook_domain::RouteRequirement;
use resbook_domain::constants::{ROUTE_AUDIT_STATUS, ROUTE_LOGIN, ROUTE_MY};
use url::form_urlencoded;

/// What happens to a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Allow,
    /// Go to the login page, then back to `redirect`.
    RedirectLogin { redirect: Option<String> },
    RedirectHome,
    RedirectAuditStatus,
}

impl Outcome {
    /// Login redirect remembering `intended`, unless that is the login page itself.
    #[must_use]
    pub fn login(intended: &str) -> Self {
        let redirect = (!intended.is_empty() && !is_login_path(intended)).then(|| intended.to_owned());
        Self::RedirectLogin { redirect }
    }

    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Destination of a redirect; `None` for [`Outcome::Allow`].
    #[must_use]
    pub fn target(&self) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::RedirectLogin { redirect: None } => Some(ROUTE_LOGIN.to_owned()),
            Self::RedirectLogin { redirect: Some(path) } => {
                Some(format!("{ROUTE_LOGIN}?redirect={}", encode_redirect(path)))
            },
            Self::RedirectHome => Some(ROUTE_MY.to_owned()),
            Self::RedirectAuditStatus => Some(ROUTE_AUDIT_STATUS.to_owned()),
        }
    }
}

/// Decides whether `state` may enter a destination with `requirement`.
///
/// `intended` is the full path (with query) that was requested; it is carried into the login
/// redirect.
#[must_use]
pub fn decide(requirement: RouteRequirement, state: AuthState, intended: &str) -> Outcome {
    if !requirement.requires_auth() {
        return Outcome::Allow;
    }
    if state == AuthState::Anonymous {
        return Outcome::login(intended);
    }
    if !requirement.requires_audit() {
        return Outcome::Allow;
    }

    match state {
        AuthState::Passed => Outcome::Allow,
        AuthState::PendingAudit | AuthState::Rejected => Outcome::RedirectAuditStatus,
        AuthState::Disabled | AuthState::Indeterminate | AuthState::Anonymous => {
            Outcome::RedirectHome
        },
    }
}

/// Toast text shown with a redirect; `None` when the navigation is allowed.
#[must_use]
pub const fn notice(state: AuthState, outcome: &Outcome) -> Option<&'static str> {
    match (outcome, state) {
        (Outcome::Allow, _) => None,
        (Outcome::RedirectLogin { .. }, _) => Some("请先登录"),
        (Outcome::RedirectAuditStatus, AuthState::Rejected) => Some("账号审核未通过"),
        (Outcome::RedirectAuditStatus, _) => Some("账号审核中，请等待审核通过"),
        (Outcome::RedirectHome, AuthState::Disabled) => Some("账号已被禁用"),
        (Outcome::RedirectHome, _) => Some("账号审核状态异常"),
    }
}

/// `true` for `/login`, with or without a query string or trailing slash.
#[must_use]
pub fn is_login_path(path: &str) -> bool {
    let bare = path.split(['?', '#']).next().unwrap_or(path);
    bare.trim_end_matches('/') == ROUTE_LOGIN
}

/// Where to go after a successful login: the `redirect` query parameter of `login_path`, or
/// `fallback`.
#[must_use]
pub fn redirect_after_login(login_path: &str, fallback: &str) -> String {
    login_path
        .split_once('?')
        .and_then(|(_, query)| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "redirect")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|target| {
            target.starts_with('/') && !target.starts_with("//") && !is_login_path(target)
        })
        .unwrap_or_else(|| fallback.to_owned())
}

/// Form-encodes each path segment; the `/` separators stay readable.
fn encode_redirect(path: &str) -> String {
    path.split('/')
        .map(|segment| form_urlencoded::byte_serialize(segment.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}
