/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "resbook_token";
/// Storage key holding the JSON-serialized user profile.
pub const PROFILE_KEY: &str = "resbook_user";
/// Document name of the persisted session store.
pub const SESSION_STORE: &str = "session";

/// Business code of a successful response envelope.
pub const CODE_OK: i64 = 200;
/// Business code signalling an invalid or expired token.
pub const CODE_AUTH_EXPIRED: i64 = 401;

pub const ROUTE_ROOT: &str = "/";
pub const ROUTE_HOME: &str = "/home";
pub const ROUTE_LOGIN: &str = "/login";
pub const ROUTE_MY: &str = "/my";
pub const ROUTE_AUDIT_STATUS: &str = "/audit-status";

/// Placeholder rendered for absent dates and empty slot lists.
pub const EMPTY_PLACEHOLDER: &str = "-";
