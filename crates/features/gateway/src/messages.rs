//! User-facing notification texts.

pub const NETWORK: &str = "网络连接失败，请检查网络";
pub const FAILED: &str = "请求失败";
pub const FORBIDDEN: &str = "没有权限访问";
pub const NOT_FOUND: &str = "请求的资源不存在";
pub const TOO_MANY_REQUESTS: &str = "请求过于频繁，请稍后再试";
pub const SERVER_ERROR: &str = "服务器错误";
pub const TOKEN_INVALID: &str = "Token无效或已过期，请重新登录";
pub const LOGIN_EXPIRED: &str = "登录已过期，请重新登录";
