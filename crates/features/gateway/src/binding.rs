use crate::error::GatewayError;
use async_trait::async_trait;
use std::fmt::Debug;

/// The gateway's view of the session: where the bearer token comes from and who is told
/// when the server rejects it.
#[async_trait]
pub trait SessionBinding: Debug + Send + Sync {
    /// Token attached as `Authorization: Bearer <token>`, if logged in.
    fn bearer_token(&self) -> Option<String>;

    /// Called once for every call that failed with [`GatewayError::AuthExpired`], before the
    /// error is handed back to the caller.
    async fn on_auth_expired(&self, error: &GatewayError);
}
