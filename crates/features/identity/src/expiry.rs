use crate::navigator::Navigator;
use crate::session::{LogoutReason, SessionState};
use async_trait::async_trait;
use resbook_gateway::{GatewayError, SessionBinding};
use tracing::{debug, error};

/// Connects the gateway to the session: supplies the bearer token and tears the session down
/// when the server rejects it.
///
/// On an expired token the session is cleared first, then the client is moved to the login
/// page, then the user is told. Concurrent rejections all clear, but only the call that ended
/// the session redirects and notifies.
#[derive(Debug, Clone)]
pub struct SessionExpiryHandler {
    session: SessionState,
    navigator: Navigator,
}

impl SessionExpiryHandler {
    #[must_use]
    pub const fn new(session: SessionState, navigator: Navigator) -> Self {
        Self { session, navigator }
    }
}

#[async_trait]
impl SessionBinding for SessionExpiryHandler {
    fn bearer_token(&self) -> Option<String> {
        self.session.token()
    }

    async fn on_auth_expired(&self, err: &GatewayError) {
        let ended = match self.session.clear(LogoutReason::Expired).await {
            Ok(ended) => ended,
            Err(clear_err) => {
                error!(error = %clear_err, "Failed to remove the expired session from storage");
                true
            },
        };
        if !ended {
            debug!("Session already ended by an earlier rejection");
            return;
        }
        self.navigator.force_login();
        self.navigator.notify(err.user_message());
    }
}
