use std::borrow::Cow;

/// Error types specific to the identity feature.
#[resbook_derive::resbook_error]
pub enum IdentityError {
    #[error("Invalid credentials{}: {message}", format_context(.context))]
    InvalidCredentials { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Not logged in{}: {message}", format_context(.context))]
    NotLoggedIn { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Session storage failure{}: {source}", format_context(.context))]
    Storage { source: resbook_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Request failed{}: {source}", format_context(.context))]
    Gateway { source: resbook_gateway::GatewayError, context: Option<Cow<'static, str>> },

    #[error("Serde serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal identity error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl IdentityError {
    /// `true` when the server rejected the session token.
    #[must_use]
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Gateway { source, .. } if source.is_auth_expired())
    }
}
