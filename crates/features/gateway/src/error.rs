use std::borrow::Cow;

/// Coarse category of a failed call, used by views to pick a notification style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    BusinessError,
    AuthExpired,
}

/// Error types of the request gateway.
#[resbook_derive::resbook_error]
pub enum GatewayError {
    /// No response was received (connect failure, timeout, reset).
    #[error("Network failure{}: {message}", format_context(.context))]
    Network { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The server answered but refused the call.
    #[error("Request rejected with code {code}{}: {message}", format_context(.context))]
    Business {
        code: i64,
        status: Option<u16>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The token is missing, invalid or expired (business code or HTTP 401).
    #[error("Authentication expired{}: {message}", format_context(.context))]
    AuthExpired {
        status: Option<u16>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Response decoding failed{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal gateway error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl GatewayError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::AuthExpired { .. } => ErrorKind::AuthExpired,
            Self::Business { .. } | Self::Decode { .. } | Self::Internal { .. } => {
                ErrorKind::BusinessError
            },
        }
    }

    /// HTTP status of the failed response, when there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Business { status, .. } | Self::AuthExpired { status, .. } => *status,
            _ => None,
        }
    }

    /// Text suitable for a user-facing notification.
    #[must_use]
    pub fn user_message(&self) -> Cow<'static, str> {
        match self {
            Self::Network { .. } => Cow::Borrowed(crate::messages::NETWORK),
            Self::Business { message, .. } | Self::AuthExpired { message, .. } => message.clone(),
            Self::Decode { .. } | Self::Internal { .. } => Cow::Borrowed(crate::messages::FAILED),
        }
    }

    #[must_use]
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired { .. })
    }
}
