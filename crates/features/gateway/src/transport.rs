use crate::error::GatewayError;
use crate::request::ApiRequest;
use async_trait::async_trait;
use std::fmt::Debug;

/// A raw HTTP answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Moves a request over the wire.
///
/// Implementations return `Ok` for every response that arrived, whatever its status, and
/// [`GatewayError::Network`] when none did. Status interpretation belongs to the gateway.
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, GatewayError>;
}
