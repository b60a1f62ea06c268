use crate::binding::SessionBinding;
use crate::envelope::{Envelope, body_message};
use crate::error::{GatewayError, GatewayErrorExt};
use crate::http::HttpTransport;
use crate::messages;
use crate::request::ApiRequest;
use crate::transport::{HttpResponse, Transport};
use parking_lot::RwLock;
use resbook_domain::config::ApiConfig;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::borrow::Cow;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Executes API calls and turns every failure into a categorized [`GatewayError`].
///
/// Calls are never retried. An authentication failure (business code 401 or HTTP 401) is
/// reported to the bound [`SessionBinding`] exactly once per failed call.
#[resbook_derive::shared_handle]
pub struct RequestGateway {
    transport: Arc<dyn Transport>,
    binding: RwLock<Option<Weak<dyn SessionBinding>>>,
}

impl RequestGateway {
    #[must_use]
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::new(RequestGatewayInner {
            transport: Arc::new(transport),
            binding: RwLock::new(None),
        })
    }

    /// Gateway over [`HttpTransport`].
    ///
    /// # Errors
    /// Returns [`GatewayError::Internal`] if the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self, GatewayError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Binds the session. Only a weak reference is kept.
    pub fn bind<B: SessionBinding + 'static>(&self, binding: &Arc<B>) {
        let weak: Weak<B> = Arc::downgrade(binding);
        *self.binding.write() = Some(weak);
    }

    fn binding(&self) -> Option<Arc<dyn SessionBinding>> {
        self.binding.read().as_ref().and_then(Weak::upgrade)
    }

    /// Performs `request` and decodes the envelope's `data` into `T`.
    ///
    /// # Errors
    /// * [`GatewayError::Network`] when no response arrived.
    /// * [`GatewayError::AuthExpired`] for business code 401 or HTTP 401 (after the hook ran).
    /// * [`GatewayError::Business`] for any other rejection.
    /// * [`GatewayError::Decode`] when the body or its data cannot be decoded.
    pub async fn call<T: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<T, GatewayError> {
        let binding = self.binding();
        if request.bearer.is_none() {
            request.bearer = binding.as_ref().and_then(|b| b.bearer_token());
        }
        let label = request.to_string();
        debug!(request = %label, "Dispatching request");

        let outcome = match self.transport.send(request).await {
            Ok(response) => interpret(response),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(envelope) => envelope.into_data::<T>().context(label),
            Err(err) => {
                if err.is_auth_expired() {
                    warn!(request = %label, error = %err, "Authentication rejected by server");
                    if let Some(binding) = binding {
                        binding.on_auth_expired(&err).await;
                    }
                } else {
                    debug!(request = %label, error = %err, "Request failed");
                }
                Err(err)
            },
        }
    }

    /// Performs `request`, discarding any payload.
    ///
    /// # Errors
    /// Same as [`RequestGateway::call`].
    pub async fn execute(&self, request: ApiRequest) -> Result<(), GatewayError> {
        self.call::<IgnoredAny>(request).await.map(|_| ())
    }
}

fn interpret(response: HttpResponse) -> Result<Envelope, GatewayError> {
    if !response.is_success() {
        return Err(status_error(response.status, body_message(&response.body)));
    }

    let envelope =
        serde_json::from_str::<Envelope>(&response.body).context("Decoding response envelope")?;
    if envelope.is_success() {
        return Ok(envelope);
    }

    let message = envelope.message().map(str::to_owned);
    if envelope.is_auth_expired() {
        return Err(GatewayError::AuthExpired {
            status: None,
            message: or_fallback(message, messages::TOKEN_INVALID),
            context: None,
        });
    }

    Err(GatewayError::Business {
        code: envelope.code,
        status: Some(response.status),
        message: or_fallback(message, messages::FAILED),
        context: None,
    })
}

/// Maps a non-2xx HTTP status to its error and user-facing message.
#[must_use]
pub fn status_error(status: u16, server_message: Option<String>) -> GatewayError {
    let message = match status {
        401 => {
            return GatewayError::AuthExpired {
                status: Some(status),
                message: or_fallback(server_message, messages::LOGIN_EXPIRED),
                context: None,
            };
        },
        403 => Cow::Borrowed(messages::FORBIDDEN),
        404 => Cow::Borrowed(messages::NOT_FOUND),
        429 => Cow::Borrowed(messages::TOO_MANY_REQUESTS),
        500 => or_fallback(server_message, messages::SERVER_ERROR),
        _ => or_fallback(server_message, messages::FAILED),
    };

    GatewayError::Business { code: i64::from(status), status: Some(status), message, context: None }
}

fn or_fallback(message: Option<String>, fallback: &'static str) -> Cow<'static, str> {
    message.map_or(Cow::Borrowed(fallback), Cow::Owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn status_table() {
        let cases = [
            (403, Some("ignored"), "没有权限访问"),
            (404, None, "请求的资源不存在"),
            (429, None, "请求过于频繁，请稍后再试"),
            (500, None, "服务器错误"),
            (500, Some("数据库不可用"), "数据库不可用"),
            (502, None, "请求失败"),
            (418, Some("茶壶"), "茶壶"),
        ];

        for (status, server, expected) in cases {
            let err = status_error(status, server.map(str::to_owned));
            assert_eq!(err.kind(), ErrorKind::BusinessError, "status {status}");
            assert_eq!(err.status(), Some(status));
            assert_eq!(err.user_message(), expected, "status {status}");
        }
    }

    #[test]
    fn http_401_is_auth_expired() {
        let err = status_error(401, None);
        assert_eq!(err.kind(), ErrorKind::AuthExpired);
        assert_eq!(err.user_message(), "登录已过期，请重新登录");
    }

    #[test]
    fn business_401_is_auth_expired_without_status() {
        let err = interpret(HttpResponse::new(200, r#"{"code":401,"message":""}"#)).unwrap_err();
        assert!(err.is_auth_expired());
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "Token无效或已过期，请重新登录");
    }

    #[test]
    fn garbage_body_is_decode_error() {
        let err = interpret(HttpResponse::new(200, "<html>")).unwrap_err();
        assert!(matches!(err, GatewayError::Decode { .. }));
        assert_eq!(err.kind(), ErrorKind::BusinessError);
    }
}
