use crate::error::GatewayError;
use crate::request::{ApiRequest, Method};
use crate::transport::{HttpResponse, Transport};
use async_trait::async_trait;
use resbook_domain::config::ApiConfig;
use std::time::Duration;
use tracing::debug;

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// # Errors
    /// Returns [`GatewayError::Internal`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GatewayError::Internal {
                message: e.to_string().into(),
                context: Some("Building HTTP client".into()),
            })?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, GatewayError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| classify(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(&e))?;

        debug!(request = %request, status, "Response received");
        Ok(HttpResponse { status, body })
    }
}

fn classify(err: &reqwest::Error) -> GatewayError {
    if err.is_builder() {
        GatewayError::Internal { message: err.to_string().into(), context: Some("Request".into()) }
    } else {
        GatewayError::Network { message: err.to_string().into(), context: None }
    }
}
