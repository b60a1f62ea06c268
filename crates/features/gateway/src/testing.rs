//! In-process [`Transport`] that replays scripted responses and records every request.

use crate::error::GatewayError;
use crate::request::ApiRequest;
use crate::transport::{HttpResponse, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug)]
enum Scripted {
    Respond(HttpResponse),
    Offline,
}

/// Clones share the same script and request log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    log: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.script.lock().push_back(Scripted::Respond(HttpResponse::new(status, body)));
        self
    }

    /// Queues a successful envelope carrying `data`.
    pub fn ok(&self, data: Value) -> &Self {
        self.respond(200, json!({"code": 200, "message": "success", "data": data}).to_string())
    }

    /// Queues an HTTP 200 envelope with a non-success business `code`.
    pub fn business(&self, code: i64, message: &str) -> &Self {
        self.respond(200, json!({"code": code, "message": message, "data": null}).to_string())
    }

    /// Queues a failure without response.
    pub fn offline(&self) -> &Self {
        self.script.lock().push_back(Scripted::Offline);
        self
    }

    /// Requests sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().clone()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, GatewayError> {
        let label = request.to_string();
        self.log.lock().push(request);

        match self.script.lock().pop_front() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Offline) => {
                Err(GatewayError::Network { message: "offline".into(), context: None })
            },
            None => Err(GatewayError::Internal {
                message: format!("no scripted response for {label}").into(),
                context: None,
            }),
        }
    }
}
