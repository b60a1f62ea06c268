use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The `{code, message, data}` wrapper every endpoint answers with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == resbook_domain::constants::CODE_OK
    }

    #[must_use]
    pub fn is_auth_expired(&self) -> bool {
        self.code == resbook_domain::constants::CODE_AUTH_EXPIRED
    }

    /// Non-empty server message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }

    /// Decodes the payload.
    ///
    /// # Errors
    /// Fails when `data` does not match `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data)
    }
}

/// Best-effort extraction of `message` from an error body.
pub(crate) fn body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let env: Envelope = serde_json::from_str(r#"{"code": 200}"#).unwrap();
        assert!(env.is_success());
        assert_eq!(env.data, Value::Null);
        assert_eq!(env.message(), None);

        let (): () = env.into_data().unwrap();
    }

    #[test]
    fn blank_messages_are_ignored() {
        assert_eq!(body_message(r#"{"message": "  "}"#), None);
        assert_eq!(body_message(r#"{"message": "库存不足"}"#).as_deref(), Some("库存不足"));
        assert_eq!(body_message("<html>"), None);
    }
}
