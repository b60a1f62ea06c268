use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Account review status assigned by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditStatus {
    Pending,
    Passed,
    Rejected,
    /// A code this client does not know about.
    Unknown(i64),
}

impl AuditStatus {
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::Passed,
            2 => Self::Rejected,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Pending => 0,
            Self::Passed => 1,
            Self::Rejected => 2,
            Self::Unknown(code) => code,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "待审核",
            Self::Passed => "审核通过",
            Self::Rejected => "审核拒绝",
            Self::Unknown(_) => "未知状态",
        }
    }
}

impl From<i64> for AuditStatus {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl Serialize for AuditStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for AuditStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CodeVisitor;

        impl Visitor<'_> for CodeVisitor {
            type Value = AuditStatus;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer audit status code")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(AuditStatus::from_code(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(AuditStatus::from_code(i64::try_from(v).unwrap_or(i64::MAX)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.trim()
                    .parse::<i64>()
                    .map(AuditStatus::from_code)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(CodeVisitor)
    }
}

/// The signed-in user as returned by `/h5/auth/profile` and the login endpoint.
///
/// Fields the client does not interpret are kept in `extra` so the persisted copy round trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_status: Option<AuditStatus>,
    #[serde(default, deserialize_with = "flag")]
    pub disabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    #[must_use]
    pub fn with_audit(status: AuditStatus) -> Self {
        Self { audit_status: Some(status), ..Self::default() }
    }

    #[must_use]
    pub const fn is_audit_passed(&self) -> bool {
        matches!(self.audit_status, Some(AuditStatus::Passed))
    }
}

/// Accepts `true`/`false`, `0`/`1` and `null` for boolean flags.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::Number(n)) => Ok(n.as_i64().is_some_and(|v| v != 0)),
        Some(other) => Err(de::Error::invalid_type(
            de::Unexpected::Other(&other.to_string()),
            &"a boolean flag",
        )),
    }
}

/// Token plus profile. Profile fields only mean something while `token` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSession {
    pub token: Option<String>,
    pub profile: Option<UserProfile>,
}

impl UserSession {
    #[must_use]
    pub fn authenticated(token: impl Into<String>, profile: UserProfile) -> Self {
        Self { token: Some(token.into()), profile: Some(profile) }
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}
