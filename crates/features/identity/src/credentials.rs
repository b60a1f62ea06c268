//! Login and registration payloads with their input checks.

use crate::error::IdentityError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Mainland mobile number: `1`, then `3`–`9`, then nine more digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 11
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
        && bytes.iter().all(u8::is_ascii_digit)
}

/// Six-digit verification code.
#[must_use]
pub fn is_valid_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn check_phone(phone: &str) -> Result<(), IdentityError> {
    if is_valid_phone(phone) {
        return Ok(());
    }
    Err(IdentityError::InvalidCredentials { message: "请输入正确的手机号".into(), context: None })
}

fn check_code(code: &str) -> Result<(), IdentityError> {
    if is_valid_code(code) {
        return Ok(());
    }
    Err(IdentityError::InvalidCredentials { message: "请输入6位验证码".into(), context: None })
}

/// What a verification code is requested for; sent as `type` (1 login, 2 register).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodePurpose {
    Login,
    Register,
}

impl Serialize for CodePurpose {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(match self {
            Self::Login => 1,
            Self::Register => 2,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SendCodeRequest<'a> {
    pub(crate) phone: &'a str,
    #[serde(rename = "type")]
    pub(crate) purpose: CodePurpose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub code: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(phone: impl Into<String>, code: impl Into<String>) -> Self {
        Self { phone: phone.into(), code: code.into() }
    }

    /// # Errors
    /// Returns [`IdentityError::InvalidCredentials`] naming the first bad field.
    pub fn validate(&self) -> Result<(), IdentityError> {
        check_phone(&self.phone)?;
        check_code(&self.code)
    }
}

/// Registration form. Organization and research group fields vary per deployment and travel
/// in `profile` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub phone: String,
    pub code: String,
    pub name: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl RegisterRequest {
    #[must_use]
    pub fn new(phone: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { phone: phone.into(), code: code.into(), name: name.into(), profile: Map::new() }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.profile.insert(key.into(), value.into());
        self
    }

    /// # Errors
    /// Returns [`IdentityError::InvalidCredentials`] naming the first bad field.
    pub fn validate(&self) -> Result<(), IdentityError> {
        check_phone(&self.phone)?;
        check_code(&self.code)?;
        if self.name.trim().is_empty() {
            return Err(IdentityError::InvalidCredentials {
                message: "请输入姓名".into(),
                context: None,
            });
        }
        Ok(())
    }
}
