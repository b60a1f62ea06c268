use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// What a destination demands of the session before it can be entered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct RouteRequirement: u8 {
        const AUTH = 1 << 0;
        const AUDIT = 1 << 1;

        const AUDITED = Self::AUTH.bits() | Self::AUDIT.bits();
    }
}

impl RouteRequirement {
    /// No requirement at all.
    pub const PUBLIC: Self = Self::empty();

    #[must_use]
    pub const fn new(requires_auth: bool, requires_audit: bool) -> Self {
        let mut bits = 0;
        if requires_auth {
            bits |= Self::AUTH.bits();
        }
        if requires_audit {
            bits |= Self::AUDIT.bits();
        }
        Self::from_bits_truncate(bits)
    }

    #[must_use]
    pub const fn requires_auth(self) -> bool {
        self.contains(Self::AUTH)
    }

    #[must_use]
    pub const fn requires_audit(self) -> bool {
        self.contains(Self::AUDIT)
    }
}

impl Default for RouteRequirement {
    fn default() -> Self {
        Self::PUBLIC
    }
}

impl From<u8> for RouteRequirement {
    fn from(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for RouteRequirement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for RouteRequirement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_flags() {
        assert!(!RouteRequirement::PUBLIC.requires_auth());
        assert!(RouteRequirement::AUTH.requires_auth());
        assert!(!RouteRequirement::AUTH.requires_audit());
        assert!(RouteRequirement::AUDITED.requires_audit());
        assert_eq!(RouteRequirement::new(true, true), RouteRequirement::AUDITED);
        assert_eq!(RouteRequirement::new(false, false), RouteRequirement::PUBLIC);
    }

    #[test]
    fn serializes_as_bits() {
        assert_eq!(serde_json::to_string(&RouteRequirement::AUDITED).unwrap(), "3");
        let parsed: RouteRequirement = serde_json::from_str("255").unwrap();
        assert_eq!(parsed, RouteRequirement::AUDITED);
    }
}
