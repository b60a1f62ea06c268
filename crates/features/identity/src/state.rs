use resbook_domain::{AuditStatus, UserSession};
use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

/// Authorization state derived from a [`UserSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    Anonymous,
    Disabled,
    PendingAudit,
    Rejected,
    Passed,
    /// Logged in, but the profile is missing or carries an unknown audit code.
    Indeterminate,
}

impl AuthState {
    /// Evaluated in order: no token, disabled flag, then audit status.
    #[must_use]
    pub fn of(session: &UserSession) -> Self {
        if session.token.is_none() {
            return Self::Anonymous;
        }
        let Some(profile) = &session.profile else {
            return Self::Indeterminate;
        };
        if profile.disabled {
            return Self::Disabled;
        }
        match profile.audit_status {
            Some(AuditStatus::Pending) => Self::PendingAudit,
            Some(AuditStatus::Rejected) => Self::Rejected,
            Some(AuditStatus::Passed) => Self::Passed,
            Some(AuditStatus::Unknown(_)) | None => Self::Indeterminate,
        }
    }

    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        !matches!(self, Self::Anonymous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resbook_domain::UserProfile;

    fn logged_in(profile: UserProfile) -> UserSession {
        UserSession::authenticated("token", profile)
    }

    #[test]
    fn derivation_order() {
        assert_eq!(AuthState::of(&UserSession::default()), AuthState::Anonymous);

        let anonymous_with_profile =
            UserSession { token: None, profile: Some(UserProfile::with_audit(AuditStatus::Passed)) };
        assert_eq!(AuthState::of(&anonymous_with_profile), AuthState::Anonymous);

        let mut disabled = UserProfile::with_audit(AuditStatus::Passed);
        disabled.disabled = true;
        assert_eq!(AuthState::of(&logged_in(disabled)), AuthState::Disabled);

        let cases = [
            (AuditStatus::Pending, AuthState::PendingAudit),
            (AuditStatus::Rejected, AuthState::Rejected),
            (AuditStatus::Passed, AuthState::Passed),
            (AuditStatus::Unknown(7), AuthState::Indeterminate),
        ];
        for (audit, expected) in cases {
            assert_eq!(AuthState::of(&logged_in(UserProfile::with_audit(audit))), expected);
        }

        let no_profile = UserSession { token: Some("t".into()), profile: None };
        assert_eq!(AuthState::of(&no_profile), AuthState::Indeterminate);
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(AuthState::PendingAudit.to_string(), "pending_audit");
        assert!(!AuthState::Anonymous.is_authenticated());
        assert!(AuthState::Indeterminate.is_authenticated());
    }
}
