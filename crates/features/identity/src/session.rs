//! Process-wide session: token and profile, mirrored to persistent storage.
//!
//! The in-memory copy is an immutable [`UserSession`] snapshot that is replaced as a whole, so a
//! reader sees either the old or the new session and never a mix. The token and profile keys are
//! always written and cleared in one storage batch.

use crate::error::{IdentityError, IdentityErrorExt};
use crate::state::AuthState;
use parking_lot::RwLock;
use resbook_domain::config::StorageConfig;
use resbook_domain::constants::{PROFILE_KEY, TOKEN_KEY};
use resbook_domain::{UserProfile, UserSession};
use resbook_storage::{Batch, KeyValueStore, MemoryStore};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast, watch};
use tracing::{info, warn};

const EVENT_CAPACITY: usize = 32;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogoutReason {
    /// The user asked for it.
    Explicit,
    /// The server rejected the token.
    Expired,
}

/// Session transitions, broadcast after they are persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn { state: AuthState },
    ProfileRefreshed { state: AuthState },
    LoggedOut { reason: LogoutReason },
}

/// Storage keys of the persisted pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    pub token: String,
    pub profile: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self { token: TOKEN_KEY.to_owned(), profile: PROFILE_KEY.to_owned() }
    }
}

impl From<&StorageConfig> for SessionKeys {
    fn from(config: &StorageConfig) -> Self {
        Self { token: config.token_key.clone(), profile: config.profile_key.clone() }
    }
}

#[resbook_derive::shared_handle]
pub struct SessionState {
    store: Arc<dyn KeyValueStore>,
    keys: SessionKeys,
    current: RwLock<Arc<UserSession>>,
    snapshots: watch::Sender<Arc<UserSession>>,
    events: broadcast::Sender<SessionEvent>,
    writer: Mutex<()>,
}

impl SessionState {
    /// Loads the persisted session.
    ///
    /// A half-persisted pair (token without profile or the reverse) or an unreadable profile is
    /// discarded and cleared from storage, leaving an anonymous session.
    ///
    /// # Errors
    /// Returns [`IdentityError::Storage`] if the store cannot be read or cleaned up.
    pub async fn hydrate(
        store: Arc<dyn KeyValueStore>,
        keys: SessionKeys,
    ) -> Result<Self, IdentityError> {
        let values = store
            .get_many(&[keys.token.as_str(), keys.profile.as_str()])
            .await
            .context("Reading persisted session")?;
        let token = values.first().cloned().flatten().filter(|t| !t.is_empty());
        let profile = values.get(1).cloned().flatten();

        let session = match (token, profile) {
            (None, None) => UserSession::default(),
            (Some(token), Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => UserSession::authenticated(token, profile),
                Err(err) => {
                    warn!(error = %err, "Discarding unreadable persisted profile");
                    clear_pair(store.as_ref(), &keys).await?;
                    UserSession::default()
                },
            },
            (token, _) => {
                warn!(has_token = token.is_some(), "Discarding half-persisted session");
                clear_pair(store.as_ref(), &keys).await?;
                UserSession::default()
            },
        };

        let session = Arc::new(session);
        info!(state = %AuthState::of(&session), "Session hydrated");

        let (snapshots, _) = watch::channel(Arc::clone(&session));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self::new(SessionStateInner {
            store,
            keys,
            current: RwLock::new(session),
            snapshots,
            events,
            writer: Mutex::new(()),
        }))
    }

    /// An anonymous session backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn ephemeral() -> Self {
        let session = Arc::new(UserSession::default());
        let (snapshots, _) = watch::channel(Arc::clone(&session));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self::new(SessionStateInner {
            store: Arc::new(MemoryStore::new()),
            keys: SessionKeys::default(),
            current: RwLock::new(session),
            snapshots,
            events,
            writer: Mutex::new(()),
        })
    }

    /// The current session as one consistent value.
    #[must_use]
    pub fn snapshot(&self) -> Arc<UserSession> {
        Arc::clone(&self.current.read())
    }

    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        AuthState::of(&self.current.read())
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.current.read().token.clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current.read().is_logged_in()
    }

    /// Receiver that always holds the latest snapshot.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Arc<UserSession>> {
        self.snapshots.subscribe()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Starts a session: after login, or after a registration that returned a grant.
    ///
    /// Token and profile are persisted together before the new session becomes visible.
    ///
    /// # Errors
    /// Returns [`IdentityError::Serialization`] or [`IdentityError::Storage`]; the previous
    /// session stays in place.
    pub async fn establish(
        &self,
        token: impl Into<String>,
        profile: UserProfile,
    ) -> Result<AuthState, IdentityError> {
        let token = token.into();
        if token.is_empty() {
            return Err(IdentityError::InvalidCredentials {
                message: "empty session token".into(),
                context: None,
            });
        }
        let raw = serde_json::to_string(&profile).context("Encoding profile")?;

        let _writer = self.writer.lock().await;
        self.store
            .apply(Batch::new().put(&self.keys.token, token.as_str()).put(&self.keys.profile, raw))
            .await
            .context("Persisting session")?;

        let state = self.publish(UserSession::authenticated(token, profile));
        info!(%state, "Session established");
        let _ = self.events.send(SessionEvent::LoggedIn { state });
        Ok(state)
    }

    /// Replaces the profile of the session identified by `token`.
    ///
    /// Returns `None` without touching anything when the session has changed since `token` was
    /// read (logout, or another login), so a late refresh cannot revive an ended session.
    ///
    /// # Errors
    /// Returns [`IdentityError::Serialization`] or [`IdentityError::Storage`].
    pub async fn update_profile(
        &self,
        token: &str,
        profile: UserProfile,
    ) -> Result<Option<AuthState>, IdentityError> {
        let raw = serde_json::to_string(&profile).context("Encoding profile")?;

        let _writer = self.writer.lock().await;
        if self.current.read().token.as_deref() != Some(token) {
            warn!("Profile refresh raced with a session change, dropped");
            return Ok(None);
        }

        self.store
            .apply(Batch::new().put(&self.keys.profile, raw))
            .await
            .context("Persisting refreshed profile")?;

        let state = self.publish(UserSession::authenticated(token, profile));
        let _ = self.events.send(SessionEvent::ProfileRefreshed { state });
        Ok(Some(state))
    }

    /// Ends the session, removing token and profile in one batch.
    ///
    /// Returns `true` when this call ended a live session and `false` when it was already
    /// anonymous; only the first of several concurrent calls sees `true`. The in-memory session
    /// is cleared even if storage fails, so a rejected token is never sent again.
    ///
    /// # Errors
    /// Returns [`IdentityError::Storage`] if the persisted pair could not be removed.
    pub async fn clear(&self, reason: LogoutReason) -> Result<bool, IdentityError> {
        let _writer = self.writer.lock().await;
        let persisted = clear_pair(self.store.as_ref(), &self.keys).await;

        let ended = self.current.read().is_logged_in();
        if ended {
            self.publish(UserSession::default());
            info!(?reason, "Session cleared");
            let _ = self.events.send(SessionEvent::LoggedOut { reason });
        }
        persisted.map(|()| ended)
    }

    fn publish(&self, session: UserSession) -> AuthState {
        let state = AuthState::of(&session);
        let session = Arc::new(session);
        *self.current.write() = Arc::clone(&session);
        self.snapshots.send_replace(session);
        state
    }
}

async fn clear_pair(store: &dyn KeyValueStore, keys: &SessionKeys) -> Result<(), IdentityError> {
    store
        .apply(Batch::new().remove(&keys.token).remove(&keys.profile))
        .await
        .context("Clearing persisted session")
}

#[cfg(test)]
mod tests {
    use super::*;
    use resbook_domain::AuditStatus;

    fn store_with(entries: &[(&str, &str)]) -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::with_entries(entries.iter().copied()))
    }

    #[tokio::test]
    async fn hydrates_a_complete_pair() {
        let store = store_with(&[(TOKEN_KEY, "tkn"), (PROFILE_KEY, r#"{"audit_status":1}"#)]);
        let session = SessionState::hydrate(store, SessionKeys::default()).await.unwrap();

        assert_eq!(session.token().as_deref(), Some("tkn"));
        assert_eq!(session.auth_state(), AuthState::Passed);
    }

    #[tokio::test]
    async fn half_pairs_are_discarded_and_cleared() {
        for entries in [
            vec![(TOKEN_KEY, "tkn")],
            vec![(PROFILE_KEY, "{}")],
            vec![(TOKEN_KEY, "tkn"), (PROFILE_KEY, "not json")],
            vec![(TOKEN_KEY, ""), (PROFILE_KEY, "{}")],
        ] {
            let memory = MemoryStore::with_entries(entries.iter().copied());
            let store: Arc<dyn KeyValueStore> = Arc::new(memory.clone());
            let session = SessionState::hydrate(store, SessionKeys::default()).await.unwrap();

            assert_eq!(session.auth_state(), AuthState::Anonymous, "{entries:?}");
            assert!(memory.is_empty(), "{entries:?}");
        }
    }

    #[tokio::test]
    async fn stale_profile_refresh_is_dropped() {
        let session = SessionState::ephemeral();
        session.establish("first", UserProfile::with_audit(AuditStatus::Pending)).await.unwrap();
        session.clear(LogoutReason::Explicit).await.unwrap();

        let applied = session
            .update_profile("first", UserProfile::with_audit(AuditStatus::Passed))
            .await
            .unwrap();
        assert_eq!(applied, None);
        assert_eq!(session.auth_state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn events_follow_transitions() {
        let session = SessionState::ephemeral();
        let mut events = session.subscribe();
        let mut snapshots = session.watch();

        session.establish("t", UserProfile::with_audit(AuditStatus::Pending)).await.unwrap();
        session.update_profile("t", UserProfile::with_audit(AuditStatus::Passed)).await.unwrap();
        assert!(session.clear(LogoutReason::Expired).await.unwrap());
        assert!(!session.clear(LogoutReason::Explicit).await.unwrap());

        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::LoggedIn { state: AuthState::PendingAudit }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::ProfileRefreshed { state: AuthState::Passed }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::LoggedOut { reason: LogoutReason::Expired }
        );
        assert!(events.try_recv().is_err(), "second clear is silent");

        assert!(snapshots.has_changed().unwrap());
        assert!(!snapshots.borrow_and_update().is_logged_in());
    }
}
