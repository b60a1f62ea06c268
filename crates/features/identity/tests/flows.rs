use async_trait::async_trait;
use resbook_domain::constants::{PROFILE_KEY, TOKEN_KEY};
use resbook_domain::{AuditStatus, UserProfile};
use resbook_gateway::testing::ScriptedTransport;
use resbook_gateway::{ErrorKind, Method, RequestGateway};
use resbook_identity::*;
use resbook_storage::{FileStore, KeyValueStore};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio::sync::Notify;

struct Client {
    transport: ScriptedTransport,
    session: SessionState,
    navigator: Navigator,
    auth: AuthService,
    _handler: Arc<SessionExpiryHandler>,
}

fn client_over(session: SessionState) -> Client {
    let transport = ScriptedTransport::new();
    let gateway = RequestGateway::with_transport(transport.clone());
    let auth = AuthService::open(gateway.clone(), session.clone());
    let source: Arc<dyn ProfileSource> = Arc::new(auth.clone());
    let navigator = Navigator::with_routes(session.clone(), RouteTable::standard(), Some(source));
    let handler = Arc::new(SessionExpiryHandler::new(session.clone(), navigator.clone()));
    gateway.bind(&handler);
    Client { transport, session, navigator, auth, _handler: handler }
}

async fn open_store(dir: &TempDir) -> FileStore {
    FileStore::builder().root(dir.path()).name("session").open().await.unwrap()
}

#[tokio::test]
async fn login_persists_the_pair_across_restarts() {
    let dir = TempDir::new().unwrap();
    let session = SessionState::hydrate(Arc::new(open_store(&dir).await), SessionKeys::default())
        .await
        .unwrap();
    let client = client_over(session);

    client.transport.ok(json!({"token": "abc", "user": {"id": 1, "phone": "13800138000", "audit_status": 0}}));
    let state = client.auth.login(&LoginRequest::new("13800138000", "123456")).await.unwrap();
    assert_eq!(state, AuthState::PendingAudit);

    let sent = &client.transport.requests()[0];
    assert_eq!((sent.method, sent.path.as_str()), (Method::Post, "/h5/auth/login"));
    assert_eq!(sent.body, Some(json!({"phone": "13800138000", "code": "123456"})));
    drop(client);

    let reopened = SessionState::hydrate(Arc::new(open_store(&dir).await), SessionKeys::default())
        .await
        .unwrap();
    assert_eq!(reopened.token().as_deref(), Some("abc"));
    assert_eq!(reopened.auth_state(), AuthState::PendingAudit);
    assert_eq!(reopened.snapshot().profile.as_ref().and_then(|p| p.id), Some(1));
}

#[tokio::test]
async fn invalid_credentials_never_reach_the_server() {
    let client = client_over(SessionState::ephemeral());

    let err = client.auth.login(&LoginRequest::new("1380013800", "123456")).await.unwrap_err();
    assert!(matches!(err, IdentityError::InvalidCredentials { .. }));
    let err = client.auth.send_code("12345678901", CodePurpose::Login).await.unwrap_err();
    assert!(matches!(err, IdentityError::InvalidCredentials { .. }));
    assert!(client.transport.requests().is_empty());
}

#[tokio::test]
async fn send_code_posts_the_purpose() {
    let client = client_over(SessionState::ephemeral());
    client.transport.ok(json!(null));

    client.auth.send_code("13800138000", CodePurpose::Register).await.unwrap();
    assert_eq!(
        client.transport.requests()[0].body,
        Some(json!({"phone": "13800138000", "type": 2}))
    );
}

#[tokio::test]
async fn register_logs_in_only_when_granted() {
    let client = client_over(SessionState::ephemeral());
    let form = RegisterRequest::new("13800138000", "123456", "张三").with("organization", "某研究所");

    client.transport.ok(json!(null));
    assert_eq!(client.auth.register(&form).await.unwrap(), None);
    assert!(!client.session.is_logged_in());
    assert_eq!(client.transport.requests()[0].body.as_ref().unwrap()["organization"], "某研究所");

    client.transport.ok(json!({"token": "new", "user": {"audit_status": 0}}));
    assert_eq!(client.auth.register(&form).await.unwrap(), Some(AuthState::PendingAudit));
    assert_eq!(client.session.token().as_deref(), Some("new"));
}

#[tokio::test]
async fn expired_token_clears_session_then_redirects_then_notifies() {
    let session = SessionState::ephemeral();
    session.establish("tkn", UserProfile::with_audit(AuditStatus::Passed)).await.unwrap();
    let client = client_over(session);
    client.transport.ok(json!({"audit_status": 1}));
    assert!(matches!(client.navigator.navigate("/orders").await, Navigation::Arrived(_)));

    let mut notices = client.navigator.notices();
    let mut events = client.session.subscribe();
    client.transport.business(401, "");

    let err = client.auth.refresh_profile().await.unwrap_err();
    assert!(err.is_auth_expired());
    assert_eq!(client.transport.requests()[1].bearer.as_deref(), Some("tkn"));

    assert!(!client.session.is_logged_in());
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::LoggedOut { reason: LogoutReason::Expired }
    );
    assert_eq!(client.navigator.current().unwrap().path, "/login?redirect=/orders");
    assert_eq!(notices.recv().await.unwrap(), "Token无效或已过期，请重新登录");
}

#[tokio::test]
async fn concurrent_rejections_end_the_session_once() {
    let session = SessionState::ephemeral();
    session.establish("tkn", UserProfile::with_audit(AuditStatus::Passed)).await.unwrap();
    let client = client_over(session);
    client.transport.ok(json!({"audit_status": 1}));
    assert!(matches!(client.navigator.navigate("/orders").await, Navigation::Arrived(_)));

    let mut events = client.session.subscribe();
    let mut notices = client.navigator.notices();
    client.transport.respond(401, "{}").respond(401, "{}");

    let (a, b) = tokio::join!(
        client.auth.refresh_profile(),
        client.auth.refresh_profile()
    );
    assert!(a.unwrap_err().is_auth_expired());
    assert!(b.is_err());

    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::LoggedOut { reason: LogoutReason::Expired }
    );
    assert!(events.try_recv().is_err());
    assert_eq!(client.navigator.current().unwrap().path, "/login?redirect=/orders");
    assert_eq!(notices.try_recv().unwrap(), "登录已过期，请重新登录");
    assert!(notices.try_recv().is_err(), "one notice per ended session");
}

#[tokio::test]
async fn logout_clears_locally_even_when_offline() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let session = SessionState::hydrate(Arc::new(store.clone()), SessionKeys::default())
        .await
        .unwrap();
    session.establish("tkn", UserProfile::with_audit(AuditStatus::Passed)).await.unwrap();
    let client = client_over(session);
    client.transport.offline();

    client.auth.logout().await.unwrap();
    assert!(!client.session.is_logged_in());
    assert_eq!(client.transport.requests()[0].path, "/h5/auth/logout");

    let values = store.get_many(&[TOKEN_KEY, PROFILE_KEY]).await.unwrap();
    assert_eq!(values, [None, None]);
}

#[tokio::test]
async fn refresh_without_session_is_not_logged_in() {
    let client = client_over(SessionState::ephemeral());
    let err = client.auth.refresh_profile().await.unwrap_err();
    assert!(matches!(err, IdentityError::NotLoggedIn { .. }));
    assert!(client.transport.requests().is_empty());
}

#[tokio::test]
async fn first_protected_navigation_refreshes_a_stale_profile() {
    let session = SessionState::ephemeral();
    session.establish("tkn", UserProfile::with_audit(AuditStatus::Pending)).await.unwrap();
    let client = client_over(session);
    client.transport.ok(json!({"audit_status": 1}));

    let nav = client.navigator.navigate("/services/cage").await;
    assert_eq!(
        nav,
        Navigation::Arrived(Location { path: "/services/cage".into(), title: Some("笼位租赁") })
    );
    assert_eq!(client.transport.requests().len(), 1);

    client.navigator.navigate("/services/animal").await;
    assert_eq!(client.transport.requests().len(), 1, "profile is refreshed once per process");
}

#[tokio::test]
async fn failed_refresh_falls_back_to_the_persisted_profile() {
    let session = SessionState::ephemeral();
    session.establish("tkn", UserProfile::with_audit(AuditStatus::Pending)).await.unwrap();
    let client = client_over(session);
    client.transport.offline();

    let nav = client.navigator.navigate("/services/cage").await;
    assert_eq!(nav.location().unwrap().path, "/audit-status");
    assert!(client.session.is_logged_in());
}

#[tokio::test]
async fn business_errors_leave_the_session_alone() {
    let session = SessionState::ephemeral();
    session.establish("tkn", UserProfile::with_audit(AuditStatus::Passed)).await.unwrap();
    let client = client_over(session);
    client.transport.business(500, "服务繁忙");

    let err = client.auth.refresh_profile().await.unwrap_err();
    let IdentityError::Gateway { source, .. } = &err else {
        panic!("expected a gateway error, got {err:?}");
    };
    assert_eq!(source.kind(), ErrorKind::BusinessError);
    assert_eq!(source.user_message(), "服务繁忙");
    assert!(client.session.is_logged_in());
}

#[derive(Debug, Default)]
struct GatedSource {
    gate: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl ProfileSource for GatedSource {
    async fn refresh_profile(&self) -> Result<AuthState, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(AuthState::Passed)
    }
}

#[tokio::test]
async fn the_last_navigation_wins() {
    let session = SessionState::ephemeral();
    session.establish("tkn", UserProfile::with_audit(AuditStatus::Passed)).await.unwrap();
    let source = Arc::new(GatedSource::default());
    let navigator = Navigator::with_routes(
        session,
        RouteTable::standard(),
        Some(Arc::clone(&source) as Arc<dyn ProfileSource>),
    );

    let slow = tokio::spawn({
        let navigator = navigator.clone();
        async move { navigator.navigate("/orders").await }
    });
    while source.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }

    let fast = navigator.navigate("/cases/3").await;
    assert!(matches!(fast, Navigation::Arrived(_)));
    source.gate.notify_one();

    assert_eq!(slow.await.unwrap(), Navigation::Superseded);
    assert_eq!(navigator.current().unwrap().path, "/cases/3");
}

/// Refresh that completes only when released, then stores a passed audit.
#[derive(Debug)]
struct HeldRefresh {
    session: SessionState,
    release: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl ProfileSource for HeldRefresh {
    async fn refresh_profile(&self) -> Result<AuthState, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        let state = self
            .session
            .update_profile("tkn", UserProfile::with_audit(AuditStatus::Passed))
            .await?;
        Ok(state.unwrap_or(AuthState::Anonymous))
    }
}

#[tokio::test]
async fn navigations_during_the_cold_refresh_wait_for_it() {
    let session = SessionState::ephemeral();
    session.establish("tkn", UserProfile::with_audit(AuditStatus::Pending)).await.unwrap();
    let source = Arc::new(HeldRefresh {
        session: session.clone(),
        release: Notify::new(),
        calls: AtomicUsize::new(0),
    });
    let navigator = Navigator::with_routes(
        session.clone(),
        RouteTable::standard(),
        Some(Arc::clone(&source) as Arc<dyn ProfileSource>),
    );

    let first = tokio::spawn({
        let navigator = navigator.clone();
        async move { navigator.navigate("/services/cage").await }
    });
    while source.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    let second = tokio::spawn({
        let navigator = navigator.clone();
        async move { navigator.navigate("/services/cage").await }
    });
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert!(!second.is_finished(), "guard must not decide on the persisted profile");

    source.release.notify_one();
    assert_eq!(
        second.await.unwrap(),
        Navigation::Arrived(Location { path: "/services/cage".into(), title: Some("笼位租赁") })
    );
    assert_eq!(first.await.unwrap(), Navigation::Superseded);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.auth_state(), AuthState::Passed);
}
