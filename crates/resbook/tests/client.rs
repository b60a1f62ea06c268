use resbook::domain::config::ClientConfig;
use resbook::gateway::testing::ScriptedTransport;
use resbook::identity::{AuthState, LoginRequest, Navigation};
use resbook::{Client, ClientError};
use serde_json::json;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.storage.dir = dir.path().join("state");
    config
}

#[tokio::test]
async fn fresh_client_is_anonymous_and_guards_routes() {
    let dir = TempDir::new().unwrap();
    let client = Client::with_transport(config_in(&dir), ScriptedTransport::new()).await.unwrap();

    assert_eq!(client.session().auth_state(), AuthState::Anonymous);
    let nav = client.navigator().navigate("/services/equipment").await;
    assert_eq!(nav.location().unwrap().path, "/login?redirect=/services/equipment");
}

#[tokio::test]
async fn session_survives_a_restart_and_expires_through_the_gateway() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::new();
    let client = Client::with_transport(config_in(&dir), transport.clone()).await.unwrap();

    transport.ok(json!({"token": "tkn", "user": {"id": 9, "audit_status": 1}}));
    client.auth().login(&LoginRequest::new("13912345678", "654321")).await.unwrap();
    drop(client);

    let transport = ScriptedTransport::new();
    let client = Client::with_transport(config_in(&dir), transport.clone()).await.unwrap();
    assert_eq!(client.session().auth_state(), AuthState::Passed);

    transport.ok(json!({"audit_status": 1}));
    let nav = client.navigator().navigate("/services/cage").await;
    assert!(matches!(nav, Navigation::Arrived(_)));
    assert_eq!(transport.requests()[0].bearer.as_deref(), Some("tkn"));

    transport.respond(401, r#"{"message": "登录已过期，请重新登录"}"#);
    let slots = client.booking().time_slots(resbook::booking::ResourceKind::Cage).await;
    assert!(slots.is_err());
    assert!(!client.session().is_logged_in());
    assert_eq!(
        client.navigator().current().unwrap().path,
        "/login?redirect=/services/cage"
    );
    drop(client);

    let client = Client::with_transport(config_in(&dir), ScriptedTransport::new()).await.unwrap();
    assert_eq!(client.session().auth_state(), AuthState::Anonymous);
}

#[tokio::test]
async fn advance_days_fall_back_to_configuration() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);
    config.booking.cage_advance_days = 30;
    let transport = ScriptedTransport::new();
    let client = Client::with_transport(config, transport.clone()).await.unwrap();

    transport.offline();
    let days = client.advance_days().await;
    assert_eq!((days.cage, days.equipment), (30, 7));
}

#[tokio::test]
async fn missing_explicit_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = Client::open(Some(missing.as_path())).await.unwrap_err();
    assert!(matches!(err, ClientError::Config { .. }));
}
