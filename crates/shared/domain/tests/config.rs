use resbook_domain::config::{ApiConfig, BookingConfig, ClientConfig, StorageConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let api = ApiConfig::default();
    assert_eq!(api.base_url, "http://127.0.0.1:8080/api");
    assert_eq!(api.timeout_ms, 15_000);

    let storage = StorageConfig::default();
    assert_eq!(storage.dir, std::path::PathBuf::from(".resbook"));
    assert_ne!(storage.token_key, storage.profile_key);

    let booking = BookingConfig::default();
    assert_eq!(booking.equipment_advance_days, 7);
    assert_eq!(booking.cage_advance_days, 7);
    assert_eq!(booking.experiment_advance_days, 7);
}

#[test]
fn client_config_deserializes_partial_sections() {
    let raw = json!({
        "api": { "base_url": "https://booking.example.org/api" },
        "booking": { "cage_advance_days": 30 },
        "logging": { "level": "debug", "dir": "/tmp/logs" }
    });

    let cfg: ClientConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.api.base_url, "https://booking.example.org/api");
    assert_eq!(cfg.api.timeout_ms, 15_000);
    assert_eq!(cfg.booking.cage_advance_days, 30);
    assert_eq!(cfg.booking.equipment_advance_days, 7);
    assert_eq!(cfg.logging.dir.as_deref(), Some(std::path::Path::new("/tmp/logs")));
    assert_eq!(cfg.storage.name, "session");
}

#[test]
fn clones_share_until_mutated() {
    let base = ClientConfig::default();
    let mut tuned = base.clone();
    tuned.api.timeout_ms = 500;

    assert_eq!(base.api.timeout_ms, 15_000);
    assert_eq!(tuned.api.timeout_ms, 500);
}
