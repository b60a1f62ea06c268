use resbook_kernel::config::{ConfigError, load_config, load_config_with_env};
use resbook_kernel::domain::config::ClientConfig;
use std::io::Write;

fn write_config(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("resbook.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
            [api]
            base_url = "https://booking.example.org/api"

            [booking]
            cage_advance_days = 14
        "#,
    );

    let cfg: ClientConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.api.base_url, "https://booking.example.org/api");
    assert_eq!(cfg.api.timeout_ms, 15_000);
    assert_eq!(cfg.booking.cage_advance_days, 14);
    assert_eq!(cfg.booking.equipment_advance_days, 7);
}

#[test]
fn environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[api]\ntimeout_ms = 1000\n");

    let vars = [
        ("RESBOOK__API__TIMEOUT_MS".to_owned(), "2500".to_owned()),
        ("RESBOOK__STORAGE__DIR".to_owned(), "/var/lib/resbook".to_owned()),
        ("UNRELATED__API__TIMEOUT_MS".to_owned(), "1".to_owned()),
    ];
    let cfg: ClientConfig = load_config_with_env(Some(&path), vars).unwrap();

    assert_eq!(cfg.api.timeout_ms, 2500);
    assert_eq!(cfg.storage.dir, std::path::PathBuf::from("/var/lib/resbook"));
}

#[test]
fn defaults_apply_without_any_file() {
    let cfg: ClientConfig =
        load_config_with_env(None::<&std::path::Path>, Vec::new()).unwrap();
    assert_eq!(cfg.api.timeout_ms, 15_000);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config::<ClientConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Config { .. }));
}
