use resbook_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn json_lines_land_in_the_directory() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("logs");

    let logger = Logger::builder()
        .name("resbook")
        .level(LevelFilter::DEBUG)
        .console(false)
        .directory(&dir)
        .keep(2)
        .json(true)
        .install()
        .unwrap();
    assert!(logger.writes_files());
    assert_eq!(logger.directory(), Some(dir.as_path()));

    tracing::info!(order = 7, "cage order submitted");
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let file = fs::read_dir(&dir)
        .unwrap()
        .flatten()
        .map(|entry| entry.path())
        .find(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("resbook") && n.ends_with(".log"))
        })
        .unwrap();

    let text = fs::read_to_string(file).unwrap();
    let line = text.lines().find(|l| l.contains("cage order submitted")).unwrap();
    let record: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(record["fields"]["order"], 7);
}
