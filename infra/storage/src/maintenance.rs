use crate::file::TMP_MARKER;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Removes temp files of the `name` document left behind by other (crashed) processes.
pub(crate) async fn purge_tmp(root: &Path, name: &str) {
    let prefix = format!("{name}.json{TMP_MARKER}");
    let own = format!("{prefix}{}.", std::process::id());

    let mut entries = match fs::read_dir(root).await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %root.display(), error = %err, "Temp scan skipped");
            return;
        },
    };

    let mut removed = 0usize;
    let mut failed = 0usize;
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(err) => {
                warn!(path = %root.display(), error = %err, "Temp scan interrupted");
                break;
            },
        };

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else { continue };
        if !file_name.starts_with(&prefix) || file_name.starts_with(&own) {
            continue;
        }

        match fs::remove_file(entry.path()).await {
            Ok(()) => removed += 1,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "Temp removal failed");
                failed += 1;
            },
        }
    }

    if removed > 0 || failed > 0 {
        info!(removed, failed, "Cleaned up temporary store files");
    }
}
