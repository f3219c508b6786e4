use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::models::AppData;

/// Returns the path to the snapshot file (`data.json`).
///
/// The path is determined in the following order:
/// 1. `DAYFLOW_DB` environment variable.
/// 2. `~/.local/share/dayflow/data.json` (on Linux).
/// 3. `./data.json` (fallback).
fn db_path() -> PathBuf {
    std::env::var("DAYFLOW_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("dayflow");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("data.json");
        p
    })
}

/// Loads the snapshot from the storage file.
///
/// A missing, unreadable, or unparseable file yields the default snapshot;
/// load failures are never surfaced as errors.
pub fn load_data() -> AppData {
    let path = db_path();
    if !path.exists() {
        return AppData::default();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(_) => return AppData::default(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return AppData::default();
    }
    serde_json::from_str(&s).unwrap_or_default()
}

/// Saves the snapshot to the storage file, replacing it wholesale.
pub fn save_data(data: &AppData) -> std::io::Result<()> {
    let path = db_path();
    let s = export_json(data);
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Pretty-printed JSON of the snapshot, suitable for export files.
pub fn export_json(data: &AppData) -> String {
    serde_json::to_string_pretty(data).expect("snapshot serializes")
}

/// Parses an exported JSON payload into a snapshot.
///
/// Missing top-level fields fall back to their defaults; malformed JSON
/// or a non-object payload is an error and nothing is applied. The caller
/// persists the result.
pub fn import_json(json: &str) -> Result<AppData, serde_json::Error> {
    serde_json::from_str(json)
}

/// Deletes the snapshot file.
pub fn delete_database() -> std::io::Result<()> {
    let path = db_path();
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
