// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The session record on disk: `<state-dir>/session.json`.

use std::path::Path;

use crate::session::SessionData;

/// File name of the persisted session inside the state directory.
pub const SESSION_FILE: &str = "session.json";

/// Load a persisted session from a JSON file.
pub fn load(path: &Path) -> anyhow::Result<SessionData> {
    let contents = std::fs::read_to_string(path)?;
    let data: SessionData = serde_json::from_str(&contents)?;
    Ok(data)
}

/// Write the session next to its final location, then swap it into place,
/// so a reader never sees a half-written file. The file holds live tokens
/// and is created readable by the owner only.
pub fn save(path: &Path, data: &SessionData) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut staged =
        tempfile::Builder::new().prefix(".session-").suffix(".json").tempfile_in(dir)?;
    serde_json::to_writer_pretty(staged.as_file_mut(), data)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Remove the persisted session. A missing file is not an error.
pub fn remove(path: &Path) -> anyhow::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
