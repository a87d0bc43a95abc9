use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::balance::BalanceRecord;

pub const SNAPSHOT_FILENAME: &str = "coins.json";
#[cfg(unix)]
const SNAPSHOT_MODE: u32 = 0o644;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub coins: Vec<BalanceRecord>,
}

impl Snapshot {
    pub fn new(coins: Vec<BalanceRecord>) -> Self {
        Self { coins }
    }

    pub fn to_pretty_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .context("Failed to serialize balances snapshot")
    }
}

pub fn snapshot_path(public_dir: impl AsRef<Path>) -> PathBuf {
    public_dir.as_ref().join(SNAPSHOT_FILENAME)
}

/// Replaces the file at `path` with `bytes` in a single rename, so readers
/// only ever see the previous or the new content. The temp file is removed
/// when any step fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {:?}", parent))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("Snapshot path {:?} has no file name", path))?;
    let prefix = format!(".{}.", file_name.to_string_lossy());

    let mut temp = temp_file_builder(&prefix)
        .tempfile_in(parent)
        .with_context(|| format!("Failed to create temp file in {:?}", parent))?;
    temp.write_all(bytes).with_context(|| {
        format!("Failed to write temp file {:?}", temp.path())
    })?;
    temp.as_file().sync_all().with_context(|| {
        format!("Failed to sync temp file {:?}", temp.path())
    })?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {:?}", path))?;

    Ok(())
}

fn temp_file_builder(prefix: &str) -> tempfile::Builder<'_, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(prefix).suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(SNAPSHOT_MODE));
    }
    builder
}

pub fn persist_snapshot(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    let content = snapshot.to_pretty_json()?;
    write_atomic(path, content.as_bytes())
}
