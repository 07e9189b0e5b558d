//! Append-only writer for the output playlist.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::playlist::Candidate;

use super::format_entry;

/// Shared, append-only output file. Safe to use from multiple threads;
/// each `append` writes one whole entry under the lock.
pub struct OutputSink {
    file: Mutex<File>,
    path: PathBuf,
    written: std::sync::atomic::AtomicUsize,
}

impl OutputSink {
    /// Create (or truncate) the output file.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output dir: {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create output file: {}", path.display()))?;
        Ok(Self {
            file: Mutex::new(file),
            path: path.to_path_buf(),
            written: std::sync::atomic::AtomicUsize::new(0),
        })
    }

    /// Append one accepted entry and flush it.
    pub fn append(&self, candidate: &Candidate) -> Result<()> {
        let entry = format_entry(candidate);
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow::anyhow!("output file lock poisoned"))?;
        file.write_all(entry.as_bytes())
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        file.flush().context("output flush failed")?;
        self.written
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Ok(())
    }

    /// Number of entries appended so far.
    pub fn entries_written(&self) -> usize {
        self.written.load(std::sync::atomic::Ordering::Relaxed)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
