//! Shared output buffer keyed by shard path.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::{EngineError, Result};

/// Text accumulated per destination file, flushed in append mode.
///
/// One lock guards both appends and flushes.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    shards: Mutex<HashMap<PathBuf, String>>,
    size: AtomicUsize,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicked writer leaves whole appends behind, so the map stays usable.
    fn shards(&self) -> MutexGuard<'_, HashMap<PathBuf, String>> {
        self.shards.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `text` verbatim to the buffer of `path`.
    pub fn append(&self, path: PathBuf, text: &str) {
        let mut shards = self.shards();
        shards.entry(path).or_default().push_str(text);
        self.size.fetch_add(text.len(), Ordering::Relaxed);
    }

    /// Appends `line` plus a newline.
    pub fn append_line(&self, path: PathBuf, line: &str) {
        let mut shards = self.shards();
        let buf = shards.entry(path).or_default();
        buf.push_str(line);
        buf.push('\n');
        self.size.fetch_add(line.len() + 1, Ordering::Relaxed);
    }

    /// Bytes waiting to be written.
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }

    /// Number of files with pending text.
    pub fn pending_files(&self) -> usize {
        self.shards().len()
    }

    /// Writes every buffer to disk, appending, and empties the map.
    ///
    /// Parent directories are created as needed. A failed file keeps
    /// nothing buffered; the first error is returned after all others
    /// have been attempted.
    pub fn flush(&self) -> Result<usize> {
        let mut shards = self.shards();
        let mut written = 0;
        let mut first_error = None;
        for (path, text) in shards.drain() {
            if text.is_empty() {
                continue;
            }
            match append_to_file(&path, &text) {
                Ok(()) => written += text.len(),
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        self.size.store(0, Ordering::Relaxed);
        drop(shards);

        debug!(event = "output_flushed", bytes = written);
        match first_error {
            Some(e) => Err(e),
            None => Ok(written),
        }
    }
}

fn append_to_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| EngineError::output(parent, e))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| EngineError::output(path, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| EngineError::output(path, e))
}
