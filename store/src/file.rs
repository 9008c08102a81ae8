//! File-backed store: an append-only log of length-prefixed bincode frames.
//!
//! Frame layout: `u32` little-endian payload length, then the
//! bincode-serialized [`SubmissionRecord`]. The full index is rebuilt by
//! scanning the log on open. A torn trailing frame (process killed mid
//! append) is discarded on reopen; a bad frame in the middle of the log is
//! corruption and refuses to open.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use wisp_types::{ArtifactId, Timestamp};

use crate::{StoreError, SubmissionOutcome, SubmissionRecord, SubmissionStore};

/// Log file name within the store directory.
pub const LOG_FILE_NAME: &str = "submissions.log";

struct Inner {
    file: File,
    index: HashMap<ArtifactId, Vec<SubmissionRecord>>,
}

pub struct FileStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl FileStore {
    /// Open (or create) the submission log inside `dir`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| StoreError::Backend(format!("create {}: {e}", dir.display())))?;
        let path = dir.join(LOG_FILE_NAME);

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Backend(format!("read {}: {e}", path.display()))),
        };
        let (index, valid_len) = Self::scan(&bytes)?;
        if valid_len < bytes.len() {
            tracing::warn!(
                path = %path.display(),
                discarded = bytes.len() - valid_len,
                "discarding torn trailing frame from submission log"
            );
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::Backend(format!("open {}: {e}", path.display())))?;
        // Drop the torn tail so the next append starts on a frame boundary.
        file.set_len(valid_len as u64)
            .map_err(|e| StoreError::Backend(format!("truncate {}: {e}", path.display())))?;

        Ok(Self {
            path,
            inner: Mutex::new(Inner { file, index }),
        })
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the log, returning the rebuilt index and the byte length of the
    /// last complete frame.
    fn scan(
        bytes: &[u8],
    ) -> Result<(HashMap<ArtifactId, Vec<SubmissionRecord>>, usize), StoreError> {
        let mut index: HashMap<ArtifactId, Vec<SubmissionRecord>> = HashMap::new();
        let mut pos = 0usize;
        while pos < bytes.len() {
            let Some(header) = bytes.get(pos..pos + 4) else {
                break; // torn length prefix
            };
            let len = u32::from_le_bytes(header.try_into().expect("4-byte slice")) as usize;
            let Some(payload) = bytes.get(pos + 4..pos + 4 + len) else {
                break; // torn payload
            };
            let record: SubmissionRecord = bincode::deserialize(payload).map_err(|e| {
                StoreError::Corruption(format!("record at byte {pos} does not parse: {e}"))
            })?;
            index.entry(record.artifact_id).or_default().push(record);
            pos += 4 + len;
        }
        Ok((index, pos))
    }

    fn append(file: &mut File, record: &SubmissionRecord) -> Result<(), StoreError> {
        let payload =
            bincode::serialize(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut frame = Vec::with_capacity(4 + payload.len());
        frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        frame.extend_from_slice(&payload);
        file.write_all(&frame)
            .map_err(|e| StoreError::Backend(format!("append: {e}")))?;
        file.sync_data()
            .map_err(|e| StoreError::Backend(format!("sync: {e}")))?;
        Ok(())
    }
}

impl SubmissionStore for FileStore {
    fn record(
        &self,
        id: ArtifactId,
        outcome: SubmissionOutcome,
    ) -> Result<SubmissionRecord, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let has_accepted = inner
            .index
            .get(&id)
            .is_some_and(|h| h.iter().any(|r| r.outcome.is_accepted()));
        if outcome.is_accepted() && has_accepted {
            return Err(StoreError::Duplicate(id.to_string()));
        }

        let record = SubmissionRecord {
            artifact_id: id,
            attempted_at: Timestamp::now(),
            outcome,
        };
        Self::append(&mut inner.file, &record)?;
        inner.index.entry(id).or_default().push(record.clone());
        Ok(record)
    }

    fn lookup(&self, id: &ArtifactId) -> Result<Option<SubmissionRecord>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.index.get(id).and_then(|h| h.last().cloned()))
    }

    fn is_duplicate(&self, id: &ArtifactId) -> Result<bool, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .index
            .get(id)
            .is_some_and(|h| h.iter().any(|r| r.outcome.is_accepted())))
    }

    fn history(&self, id: &ArtifactId) -> Result<Vec<SubmissionRecord>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.index.get(id).cloned().unwrap_or_default())
    }
}
