use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use healthpro_core::artifact_names;
use tracing::{debug, info};

use crate::error::StorageError;

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Outcome of committing a staged artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The staged file became the artifact.
    Created,
    /// Another writer got there first; the staged file was discarded.
    AlreadyExists,
}

/// The report output directory.
///
/// Append-only by file name: an artifact is created once and never
/// rewritten. The directory itself is created lazily on first write.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Create the output directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.root.display().to_string(),
                source,
            })
    }

    pub async fn exists(&self, file_name: &str) -> Result<bool, StorageError> {
        let path = self.path_for(file_name);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::io(&path, e))
    }

    /// A fresh, unique path inside the output directory to render into.
    ///
    /// Staging files start with a dot so they never pass the artifact
    /// file-name predicate and cannot be downloaded half-written.
    pub fn staging_path(&self, file_name: &str) -> PathBuf {
        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        self.root
            .join(format!(".{file_name}.{}.{seq}.partial", std::process::id()))
    }

    /// Publish a staged file under `file_name` unless it already exists.
    ///
    /// Uses a hard link, which fails atomically when the target exists, so
    /// concurrent renders for the same name resolve to first writer wins.
    /// The staging file is removed in either case.
    pub async fn commit(&self, staged: &Path, file_name: &str) -> Result<CommitOutcome, StorageError> {
        let target = self.path_for(file_name);
        let outcome = match tokio::fs::hard_link(staged, &target).await {
            Ok(()) => CommitOutcome::Created,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => CommitOutcome::AlreadyExists,
            Err(e) => {
                self.discard(staged).await;
                return Err(StorageError::io(&target, e));
            }
        };
        self.discard(staged).await;

        match outcome {
            CommitOutcome::Created => info!(file_name, "artifact written"),
            CommitOutcome::AlreadyExists => {
                info!(file_name, "artifact already written by a concurrent render, discarding duplicate")
            }
        }
        Ok(outcome)
    }

    /// Best-effort removal of a staging file.
    pub async fn discard(&self, staged: &Path) {
        if let Err(e) = tokio::fs::remove_file(staged).await
            && e.kind() != ErrorKind::NotFound
        {
            debug!(path = %staged.display(), error = %e, "failed to remove staging file");
        }
    }

    /// Read an artifact by name.
    ///
    /// Names that fail [`artifact_names::is_safe_file_name`] are rejected
    /// before touching the filesystem.
    pub async fn read(&self, file_name: &str) -> Result<Vec<u8>, StorageError> {
        if !artifact_names::is_safe_file_name(file_name) {
            return Err(StorageError::InvalidFileName(file_name.to_string()));
        }
        let path = self.path_for(file_name);
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound {
                    file_name: file_name.to_string(),
                }
            } else {
                StorageError::io(&path, e)
            }
        })
    }
}
