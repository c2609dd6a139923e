use std::path::PathBuf;

use derive_more::Display;
use snafu::Snafu;

use crate::digest::DigestError;
use crate::ext::BestEffortPathExt;
use crate::filesystem::RelativePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DiffStatus {
    Unchanged,
    Modified,
    Deleted,
    Added,
}

/// One classified path. `status` holds the error when the file on either side
/// could not be sized or hashed at comparison time.
#[derive(Debug)]
pub struct DiffEntry {
    pub path: RelativePath,
    pub status: Result<DiffStatus, ComparisonError>,
}

impl DiffEntry {
    pub fn classified(path: RelativePath, status: DiffStatus) -> Self {
        Self {
            path,
            status: Ok(status),
        }
    }

    pub fn failed(path: RelativePath, error: ComparisonError) -> Self {
        Self {
            path,
            status: Err(error),
        }
    }

    pub fn status(&self) -> Option<DiffStatus> {
        self.status.as_ref().ok().copied()
    }
}

/// Ordered result of comparing two inventories
#[derive(Debug, Default)]
pub struct DiffReport {
    entries: Vec<DiffEntry>,
}

impl DiffReport {
    pub(super) fn push(&mut self, entry: DiffEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    pub fn failures(&self) -> impl Iterator<Item = (&RelativePath, &ComparisonError)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.status.as_ref().err().map(|error| (&entry.path, error)))
    }

    pub fn summary(&self) -> DiffSummary {
        self.entries
            .iter()
            .fold(DiffSummary::default(), |mut summary, entry| {
                match entry.status {
                    Ok(DiffStatus::Unchanged) => summary.unchanged += 1,
                    Ok(DiffStatus::Modified) => summary.modified += 1,
                    Ok(DiffStatus::Deleted) => summary.deleted += 1,
                    Ok(DiffStatus::Added) => summary.added += 1,
                    Err(_) => summary.failed += 1,
                }
                summary
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub modified: usize,
    pub deleted: usize,
    pub added: usize,
    pub failed: usize,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum ComparisonError {
    #[snafu(display("Failed to query size of {}: {source}", path.best_effort_path_display()))]
    SizeError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to hash file: {source}"))]
    HashError { source: DigestError },
}
