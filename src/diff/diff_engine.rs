use std::collections::HashSet;
use std::path::Path;

use snafu::ResultExt;
use tracing::debug;

use crate::diff::diff_entry::{
    ComparisonError, DiffEntry, DiffReport, DiffStatus, HashSnafu, SizeSnafu,
};
use crate::digest::ContentHasher;
use crate::filesystem::{Inventory, RelativePath};

/// Classifies every path of two inventories.
///
/// Paths of the old inventory are reported first, in its traversal order,
/// followed by the paths only present in the new inventory, in theirs.
/// Files are hashed only when their sizes match.
pub struct DiffEngine<'a, H> {
    old: &'a Inventory,
    new: &'a Inventory,
    hasher: &'a H,
}

impl<'a, H: ContentHasher> DiffEngine<'a, H> {
    pub fn new(old: &'a Inventory, new: &'a Inventory, hasher: &'a H) -> Self {
        Self { old, new, hasher }
    }

    pub async fn run(&self) -> DiffReport {
        let mut remaining: HashSet<RelativePath> = self.new.members();
        let mut report = DiffReport::default();

        for path in self.old.iter() {
            let entry = if remaining.remove(path) {
                match self.compare(path).await {
                    Ok(status) => DiffEntry::classified(path.clone(), status),
                    Err(error) => DiffEntry::failed(path.clone(), error),
                }
            } else {
                DiffEntry::classified(path.clone(), DiffStatus::Deleted)
            };
            debug!("{}: {:?}", entry.path, entry.status);
            report.push(entry);
        }

        for path in self.new.iter().filter(|path| remaining.contains(*path)) {
            debug!("{path}: Added");
            report.push(DiffEntry::classified(path.clone(), DiffStatus::Added));
        }

        report
    }

    /// Compares the two physical files behind a path present in both trees
    async fn compare(&self, path: &RelativePath) -> Result<DiffStatus, ComparisonError> {
        let old_file = path.under(self.old.root());
        let new_file = path.under(self.new.root());

        if file_size(&old_file)? != file_size(&new_file)? {
            return Ok(DiffStatus::Modified);
        }

        let old_digest = self.hasher.hash(&old_file).await.context(HashSnafu)?;
        let new_digest = self.hasher.hash(&new_file).await.context(HashSnafu)?;

        if old_digest == new_digest {
            Ok(DiffStatus::Unchanged)
        } else {
            Ok(DiffStatus::Modified)
        }
    }
}

fn file_size(path: &Path) -> Result<u64, ComparisonError> {
    path.metadata()
        .map(|metadata| metadata.len())
        .context(SizeSnafu { path })
}
