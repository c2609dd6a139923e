use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use derive_more::From;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::ext::SlashPathExt;

/// Location of a file relative to its tree root.
///
/// This is the key used to match files across the two trees. The raw
/// components are kept so names that are not valid UTF-8 still compare and
/// resolve exactly; only `Display` joins them with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, From)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Physical location of this entry below `root`
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_slash_string())
    }
}

impl From<&str> for RelativePath {
    fn from(value: &str) -> Self {
        RelativePath(PathBuf::from(value))
    }
}

/// How the walker treats links and which names it skips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalOptions {
    pub follow_links: bool,
    pub exclude: Vec<String>,
}

impl TraversalOptions {
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        // The root itself is never excluded
        entry.depth() > 0
            && self
                .exclude
                .iter()
                .any(|name| entry.file_name().to_string_lossy() == name.as_str())
    }
}

/// Regular files found below one root, in traversal order.
#[derive(Debug, Clone)]
pub struct Inventory {
    root: PathBuf,
    entries: Vec<RelativePath>,
    members: HashSet<RelativePath>,
}

impl Inventory {
    /// Walks `root` and records every regular file below it.
    ///
    /// Entries that cannot be read are skipped, so the inventory is best
    /// effort. Children are visited in file name order, making the result
    /// independent of the order the filesystem returns them in.
    pub fn build(root: impl Into<PathBuf>, options: &TraversalOptions) -> Self {
        let root = root.into();
        let mut inventory = Inventory {
            root,
            entries: Vec::new(),
            members: HashSet::new(),
        };
        let mut skipped = 0usize;

        let walker = WalkDir::new(&inventory.root)
            .min_depth(1)
            .follow_links(options.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !options.is_excluded(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    debug!("Skipping unreadable entry: {error}");
                    skipped += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match entry.path().strip_prefix(&inventory.root) {
                Ok(relative) => inventory.insert(relative.to_path_buf().into()),
                Err(_) => {
                    debug!(
                        "Skipping {} as it is not below the root",
                        entry.path().display()
                    );
                    skipped += 1;
                }
            }
        }

        info!(
            "Inventory of {} holds {} files ({} entries skipped)",
            inventory.root.display(),
            inventory.len(),
            skipped
        );
        inventory
    }

    fn insert(&mut self, path: RelativePath) {
        if self.members.insert(path.clone()) {
            self.entries.push(path);
        } else {
            debug!("Ignoring duplicate entry {path}");
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative paths in traversal order
    pub fn iter(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.iter()
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.members.contains(path)
    }

    /// Copy of the membership set, for callers that need to track consumption
    pub fn members(&self) -> HashSet<RelativePath> {
        self.members.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
