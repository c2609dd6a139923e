//! Content digests used to decide whether two equally sized files differ.

mod file_digest;

use std::path::Path;

pub use file_digest::{DigestError, FileDigest};

use crate::ext::AsyncTryInto;

/// Computes a content digest for the file at an absolute path.
pub trait ContentHasher {
    async fn hash(&self, path: &Path) -> Result<FileDigest, DigestError>;
}

/// Streams the file through MetroHash128.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetroDigester;

impl ContentHasher for MetroDigester {
    async fn hash(&self, path: &Path) -> Result<FileDigest, DigestError> {
        path.async_try_into().await
    }
}
