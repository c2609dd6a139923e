use std::hash::Hasher;
use std::path::{Path, PathBuf};

use compio::fs::File;
use compio::io::AsyncReadAt;
use derive_more::Display;
use metrohash::MetroHash128;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::ext::{AsyncTryFrom, BestEffortPathExt};

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// 128-bit content digest of a single file, displayed as uppercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{_0:032X}")]
pub struct FileDigest(u128);

impl FileDigest {
    #[cfg(test)]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut hasher = MetroHash128::default();
        hasher.write(bytes);
        Self::from_hasher(&hasher)
    }

    fn from_hasher(hasher: &MetroHash128) -> Self {
        let (high, low) = hasher.finish128();
        FileDigest((u128::from(high) << 64) | u128::from(low))
    }
}

impl<'a> AsyncTryFrom<&'a Path> for FileDigest {
    type Error = DigestError;

    async fn async_try_from(path: &'a Path) -> Result<Self, Self::Error> {
        let metadata = path.metadata().context(PathSnafu {
            path: path.to_path_buf(),
        })?;

        if metadata.is_dir() {
            return Err(DigestError::DirectoryError {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).await.context(PathSnafu {
            path: path.to_path_buf(),
        })?;

        let mut hasher = MetroHash128::default();
        let mut buffer = Vec::with_capacity(READ_CHUNK_SIZE);
        let mut position = 0u64;

        loop {
            let result = file.read_at(buffer, position).await;
            buffer = result.1;
            let read = result.0.context(PathSnafu {
                path: path.to_path_buf(),
            })?;
            if read == 0 {
                break;
            }

            hasher.write(&buffer[..read]);
            position += read as u64;
            buffer.clear();
        }

        let digest = Self::from_hasher(&hasher);
        debug!("Hashed {} ({position} bytes): {digest}", path.display());
        Ok(digest)
    }
}

#[derive(Debug, Snafu)]
pub enum DigestError {
    #[snafu(display("Failed to read file for hashing: {}", path.best_effort_path_display()))]
    PathError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("The supplied path {} is a directory", path.best_effort_path_display()))]
    DirectoryError { path: PathBuf },
}
