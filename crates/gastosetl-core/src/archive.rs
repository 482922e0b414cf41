//! Source archive reader — exposes the payload of a zip container as a
//! decompressed byte stream.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::ExtractError;

/// An opened input archive.
///
/// Each archive is expected to hold a single tab-separated payload file.
/// Archives with more entries are accepted, but only the first-listed
/// entry is read.
#[derive(Debug)]
pub struct SourceArchive {
    path: PathBuf,
    inner: ZipArchive<BufReader<File>>,
}

impl SourceArchive {
    /// Open an archive and validate that it has at least one entry.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| ExtractError::Archive {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let inner = ZipArchive::new(BufReader::new(file)).map_err(|e| ExtractError::Archive {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if inner.is_empty() {
            return Err(ExtractError::EmptyArchive { path });
        }
        if inner.len() > 1 {
            warn!(
                archive = %path.display(),
                entries = inner.len(),
                "archive has multiple entries; only the first is read"
            );
        }

        Ok(Self { path, inner })
    }

    /// Number of entries in the archive.
    pub fn entry_count(&self) -> usize {
        self.inner.len()
    }

    /// Decompressed byte stream of the first-listed entry.
    ///
    /// One-shot: the stream reads forward only and is consumed by the
    /// caller; reopen the archive to read it again.
    pub fn payload(&mut self) -> Result<impl Read + '_, ExtractError> {
        let entry = self.inner.by_index(0).map_err(|e| ExtractError::Archive {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        debug!(archive = %self.path.display(), entry = entry.name(), "reading payload");
        Ok(entry)
    }
}
