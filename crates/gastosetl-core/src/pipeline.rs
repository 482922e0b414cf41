//! Pipeline orchestration — drives the single-pass
//! extract → normalize → rename → write run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::archive::SourceArchive;
use crate::dataset::Dataset;
use crate::encoder;
use crate::error::ExtractError;
use crate::filter::RowFilter;
use crate::manifest::DEFAULT_CHUNK_SIZE;
use crate::scanner::ChunkScanner;
use crate::writer;

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory scanned for `*.zip` inputs.
    pub input_dir: PathBuf,
    /// Directory receiving `dataset.csv` and the encoder tables.
    pub output_dir: PathBuf,
    /// Rows per scanner chunk.
    pub chunk_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Stage of the single-pass run. Any failure aborts the whole run;
/// there is no checkpoint or resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Init,
    Extracting,
    Normalizing,
    Renaming,
    Writing,
    Done,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Extracting => write!(f, "extracting"),
            Self::Normalizing => write!(f, "normalizing"),
            Self::Renaming => write!(f, "renaming"),
            Self::Writing => write!(f, "writing"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Counters reported after a successful run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct PipelineReport {
    /// Archives discovered and processed.
    pub archives: usize,
    /// Rows scanned across all archives, before filtering.
    pub rows_scanned: usize,
    /// Rows retained in the final dataset.
    pub rows_kept: usize,
}

/// The whole extraction pipeline. Single-threaded, sequential; archives
/// are processed in discovery order, chunks in stream order, columns in
/// manifest order.
pub struct Pipeline {
    config: PipelineConfig,
    filter: RowFilter,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, filter: RowFilter) -> Self {
        Self {
            config,
            filter,
            state: PipelineState::Init,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run the pipeline to completion.
    pub fn run(&mut self) -> Result<PipelineReport, ExtractError> {
        info!("building final dataset");
        let mut report = PipelineReport::default();

        self.state = PipelineState::Extracting;
        let archives = discover_archives(&self.config.input_dir)?;
        report.archives = archives.len();
        info!(count = archives.len(), stage = %self.state, "extracting data");

        let mut parts = Vec::with_capacity(archives.len());
        for path in &archives {
            info!(archive = %path.display(), "processing archive");
            parts.push(self.extract_archive(path, &mut report)?);
        }
        let mut dataset = Dataset::concat(parts);
        dataset.fill_missing();
        report.rows_kept = dataset.len();
        info!(
            rows_scanned = report.rows_scanned,
            rows_kept = report.rows_kept,
            "extraction complete"
        );

        self.state = PipelineState::Normalizing;
        info!(stage = %self.state, "normalizing columns");
        encoder::encode_dataset(&mut dataset, &self.config.output_dir)?;

        // Renaming is realized through the public header; the dataset
        // itself carries no column labels to rewrite.
        self.state = PipelineState::Renaming;
        info!(stage = %self.state, "applying public schema");

        self.state = PipelineState::Writing;
        info!(stage = %self.state, "saving final dataset");
        writer::write_dataset(&dataset, &self.config.output_dir.join("dataset.csv"))?;

        self.state = PipelineState::Done;
        info!(stage = %self.state, rows = report.rows_kept, "pipeline complete");
        Ok(report)
    }

    /// Scan, filter, and consolidate one archive.
    fn extract_archive(
        &self,
        path: &Path,
        report: &mut PipelineReport,
    ) -> Result<Dataset, ExtractError> {
        let mut archive = SourceArchive::open(path)?;
        let payload = archive.payload()?;
        let scanner = ChunkScanner::new(payload, self.config.chunk_size)?;

        let mut part = Dataset::new();
        for chunk in scanner {
            let chunk = chunk?;
            report.rows_scanned += chunk.len();
            part.push_chunk(self.filter.retain(chunk));
        }
        Ok(part)
    }
}

/// `*.zip` files under `dir`, sorted by file name so runs are
/// reproducible across filesystems.
pub fn discover_archives(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_zip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if is_zip {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
