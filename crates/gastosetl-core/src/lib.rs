//! gastosetl-core — streaming extraction and normalization of zipped
//! direct-expenditure records.
//!
//! # Architecture
//!
//! ```text
//! Pipeline → run()
//!     ├── SourceArchive   (zip payload stream)
//!     ├── ChunkScanner    (tab-delimited, ISO-8859-1, bounded chunks)
//!     ├── RowFilter       (caller-supplied predicate, per chunk)
//!     ├── Dataset         (consolidation + sentinel fill)
//!     ├── LabelEncoder    (fit/transform + persisted tables)
//!     └── writer          (public schema rename + dataset.csv)
//! ```

pub mod archive;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod pipeline;
pub mod record;
pub mod scanner;
pub mod writer;

pub use archive::SourceArchive;
pub use dataset::Dataset;
pub use encoder::LabelEncoder;
pub use error::ExtractError;
pub use filter::RowFilter;
pub use manifest::{ColumnKind, ColumnSpec, DEFAULT_CHUNK_SIZE, SENTINEL};
pub use pipeline::{Pipeline, PipelineConfig, PipelineReport, PipelineState};
pub use record::{Record, Value};
pub use scanner::ChunkScanner;
