//! Chunked record scanner — parses a tab-separated ISO-8859-1 byte stream
//! into bounded batches of projected records.
//!
//! Only the manifest's columns are ever decoded; everything else in a row
//! stays as raw bytes and is dropped with the row buffer. The scanner is a
//! one-shot cursor: it reads forward in stream order and cannot rewind.

use std::io::Read;

use encoding_rs::mem::decode_latin1;

use crate::error::ExtractError;
use crate::manifest::{self, ColumnKind};
use crate::record::{Record, Value};

/// Streaming scanner over one payload file.
///
/// Yields `Result<Vec<Record>, ExtractError>` chunks of up to `chunk_size`
/// rows each, in file order.
#[derive(Debug)]
pub struct ChunkScanner<R: Read> {
    reader: csv::Reader<R>,
    /// Field index in the source row for each manifest column, in
    /// manifest order.
    projection: Vec<usize>,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> ChunkScanner<R> {
    /// Build a scanner over `input`, resolving the manifest's source
    /// columns against the header row.
    pub fn new(input: R, chunk_size: usize) -> Result<Self, ExtractError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(input);

        let headers = reader
            .byte_headers()
            .map_err(|e| ExtractError::Parse { reason: e.to_string() })?;
        let names: Vec<String> = headers
            .iter()
            .map(|field| decode_latin1(field).trim().to_string())
            .collect();

        let mut projection = Vec::with_capacity(manifest::COLUMNS.len());
        let mut missing = Vec::new();
        for column in &manifest::COLUMNS {
            match names.iter().position(|name| name == column.source) {
                Some(index) => projection.push(index),
                None => missing.push(column.source.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(ExtractError::MissingColumns { missing });
        }

        Ok(Self {
            reader,
            projection,
            chunk_size,
            done: false,
        })
    }

    /// Decode, trim, and type one projected row.
    fn parse_record(&self, raw: &csv::ByteRecord) -> Record {
        let mut values = Vec::with_capacity(manifest::COLUMNS.len());
        for (column, &field_index) in manifest::COLUMNS.iter().zip(&self.projection) {
            let bytes = raw.get(field_index).unwrap_or(b"");
            let decoded = decode_latin1(bytes);
            let trimmed = decoded.trim();
            let value = if trimmed.is_empty() {
                Value::Missing
            } else {
                match column.kind {
                    ColumnKind::Numeric => parse_comma_decimal(trimmed)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::Text(trimmed.to_string())),
                    _ => Value::Text(trimmed.to_string()),
                }
            };
            values.push(value);
        }
        Record::new(values)
    }
}

impl<R: Read> Iterator for ChunkScanner<R> {
    type Item = Result<Vec<Record>, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = Vec::new();
        let mut raw = csv::ByteRecord::new();
        while chunk.len() < self.chunk_size {
            match self.reader.read_byte_record(&mut raw) {
                Ok(true) => chunk.push(self.parse_record(&raw)),
                Ok(false) => {
                    self.done = true;
                    break;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(ExtractError::Parse { reason: e.to_string() }));
                }
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}

/// Parse a number that uses `,` as its fractional separator.
fn parse_comma_decimal(text: &str) -> Option<f64> {
    if text.chars().filter(|&c| c == ',').count() > 1 {
        return None;
    }
    text.replace(',', ".").parse::<f64>().ok()
}
