//! Row filter — a caller-supplied predicate applied chunk-by-chunk
//! during the scan, before anything is consolidated.

use crate::record::Record;

/// Wraps the include predicate supplied at pipeline construction time.
///
/// The predicate must be pure: no side effects, no row mutation. It is
/// evaluated against every scanned row, so peak memory stays bounded by
/// one chunk plus the rows already kept.
pub struct RowFilter {
    predicate: Box<dyn Fn(&Record) -> bool>,
}

impl RowFilter {
    pub fn new(predicate: impl Fn(&Record) -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }

    /// Keep rows whose `source` column holds exactly `expected`.
    ///
    /// This is the reference invocation's filter shape (a fixed
    /// institution name matched against `Nome Órgao`).
    pub fn column_equals(source: impl Into<String>, expected: impl Into<String>) -> Self {
        let source = source.into();
        let expected = expected.into();
        Self::new(move |record| record.text(&source) == Some(expected.as_str()))
    }

    /// Keep every row.
    pub fn keep_all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, record: &Record) -> bool {
        (self.predicate)(record)
    }

    /// Retain the matching rows of one chunk, preserving their order.
    pub fn retain(&self, mut chunk: Vec<Record>) -> Vec<Record> {
        chunk.retain(|record| self.matches(record));
        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    fn record(orgao: &str) -> Record {
        let mut values = vec![Value::Missing; 10];
        values[0] = Value::Text(orgao.to_string());
        Record::new(values)
    }

    #[test]
    fn column_equals_matches_exactly() {
        let filter = RowFilter::column_equals("Nome Órgao", "UNIVERSIDADE FEDERAL DO CEARA");
        assert!(filter.matches(&record("UNIVERSIDADE FEDERAL DO CEARA")));
        assert!(!filter.matches(&record("UNIVERSIDADE FEDERAL DO CEARÁ")));
        assert!(!filter.matches(&record("OUTRA")));
    }

    #[test]
    fn retain_keeps_order() {
        let filter = RowFilter::column_equals("Nome Órgao", "A");
        let chunk = vec![record("A"), record("B"), record("A")];
        let kept = filter.retain(chunk);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.text("Nome Órgao") == Some("A")));
    }

    #[test]
    fn keep_all_is_identity() {
        let filter = RowFilter::keep_all();
        assert_eq!(filter.retain(vec![record("A"), record("B")]).len(), 2);
    }
}
