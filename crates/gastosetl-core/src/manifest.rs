//! Column manifest — the fixed projection of source columns, their public
//! schema names, and how each one is treated by the pipeline.
//!
//! Behavior is driven by this ordered table, not by runtime column-name
//! lookups: the scanner projects exactly these columns, the encoder walks
//! the categorical entries in this order, and the writer emits the public
//! header in this order.

/// Placeholder written into every absent/missing cell before normalization.
pub const SENTINEL: &str = "NÃO-ESPECIFICADO";

/// Rows per chunk yielded by the scanner.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// How a projected column is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Text whose distinct values are label-encoded into dense codes.
    Categorical,
    /// Text passed through untouched (beyond trimming).
    Text,
    /// Comma-decimal number parsed at scan time.
    Numeric,
}

/// One entry of the column manifest.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Column name as it appears in the source header.
    pub source: &'static str,
    /// Public schema name in the final dataset.
    pub target: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    /// Header label of the persisted encoder table's code column.
    pub fn id_label(&self) -> String {
        format!("{}-ID", self.source)
    }

    /// Column name in the final dataset header.
    pub fn public_name(&self) -> String {
        match self.kind {
            ColumnKind::Categorical => format!("{}-ID", self.target),
            _ => self.target.to_string(),
        }
    }

    pub fn is_categorical(&self) -> bool {
        self.kind == ColumnKind::Categorical
    }
}

/// The fixed column projection, in final-schema order.
pub const COLUMNS: [ColumnSpec; 10] = [
    ColumnSpec { source: "Nome Órgao", target: "orgao", kind: ColumnKind::Categorical },
    ColumnSpec { source: "Nome Elemento Despesa", target: "elemento_despesa", kind: ColumnKind::Categorical },
    ColumnSpec { source: "Nome Função", target: "funcao", kind: ColumnKind::Categorical },
    ColumnSpec { source: "Nome Subfunção", target: "subfuncao", kind: ColumnKind::Categorical },
    ColumnSpec { source: "Nome Programa", target: "programa", kind: ColumnKind::Categorical },
    ColumnSpec { source: "Nome Ação", target: "acao", kind: ColumnKind::Categorical },
    ColumnSpec { source: "Código Favorecido", target: "cod_favorecido", kind: ColumnKind::Categorical },
    ColumnSpec { source: "Nome Favorecido", target: "nome_favorecido", kind: ColumnKind::Categorical },
    ColumnSpec { source: "Data Pagamento", target: "data", kind: ColumnKind::Text },
    ColumnSpec { source: "Valor", target: "valor", kind: ColumnKind::Numeric },
];

/// Position of a source column in the manifest, if projected.
pub fn index_of(source: &str) -> Option<usize> {
    COLUMNS.iter().position(|c| c.source == source)
}

/// Categorical manifest entries with their positions, in manifest order.
pub fn categorical() -> impl Iterator<Item = (usize, &'static ColumnSpec)> {
    COLUMNS
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_categorical())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_covers_ten_columns() {
        assert_eq!(COLUMNS.len(), 10);
        assert_eq!(categorical().count(), 8);
    }

    #[test]
    fn index_of_projected_and_unknown() {
        assert_eq!(index_of("Nome Órgao"), Some(0));
        assert_eq!(index_of("Valor"), Some(9));
        assert_eq!(index_of("Ano"), None);
    }

    #[test]
    fn public_names() {
        assert_eq!(COLUMNS[0].public_name(), "orgao-ID");
        assert_eq!(COLUMNS[8].public_name(), "data");
        assert_eq!(COLUMNS[9].public_name(), "valor");
    }

    #[test]
    fn id_label_uses_source_name() {
        assert_eq!(COLUMNS[0].id_label(), "Nome Órgao-ID");
    }
}
