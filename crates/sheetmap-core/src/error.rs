use thiserror::Error;

use sheetmap_model::{DocumentError, ValueKind};

/// Discovery/schema-resolution failures. Raised the first time a type's
/// bindings are described; fatal to the operation that triggered discovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("type `{type_name}` declares duplicate write header `{header}`")]
    DuplicateHeader {
        type_name: &'static str,
        header: &'static str,
    },

    #[error("field `{type_name}.{field}` carries column metadata without a header name")]
    MissingFieldMetadata {
        type_name: &'static str,
        field: &'static str,
    },

    /// A write was attempted for a type whose schema resolves to zero
    /// write-bound columns, so no sheet layout can be derived from it.
    #[error("type `{type_name}` has no write-bound columns")]
    NoWriteColumns { type_name: &'static str },
}

/// A cell whose physical kind conflicts with the field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} `{raw}`")]
pub struct CoerceError {
    pub expected: ValueKind,
    pub found: &'static str,
    pub raw: String,
}

/// Failure of a whole `create`/`map` call. Fail-fast: no partial documents
/// or partial object lists survive any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("row {row}, column `{header}`: {source}")]
    Coercion {
        /// Zero-based data-row index (header row excluded).
        row: usize,
        header: String,
        #[source]
        source: CoerceError,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),
}
