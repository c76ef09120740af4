//! Mapping engine: field bindings, schema registry, coercion, and the
//! write/read paths between typed row collections and [`Document`]s.
//!
//! The engine is pure apart from the registry's compute-once cache; it
//! never touches files. Byte-level encoding belongs to the codec layer.

pub mod binding;
pub mod coerce;
pub mod error;
pub mod read;
pub mod registry;
pub mod writer;

pub use binding::{FieldSpec, ReadColumn, ReadSpec, RowModel, RowSchema, WriteColumn, WriteSpec};
pub use coerce::ColumnType;
pub use error::{CoerceError, MapError, SchemaError};
pub use read::map_rows;
pub use registry::SchemaRegistry;
pub use writer::{default_width, SheetWriter, DEFAULT_SHEET_NAME};

// Re-export for convenience
pub use sheetmap_model::{CellValue, Column, Decimal, Document, Record, ValueKind};
