//! Meta crate re-exporting the sheetmap building blocks with sensible
//! defaults. Annotate a struct's fields with `#[read_column]` /
//! `#[write_column]`, derive [`RowModel`], and move collections of it in
//! and out of single-sheet spreadsheet documents through a [`Mapper`].
//!
//! The derive macro expands to paths in this crate, so depend on
//! `sheetmap` (not the underlying crates) when deriving.

mod mapper;

#[cfg(feature = "json")]
pub mod doc_examples;

pub use mapper::{Error, Mapper};

pub use sheetmap_core::{
    default_width, map_rows, CoerceError, ColumnType, FieldSpec, MapError, ReadColumn, ReadSpec,
    RowModel, RowSchema, SchemaError, SchemaRegistry, SheetWriter, WriteColumn, WriteSpec,
    DEFAULT_SHEET_NAME,
};
pub use sheetmap_macros::RowModel;
pub use sheetmap_model::{
    CellValue, Column, Decimal, Document, DocumentError, ParseDecimalError, Record, ValueKind,
};

#[cfg(feature = "json")]
pub use sheetmap_io::JsonCodec;
#[cfg(feature = "umya")]
pub use sheetmap_io::XlsxCodec;
pub use sheetmap_io::{DocumentCodec, IoError};
