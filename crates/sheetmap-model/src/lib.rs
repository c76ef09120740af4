//! Shared value and document model for the sheetmap mapping engine.
//!
//! - [`CellValue`] / [`ValueKind`]: raw cell payloads and declared column
//!   kinds.
//! - [`Decimal`]: exact scaled-integer decimal (no binary-float drift).
//! - [`Document`] / [`Column`] / [`Record`]: the tabular artifact exchanged
//!   with the byte-level codec.

pub mod decimal;
pub mod document;
pub mod value;

pub use decimal::{Decimal, ParseDecimalError};
pub use document::{Column, Document, DocumentError, Record};
pub use value::{CellValue, ValueKind};
