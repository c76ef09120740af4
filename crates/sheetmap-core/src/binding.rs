//! Field bindings: the configured association between one field of a row
//! type and its spreadsheet column.
//!
//! A row type declares its bindings once (usually through the derive macro,
//! occasionally by hand) as a list of [`FieldSpec`]s in declaration order.
//! [`RowSchema::build`] validates that list and splits it into the ordered
//! write columns and the read columns the engine actually works with, so
//! nothing downstream ever re-checks optional metadata.

use sheetmap_model::{CellValue, ValueKind};

use crate::error::{CoerceError, SchemaError};

/// Read-side configuration of one field.
pub struct ReadSpec<T> {
    /// Header name resolved against the document's header row.
    pub header: Option<&'static str>,
    /// Fallback applied when the header is missing or the cell is blank.
    pub apply_default: Option<fn(&mut T)>,
}

/// Write-side configuration of one field.
#[derive(Debug, Clone, Copy)]
pub struct WriteSpec {
    /// Header emitted into the document's header row.
    pub header: Option<&'static str>,
    /// Column order, ascending; ties keep declaration order.
    pub order: i32,
    /// Explicit pixel width, overriding the per-kind default.
    pub width: Option<u32>,
}

/// One mapped field of a row type, as declared. The accessor and mutator
/// are plain function values resolved when the binding list is produced —
/// there is no name-based dispatch at mapping time.
pub struct FieldSpec<T> {
    pub name: &'static str,
    pub kind: ValueKind,
    pub read: Option<ReadSpec<T>>,
    pub write: Option<WriteSpec>,
    pub get: fn(&T) -> CellValue,
    pub set: fn(&mut T, &CellValue) -> Result<(), CoerceError>,
}

/// A type whose values describe their own column bindings.
///
/// `Default` is the parameterless-construction contract the read mapper
/// relies on; it is a compile-time bound rather than a runtime error.
pub trait RowModel: Default + Send + Sync + 'static {
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Bindings in field declaration order. Fields without column metadata
    /// are simply not listed.
    fn fields() -> Vec<FieldSpec<Self>>;
}

/// A validated write-bound column.
pub struct WriteColumn<T> {
    pub field: &'static str,
    pub header: &'static str,
    pub order: i32,
    pub width: Option<u32>,
    pub kind: ValueKind,
    pub get: fn(&T) -> CellValue,
}

/// A validated read-bound column.
pub struct ReadColumn<T> {
    pub field: &'static str,
    pub header: &'static str,
    pub kind: ValueKind,
    pub set: fn(&mut T, &CellValue) -> Result<(), CoerceError>,
    pub apply_default: Option<fn(&mut T)>,
}

/// The published, immutable binding set of one row type.
pub struct RowSchema<T> {
    type_name: &'static str,
    write: Vec<WriteColumn<T>>,
    read: Vec<ReadColumn<T>>,
}

impl<T: RowModel> RowSchema<T> {
    /// Validate the declared bindings and publish the schema.
    pub(crate) fn build() -> Result<Self, SchemaError> {
        let type_name = T::type_name();
        let mut write = Vec::new();
        let mut read = Vec::new();

        for spec in T::fields() {
            if let Some(read_spec) = spec.read {
                let header = read_spec.header.ok_or(SchemaError::MissingFieldMetadata {
                    type_name,
                    field: spec.name,
                })?;
                read.push(ReadColumn {
                    field: spec.name,
                    header,
                    kind: spec.kind,
                    set: spec.set,
                    apply_default: read_spec.apply_default,
                });
            }
            if let Some(write_spec) = spec.write {
                let header = write_spec.header.ok_or(SchemaError::MissingFieldMetadata {
                    type_name,
                    field: spec.name,
                })?;
                if write.iter().any(|w: &WriteColumn<T>| w.header == header) {
                    return Err(SchemaError::DuplicateHeader { type_name, header });
                }
                write.push(WriteColumn {
                    field: spec.name,
                    header,
                    order: write_spec.order,
                    width: write_spec.width,
                    kind: spec.kind,
                    get: spec.get,
                });
            }
        }

        // Stable: fields sharing an order value keep declaration order.
        write.sort_by_key(|w| w.order);

        Ok(Self {
            type_name,
            write,
            read,
        })
    }
}

impl<T> RowSchema<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Write columns in final column order.
    pub fn write_columns(&self) -> &[WriteColumn<T>] {
        &self.write
    }

    /// Read columns in field declaration order.
    pub fn read_columns(&self) -> &[ReadColumn<T>] {
        &self.read
    }
}
