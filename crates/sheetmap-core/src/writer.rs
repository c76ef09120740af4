//! Write-side builder: objects in, [`Document`] out.

use std::collections::BTreeMap;

use sheetmap_model::{Column, Document, Record, ValueKind};

use crate::binding::RowModel;
use crate::error::{MapError, SchemaError};
use crate::registry::SchemaRegistry;

/// Sheet name used when the builder is not given one.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Default pixel widths by column kind, applied when neither the binding
/// nor the builder overrides them.
pub fn default_width(kind: ValueKind) -> u32 {
    match kind {
        ValueKind::Integer => 80,
        ValueKind::Decimal => 96,
        ValueKind::Text => 120,
        ValueKind::Boolean => 72,
        ValueKind::Date => 96,
        ValueKind::DateTime => 144,
    }
}

/// Builder that serializes a homogeneous slice of row values into a
/// [`Document`]: header row from the write bindings, one record per value
/// in input order.
///
/// ```
/// # use sheetmap_core::{SheetWriter, SchemaRegistry, RowModel, FieldSpec};
/// # use sheetmap_core::ColumnType;
/// # #[derive(Default)]
/// # struct Entry { label: String }
/// # impl RowModel for Entry {
/// #     fn fields() -> Vec<FieldSpec<Self>> {
/// #         vec![FieldSpec {
/// #             name: "label",
/// #             kind: <String as ColumnType>::KIND,
/// #             read: None,
/// #             write: Some(sheetmap_core::WriteSpec { header: Some("Label"), order: 1, width: None }),
/// #             get: |row| ColumnType::to_cell(&row.label),
/// #             set: |row, cell| { if let Some(v) = ColumnType::from_cell(cell)? { row.label = v; } Ok(()) },
/// #         }]
/// #     }
/// # }
/// let registry = SchemaRegistry::new();
/// let rows = vec![Entry { label: "first".into() }];
/// let doc = SheetWriter::new(&rows)
///     .sheet_name("Entries")
///     .column_width(1, 140)
///     .create(&registry)?;
/// assert_eq!(doc.sheet_name(), "Entries");
/// # Ok::<(), sheetmap_core::MapError>(())
/// ```
pub struct SheetWriter<'a, T: RowModel> {
    rows: &'a [T],
    sheet_name: Option<String>,
    widths: BTreeMap<usize, u32>,
}

impl<'a, T: RowModel> SheetWriter<'a, T> {
    pub fn new(rows: &'a [T]) -> Self {
        Self {
            rows,
            sheet_name: None,
            widths: BTreeMap::new(),
        }
    }

    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Pixel-width override for a 1-based column index. Indices beyond the
    /// schema's column count are accepted and have no effect — width is
    /// cosmetic, not structural.
    pub fn column_width(mut self, index: usize, pixels: u32) -> Self {
        self.widths.insert(index, pixels);
        self
    }

    /// Materialize the document. Fail-fast: any schema failure aborts the
    /// whole build with no partial document.
    pub fn create(self, registry: &SchemaRegistry) -> Result<Document, MapError> {
        let schema = registry.describe::<T>()?;
        let write = schema.write_columns();
        if write.is_empty() {
            return Err(SchemaError::NoWriteColumns {
                type_name: schema.type_name(),
            }
            .into());
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "sheet_write",
            rows = self.rows.len(),
            columns = write.len(),
            row_type = schema.type_name()
        )
        .entered();

        let columns: Vec<Column> = write
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                let width = self
                    .widths
                    .get(&(idx + 1))
                    .copied()
                    .or(col.width)
                    .unwrap_or_else(|| default_width(col.kind));
                Column::new(col.header, Some(width))
            })
            .collect();

        let records: Vec<Record> = self
            .rows
            .iter()
            .map(|row| Record::new(write.iter().map(|col| (col.get)(row)).collect()))
            .collect();

        let name = self
            .sheet_name
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
        Ok(Document::new(name, columns, records)?)
    }
}
