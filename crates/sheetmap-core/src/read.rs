//! Read-side mapper: [`Document`] in, typed rows out.

use sheetmap_model::Document;

use crate::binding::RowModel;
use crate::error::MapError;
use crate::registry::SchemaRegistry;

/// Materialize one `T` per document row, in document order.
///
/// Header resolution is permissive: a read binding whose header does not
/// appear in the document leaves its field at the type's default (or the
/// binding's declared fallback). Coercion is not: the first cell whose kind
/// conflicts with its field aborts the whole mapping, tagged with the
/// zero-based data-row index and the column header.
pub fn map_rows<T: RowModel>(
    document: &Document,
    registry: &SchemaRegistry,
) -> Result<Vec<T>, MapError> {
    let schema = registry.describe::<T>()?;

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "sheet_map",
        rows = document.rows().len(),
        row_type = schema.type_name()
    )
    .entered();

    let resolved: Vec<(Option<usize>, &crate::binding::ReadColumn<T>)> = schema
        .read_columns()
        .iter()
        .map(|col| (document.header_position(col.header), col))
        .collect();

    let mut out = Vec::with_capacity(document.rows().len());
    for (row_idx, record) in document.rows().iter().enumerate() {
        let mut row = T::default();
        for (position, col) in &resolved {
            match position.and_then(|p| record.cell(p)) {
                Some(value) if !value.is_empty() => {
                    (col.set)(&mut row, value).map_err(|source| MapError::Coercion {
                        row: row_idx,
                        header: col.header.to_string(),
                        source,
                    })?;
                }
                // Blank cell: explicit absence. The declared fallback wins;
                // otherwise the setter sees the blank (a no-op for plain
                // fields, `None` for `Option` fields). Never a kind error.
                Some(blank) => {
                    if let Some(apply) = col.apply_default {
                        apply(&mut row);
                    } else {
                        (col.set)(&mut row, blank).map_err(|source| MapError::Coercion {
                            row: row_idx,
                            header: col.header.to_string(),
                            source,
                        })?;
                    }
                }
                // Unmatched header: the field keeps its default value.
                None => {
                    if let Some(apply) = col.apply_default {
                        apply(&mut row);
                    }
                }
            }
        }
        out.push(row);
    }
    Ok(out)
}
