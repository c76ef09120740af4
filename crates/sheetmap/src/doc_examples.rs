use crate::{Mapper, RowModel, SheetWriter};

/// Round-trip a slice of rows through the JSON codec and back.
///
/// This helper is intended for documentation examples to avoid repetitive
/// setup.
///
/// # Example
///
/// ```rust
/// # use sheetmap::doc_examples::round_trip;
/// use sheetmap::RowModel;
///
/// #[derive(Debug, Default, Clone, PartialEq, RowModel)]
/// struct Product {
///     #[read_column(header = "Product Name")]
///     #[write_column(header = "Product Name", order = 1)]
///     name: String,
///
///     #[read_column(header = "Stock Quantity")]
///     #[write_column(header = "Stock Quantity", order = 2)]
///     stock: i32,
/// }
///
/// let products = vec![Product { name: "Laptop".into(), stock: 50 }];
/// let back = round_trip(&products)?;
/// assert_eq!(back, products);
/// # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
/// ```
pub fn round_trip<T: RowModel>(
    rows: &[T],
) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>> {
    let mapper = Mapper::json();
    let bytes = mapper.to_bytes(SheetWriter::new(rows))?;
    Ok(mapper.from_bytes(&bytes)?)
}
