//! The two entry operations, composed from the engine and a codec.

use std::path::Path;

use sheetmap_core::{map_rows, MapError, RowModel, SchemaRegistry, SheetWriter};
use sheetmap_io::{DocumentCodec, IoError};
use thiserror::Error;

/// Failure of a facade operation: either the mapping engine or the codec.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Io(#[from] IoError),
}

/// Facade owning the schema registry and a codec.
///
/// One `Mapper` can serve any number of row types and any number of
/// concurrent callers; schemas are discovered once per type and shared.
///
/// ```no_run
/// # #[cfg(feature = "json")] {
/// use sheetmap::{Mapper, RowModel, SheetWriter};
///
/// #[derive(Debug, Default, RowModel)]
/// struct Employee {
///     #[read_column(header = "Name")]
///     #[write_column(header = "Name", order = 1)]
///     name: String,
/// }
///
/// let mapper = Mapper::json();
/// let staff = vec![Employee { name: "현수".into() }];
/// mapper.save(SheetWriter::new(&staff).sheet_name("Employee List"), "staff.json")?;
/// let back: Vec<Employee> = mapper.load("staff.json")?;
/// # let _ = back;
/// # }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Mapper<C> {
    registry: SchemaRegistry,
    codec: C,
}

impl<C: DocumentCodec> Mapper<C> {
    pub fn new(codec: C) -> Self {
        Self {
            registry: SchemaRegistry::new(),
            codec,
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Build the document described by `writer` and encode it.
    pub fn to_bytes<T: RowModel>(&self, writer: SheetWriter<'_, T>) -> Result<Vec<u8>, Error> {
        let document = writer.create(&self.registry)?;
        Ok(self.codec.encode(&document)?)
    }

    /// Decode `bytes` and materialize one `T` per data row.
    pub fn from_bytes<T: RowModel>(&self, bytes: &[u8]) -> Result<Vec<T>, Error> {
        let document = self.codec.decode(bytes)?;
        Ok(map_rows(&document, &self.registry)?)
    }

    /// Build, encode and write to `path`.
    pub fn save<T: RowModel>(
        &self,
        writer: SheetWriter<'_, T>,
        path: impl AsRef<Path>,
    ) -> Result<(), Error> {
        let document = writer.create(&self.registry)?;
        sheetmap_io::persist(&self.codec, &document, path)?;
        Ok(())
    }

    /// Read `path`, decode and materialize one `T` per data row.
    pub fn load<T: RowModel>(&self, path: impl AsRef<Path>) -> Result<Vec<T>, Error> {
        let document = sheetmap_io::load(&self.codec, path)?;
        Ok(map_rows(&document, &self.registry)?)
    }
}

#[cfg(feature = "json")]
impl Mapper<sheetmap_io::JsonCodec> {
    /// Mapper over the lossless JSON codec.
    pub fn json() -> Self {
        Self::new(sheetmap_io::JsonCodec::new())
    }
}

#[cfg(feature = "umya")]
impl Mapper<sheetmap_io::XlsxCodec> {
    /// Mapper over the XLSX codec.
    pub fn xlsx() -> Self {
        Self::new(sheetmap_io::XlsxCodec::new())
    }
}
