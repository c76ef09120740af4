//! The collaborator boundary the mapping engine delegates byte I/O to.

use std::fs;
use std::path::Path;

use sheetmap_model::Document;

use crate::error::IoError;

/// Turns a [`Document`] into file bytes and back.
///
/// `decode` must preserve row and column order exactly as physically laid
/// out in the source bytes, and is responsible for classifying each raw
/// cell's kind — the mapping engine trusts that classification.
pub trait DocumentCodec {
    fn encode(&self, document: &Document) -> Result<Vec<u8>, IoError>;
    fn decode(&self, bytes: &[u8]) -> Result<Document, IoError>;
}

/// Encode and write to `path`. The file handle is scoped to this call and
/// released on every exit path before the error propagates.
pub fn persist<C: DocumentCodec>(
    codec: &C,
    document: &Document,
    path: impl AsRef<Path>,
) -> Result<(), IoError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("persist_document", path = %path.as_ref().display()).entered();

    let bytes = codec.encode(document)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Read `path` and decode into a [`Document`].
pub fn load<C: DocumentCodec>(codec: &C, path: impl AsRef<Path>) -> Result<Document, IoError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("load_document", path = %path.as_ref().display()).entered();

    let bytes = fs::read(path)?;
    codec.decode(&bytes)
}
