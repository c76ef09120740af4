//! Default backend: the document model serialized as self-describing JSON.
//!
//! Lossless by construction — cell kinds travel as serde tags and decimal
//! values as their exact text — which makes it the reference codec for
//! round-trip behavior.

use sheetmap_model::Document;

use crate::codec::DocumentCodec;
use crate::error::IoError;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentCodec for JsonCodec {
    fn encode(&self, document: &Document) -> Result<Vec<u8>, IoError> {
        Ok(serde_json::to_vec_pretty(document)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document, IoError> {
        let document: Document = serde_json::from_slice(bytes)?;
        // Deserialization bypasses the validating constructor; rebuild so a
        // ragged payload cannot smuggle in a shape violation.
        let (sheet_name, columns, rows) = document.into_parts();
        Ok(Document::new(sheet_name, columns, rows)?)
    }
}
