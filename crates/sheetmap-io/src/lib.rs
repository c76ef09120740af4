//! Byte-level codecs for the sheetmap [`Document`] model.
//!
//! The mapping engine never opens files; everything byte-shaped funnels
//! through a [`DocumentCodec`]. Two backends ship here: a lossless JSON
//! codec (default) and an XLSX codec behind the `umya` feature.

pub mod backends;
pub mod codec;
pub mod error;

#[cfg(feature = "json")]
pub use backends::JsonCodec;
#[cfg(feature = "umya")]
pub use backends::XlsxCodec;
pub use codec::{load, persist, DocumentCodec};
pub use error::IoError;

// Re-export for convenience
pub use sheetmap_model::Document;
