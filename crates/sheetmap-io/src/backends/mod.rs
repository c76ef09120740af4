#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "umya")]
pub mod xlsx;

#[cfg(feature = "json")]
pub use json::JsonCodec;
#[cfg(feature = "umya")]
pub use xlsx::XlsxCodec;
