//! Collection ingestion for HabitLens.
//!
//! Each exported collection is a bare concatenation of BSON documents. The
//! loader decodes the stream sequentially and materializes it as the
//! column-union [`habitlens_model::Table`]; the decoder itself is the `bson`
//! crate.

pub mod error;
pub mod loader;

pub use error::{IngestError, Result};
pub use loader::{load_collection, read_documents};
