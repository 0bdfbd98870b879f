//! Schema document ingestion.
//!
//! Finds schema documents in a directory and decodes each one. A document that
//! cannot be read or decoded does not stop the scan; its error is reported
//! next to the documents that did load, so callers can decide whether one bad
//! file aborts the run.

mod load;
mod settings;

pub use load::{LoadedSchema, SchemaLoadError, load_schema_file, load_schemas};
pub use settings::{LoadSettings, OrderScope};
