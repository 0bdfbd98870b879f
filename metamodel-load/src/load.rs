use crate::settings::{LoadSettings, OrderScope};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use metamodel_types::{DecodeContext, OrderSequencer, Schema, order};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub path: Utf8PathBuf,
    /// File stem of the document (best effort).
    pub name: String,
    pub schema: Result<Schema, SchemaLoadError>,
}

#[derive(Debug, Error, Clone)]
pub enum SchemaLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("decode error: {message}")]
    Decode {
        message: String,
        /// `collection.field` path of the failing node, when known.
        context: Option<String>,
    },
}

/// Decode one schema document, numbering its members from `sequencer`.
pub fn load_schema_file(
    path: &Utf8Path,
    sequencer: &OrderSequencer,
) -> Result<Schema, SchemaLoadError> {
    let src = fs::read_to_string(path).map_err(|e| SchemaLoadError::Io {
        message: e.to_string(),
    })?;

    let mut cx = DecodeContext::new(sequencer);
    Schema::from_yaml_str(&src, &mut cx).map_err(|e| SchemaLoadError::Decode {
        context: e.context().map(str::to_string),
        message: e.to_string(),
    })
}

pub fn load_schemas(
    schema_dir: &Utf8Path,
    settings: &LoadSettings,
) -> anyhow::Result<Vec<LoadedSchema>> {
    let pattern = schema_dir.join(&settings.pattern);
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, scope = ?settings.order_scope, "scanning for schema documents");

    let mut paths = Vec::new();
    for entry in glob(pattern_str).with_context(|| format!("glob {pattern_str}"))? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();
        paths.push(Utf8PathBuf::from(path));
    }

    // Sort before decoding: under the process scope, numbering follows visit order.
    paths.sort();

    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path.file_stem().unwrap_or("unknown").to_string();

        let document_sequencer;
        let sequencer = match settings.order_scope {
            OrderScope::Process => order::global(),
            OrderScope::Document => {
                document_sequencer = OrderSequencer::new();
                &document_sequencer
            }
        };

        debug!(path = %path, "decoding schema document");
        let schema = load_schema_file(&path, sequencer);
        if let Err(err) = &schema {
            debug!(path = %path, error = %err, "schema document failed to load");
        }

        out.push(LoadedSchema { path, name, schema });
    }

    Ok(out)
}
