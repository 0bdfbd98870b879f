//! Clap-free settings for schema loading.

use serde::Deserialize;

/// Which sequencer numbers the members of a loaded document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderScope {
    /// Draw from the process-wide sequencer: numbers keep increasing across
    /// documents and across calls.
    #[default]
    Process,
    /// Give every document its own sequencer: numbering restarts at 1 per file.
    Document,
}

/// Settings for [`load_schemas`](crate::load_schemas).
#[derive(Debug, Clone)]
pub struct LoadSettings {
    /// Glob pattern, relative to the schema directory.
    pub pattern: String,
    pub order_scope: OrderScope,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            pattern: "*.yaml".to_string(),
            order_scope: OrderScope::default(),
        }
    }
}
