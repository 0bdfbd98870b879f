//! Error types for meta model decoding.
//!
//! Every decode failure names the malformed node's position as a dotted
//! `collection.field` path so problems in large documents can be located.

use thiserror::Error;

/// Structural reason a node could not be decoded.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The node's YAML kind is not one of the accepted shapes.
    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: &'static str,
    },

    /// The YAML was syntactically invalid, or a mapping key held a value of the wrong type.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// The top-level error type for meta model decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A `to` node was neither a string, a list of strings, nor a relation mapping.
    #[error("malformed relation at {context}: {source}")]
    MalformedRelation {
        context: String,
        #[source]
        source: ShapeError,
    },

    /// A member node was neither a type name nor a member mapping.
    #[error("malformed member at {context}: {source}")]
    MalformedMember {
        context: String,
        #[source]
        source: ShapeError,
    },

    /// A `fields` node (or a collection body) was not a mapping of names to members.
    #[error("malformed fields at {context}: {source}")]
    MalformedFields {
        context: String,
        #[source]
        source: ShapeError,
    },

    /// A document root was not a mapping of collection names to fields.
    #[error("malformed schema document: {source}")]
    MalformedSchema {
        #[source]
        source: ShapeError,
    },
}

impl DecodeError {
    /// Dotted path of the node that failed, if the error is tied to one.
    pub fn context(&self) -> Option<&str> {
        match self {
            DecodeError::MalformedRelation { context, .. }
            | DecodeError::MalformedMember { context, .. }
            | DecodeError::MalformedFields { context, .. } => Some(context),
            DecodeError::MalformedSchema { .. } => None,
        }
    }
}

/// Result type alias using DecodeError.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Human-readable name of a YAML node kind, for error messages.
pub(crate) fn kind_name(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
