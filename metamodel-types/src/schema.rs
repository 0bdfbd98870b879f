use crate::decode::DecodeContext;
use crate::error::{DecodeError, DecodeResult, ShapeError, kind_name};
use crate::fields::Fields;
use crate::member::Member;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// One decoded schema document: collection name -> fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub collections: BTreeMap<String, Fields>,
}

impl Schema {
    /// Parse and decode a whole document.
    ///
    /// Aliases are resolved and `<<` merge keys applied before decoding.
    pub fn from_yaml_str(src: &str, cx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        if src.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut value: Value = serde_yaml::from_str(src)
            .map_err(|e| DecodeError::MalformedSchema { source: e.into() })?;
        value
            .apply_merge()
            .map_err(|e| DecodeError::MalformedSchema { source: e.into() })?;
        Self::decode(&value, cx)
    }

    /// Decode a parsed document. Collections are visited in document order,
    /// so member order numbers follow the authored layout.
    ///
    /// `value` is taken as is: callers holding a value with `<<` merge keys
    /// should call [`Value::apply_merge`] first, as [`Schema::from_yaml_str`] does.
    pub fn decode(value: &Value, cx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(map) => map,
            other => {
                return Err(DecodeError::MalformedSchema {
                    source: ShapeError::Unexpected {
                        expected: "mapping of collection names to fields",
                        found: kind_name(other),
                    },
                });
            }
        };

        let mut collections = BTreeMap::new();
        for (key, body) in map {
            let Value::String(name) = key else {
                return Err(DecodeError::MalformedSchema {
                    source: ShapeError::Unexpected {
                        expected: "string collection name",
                        found: kind_name(key),
                    },
                });
            };
            let fields = cx.scoped(name, |cx| Fields::decode(body, cx))?;
            collections.insert(name.clone(), fields);
        }
        Ok(Self { collections })
    }

    pub fn collection(&self, name: &str) -> Option<&Fields> {
        self.collections.get(name)
    }

    /// Look up `collection.field`.
    pub fn member(&self, collection: &str, field: &str) -> Option<&Member> {
        self.collections.get(collection)?.get(field)
    }

    /// Total number of top-level members across all collections.
    pub fn member_count(&self) -> usize {
        self.collections.values().map(Fields::len).sum()
    }

    /// Remove every top-level member for which `keep(collection, field, member)`
    /// is false. Collections left empty stay in the schema.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str, &Member) -> bool,
    {
        for (collection, fields) in &mut self.collections {
            fields.retain(collection, &mut keep);
        }
    }
}
