use crate::decode::DecodeContext;
use crate::error::{DecodeError, DecodeResult, ShapeError, kind_name};
use crate::member::Member;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Members of one collection (or of a nested object member), keyed by name.
///
/// Iteration through the map is by name; [`Fields::declared`] recovers the
/// authored order from each member's order number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, Member>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a `name -> member` mapping. Members are visited, and numbered,
    /// in document order. A null node decodes to empty fields.
    ///
    /// Every entry is a member, including one whose node defines an anchor
    /// (`a: &x string`): the parser has already dropped the anchor mark, so
    /// the anchor skip of [`Member::from_fragment`] does not apply here.
    pub fn decode(value: &Value, cx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(map) => map,
            other => {
                return Err(DecodeError::MalformedFields {
                    context: cx.path(),
                    source: ShapeError::Unexpected {
                        expected: "mapping of field names to members",
                        found: kind_name(other),
                    },
                });
            }
        };

        let mut out = BTreeMap::new();
        for (key, node) in map {
            let Value::String(name) = key else {
                return Err(DecodeError::MalformedFields {
                    context: cx.path(),
                    source: ShapeError::Unexpected {
                        expected: "string field name",
                        found: kind_name(key),
                    },
                });
            };
            let member = cx.scoped(name, |cx| Member::decode(node, cx))?;
            out.insert(name.clone(), member);
        }
        Ok(Self(out))
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Member> {
        self.0.get_mut(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, member: Member) -> Option<Member> {
        self.0.insert(name.into(), member)
    }

    pub fn remove(&mut self, name: &str) -> Option<Member> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Members in declaration order (ties broken by name).
    pub fn declared(&self) -> Vec<(&str, &Member)> {
        let mut out: Vec<_> = self.iter().collect();
        out.sort_by(|(an, am), (bn, bm)| am.order.cmp(&bm.order).then_with(|| an.cmp(bn)));
        out
    }

    /// Keep only the members for which `keep(collection, field, member)` holds.
    pub fn retain<F>(&mut self, collection: &str, mut keep: F)
    where
        F: FnMut(&str, &str, &Member) -> bool,
    {
        self.0.retain(|name, member| keep(collection, name, member));
    }
}

impl FromIterator<(String, Member)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Member)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
