use crate::decode::DecodeContext;
use crate::error::{DecodeError, DecodeResult, ShapeError, kind_name};
use crate::fields::Fields;
use crate::format::ANCHOR_SIGIL;
use crate::relation::CollectionRelation;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use tracing::trace;

/// Target of a relation member.
///
/// Authors may write the `to` key in three shapes:
/// - `to: users.id` - a bare string naming the target field,
/// - `to: [users, admins]` - a list of target collections,
/// - `to: { collections: [users], field: id }` - both at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberTo {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawMemberTo {
    #[serde(default)]
    collections: Option<Vec<String>>,
    #[serde(default)]
    field: Option<String>,
}

impl MemberTo {
    /// Decode a parsed `to` node.
    pub fn decode(value: &Value, cx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        cx.scoped("to", |cx| {
            Self::from_value(value).map_err(|source| DecodeError::MalformedRelation {
                context: cx.path(),
                source,
            })
        })
    }

    /// Decode a raw `to` fragment.
    pub fn from_fragment(fragment: &str, cx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let parsed = serde_yaml::from_str::<Value>(fragment).and_then(|mut value| {
            value.apply_merge()?;
            Ok(value)
        });
        match parsed {
            Ok(value) => Self::decode(&value, cx),
            Err(e) => cx.scoped("to", |cx| {
                Err(DecodeError::MalformedRelation {
                    context: cx.path(),
                    source: e.into(),
                })
            }),
        }
    }

    fn from_value(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::String(field) => Ok(Self {
                collections: Vec::new(),
                field: field.clone(),
            }),
            Value::Sequence(items) => {
                let collections = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s.clone()),
                        other => Err(ShapeError::Unexpected {
                            expected: "sequence of strings",
                            found: kind_name(other),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self {
                    collections,
                    field: String::new(),
                })
            }
            Value::Mapping(_) => {
                let raw = RawMemberTo::deserialize(value)?;
                Ok(Self {
                    collections: raw.collections.unwrap_or_default(),
                    field: raw.field.unwrap_or_default(),
                })
            }
            other => Err(ShapeError::Unexpected {
                expected: "string, sequence of strings, or mapping",
                found: kind_name(other),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for MemberTo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// One field of a collection, in canonical form.
///
/// A member is written either as a bare type name (`title: string`) or as a
/// mapping carrying `type` and the optional keys below.
///
/// `clone` is a deep copy that keeps the downstream-populated `searchable`,
/// `analyzer` and `relation` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<MemberTo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,

    /// Collection that supersedes the member's logical type.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub replacement_collection: String,

    /// Allowed replacement values, in authored order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replacement_enum: Vec<String>,

    /// How `replacement_enum`/`replacement_collection` are enforced; interpreted by consumers.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub restriction_mode: String,

    pub required: bool,

    /// Set by downstream index builders, never by decode.
    #[serde(skip)]
    pub searchable: bool,

    /// Set by downstream index builders, never by decode.
    #[serde(skip)]
    pub analyzer: Option<String>,

    /// Set by relation resolution, never by decode.
    #[serde(skip)]
    pub relation: Option<CollectionRelation>,

    /// Declaration order number assigned when the member was decoded.
    pub order: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMember {
    #[serde(rename = "type")]
    kind: Option<String>,
    description: Option<String>,
    to: Option<Value>,
    fields: Option<Value>,
    replacement_collection: Option<String>,
    replacement_enum: Option<Vec<String>>,
    restriction_mode: Option<String>,
    required: Option<bool>,
}

impl Member {
    /// Decode a parsed member node, drawing its order number from `cx`.
    ///
    /// The number is drawn before the shape is inspected, so a node that
    /// fails to decode still consumes one. A parsed node carries no anchor
    /// marks, so unlike [`Member::from_fragment`] this always yields a
    /// numbered member.
    pub fn decode(value: &Value, cx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        let order = cx.next_order();
        Self::decode_ordered(value, order, cx)
    }

    /// Decode a raw member fragment.
    ///
    /// A fragment starting with the anchor sigil defines a reusable node
    /// rather than a member: it yields `Member::default()` and draws no order
    /// number.
    pub fn from_fragment(fragment: &str, cx: &mut DecodeContext<'_>) -> DecodeResult<Self> {
        if fragment.as_bytes().first() == Some(&ANCHOR_SIGIL) {
            trace!(path = %cx.path(), "skipping anchor definition");
            return Ok(Self::default());
        }

        let order = cx.next_order();
        let value = serde_yaml::from_str::<Value>(fragment)
            .and_then(|mut value| {
                value.apply_merge()?;
                Ok(value)
            })
            .map_err(|e| DecodeError::MalformedMember {
                context: cx.path(),
                source: e.into(),
            })?;
        Self::decode_ordered(&value, order, cx)
    }

    fn decode_ordered(
        value: &Value,
        order: i32,
        cx: &mut DecodeContext<'_>,
    ) -> DecodeResult<Self> {
        let member = match value {
            Value::String(kind) => Self {
                kind: kind.clone(),
                order,
                ..Self::default()
            },
            Value::Mapping(_) => {
                let raw =
                    RawMember::deserialize(value).map_err(|e| DecodeError::MalformedMember {
                        context: cx.path(),
                        source: e.into(),
                    })?;

                let to = match raw.to {
                    Some(v) => Some(MemberTo::decode(&v, cx)?),
                    None => None,
                };
                let fields = match raw.fields {
                    Some(v) => Some(Fields::decode(&v, cx)?),
                    None => None,
                };

                Self {
                    kind: raw.kind.unwrap_or_default(),
                    description: raw.description.unwrap_or_default(),
                    to,
                    fields,
                    replacement_collection: raw.replacement_collection.unwrap_or_default(),
                    replacement_enum: raw.replacement_enum.unwrap_or_default(),
                    restriction_mode: raw.restriction_mode.unwrap_or_default(),
                    required: raw.required.unwrap_or_default(),
                    order,
                    ..Self::default()
                }
            }
            other => {
                return Err(DecodeError::MalformedMember {
                    context: cx.path(),
                    source: ShapeError::Unexpected {
                        expected: "type name or mapping",
                        found: kind_name(other),
                    },
                });
            }
        };

        trace!(path = %cx.path(), kind = %member.kind, order, "decoded member");
        Ok(member)
    }

    /// True if this member points at another collection.
    pub fn is_relation(&self) -> bool {
        self.to.is_some()
    }
}
