//! Retention predicates for [`Fields::retain`](crate::Fields::retain) and
//! [`Schema::retain`](crate::Schema::retain).

use crate::member::Member;
use tracing::trace;

/// Member types holding text.
pub const STRING_TYPES: [&str; 4] = ["string", "HTMLStrict", "text", "HTMLPermissive"];

/// Predicate keeping only members whose type holds text.
pub fn retain_strings() -> impl Fn(&str, &str, &Member) -> bool + Copy + Send + Sync + 'static {
    |collection: &str, field: &str, member: &Member| {
        if STRING_TYPES.contains(&member.kind.as_str()) {
            true
        } else {
            trace!(kind = %member.kind, "removing non-string {collection}.{field}");
            false
        }
    }
}
