//! Meta model types (schemas-as-code) and their YAML decoders.
//!
//! # Design constraints
//! - Authors may write a member or a relation in several shorthand shapes; decoding normalizes
//!   every shape into one canonical value.
//! - Every decoded member carries a declaration order number drawn from a caller-chosen
//!   [`OrderSequencer`], so authored order survives map-based storage.
//! - Fields populated after decode (`searchable`, `analyzer`, `relation`) are never read from or
//!   written to the document format.

pub mod decode;
pub mod error;
pub mod fields;
pub mod member;
pub mod order;
pub mod relation;
pub mod retain;
pub mod schema;

pub use decode::DecodeContext;
pub use error::{DecodeError, ShapeError};
pub use fields::Fields;
pub use member::{Member, MemberTo};
pub use order::OrderSequencer;
pub use relation::CollectionRelation;
pub use retain::{STRING_TYPES, retain_strings};
pub use schema::Schema;

/// Document format markers.
pub mod format {
    /// First byte of a fragment that defines a YAML anchor rather than a value.
    pub const ANCHOR_SIGIL: u8 = b'&';
}
