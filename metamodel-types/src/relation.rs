/// A relation after it has been resolved against the target collections.
///
/// Relation resolution runs after every document is decoded; until then
/// [`Member::relation`](crate::Member::relation) stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionRelation {
    /// Collection owning the relation member.
    pub collection: String,
    /// Name of the relation member.
    pub field: String,
    /// Collections the relation points at.
    pub target_collections: Vec<String>,
    /// Field on the target collections, empty if the relation targets whole records.
    pub target_field: String,
}
