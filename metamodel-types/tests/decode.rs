//! Decoding members and relations through the public API.

use metamodel_types::{
    DecodeContext, DecodeError, Fields, Member, MemberTo, OrderSequencer, Schema, order,
};
use pretty_assertions::assert_eq;

fn member(src: &str, seq: &OrderSequencer) -> Result<Member, DecodeError> {
    let mut cx = DecodeContext::new(seq);
    Member::from_fragment(src, &mut cx)
}

fn relation(src: &str) -> Result<MemberTo, DecodeError> {
    let seq = OrderSequencer::new();
    let mut cx = DecodeContext::new(&seq);
    MemberTo::from_fragment(src, &mut cx)
}

#[test]
fn relation_shapes_normalize() {
    assert_eq!(
        relation("\"posts\"").unwrap(),
        MemberTo {
            collections: vec![],
            field: "posts".to_string(),
        }
    );
    assert_eq!(
        relation("- a\n- b\n- c\n").unwrap(),
        MemberTo {
            collections: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            field: String::new(),
        }
    );
    assert_eq!(
        relation("collections: [users, groups]\nfield: owner\n").unwrap(),
        MemberTo {
            collections: vec!["users".to_string(), "groups".to_string()],
            field: "owner".to_string(),
        }
    );
}

#[test]
fn relation_rejects_scalars_that_are_not_strings() {
    for src in ["12", "3.5", "true", "~"] {
        let err = relation(src).unwrap_err();
        assert!(
            matches!(err, DecodeError::MalformedRelation { .. }),
            "{src} should be a malformed relation, got {err}"
        );
    }
}

#[test]
fn anchor_fragment_leaves_sequencer_untouched() {
    let seq = OrderSequencer::starting_after(10);
    let before = seq.current();

    let m = member("&shared\n  type: string\n", &seq).unwrap();

    assert_eq!(m, Member::default());
    assert_eq!(seq.current(), before);
    assert_eq!(member("string", &seq).unwrap().order, before + 1);
}

#[test]
fn consecutive_members_get_contiguous_orders() {
    let seq = OrderSequencer::starting_after(99);
    let orders: Vec<i32> = ["string", "{type: integer}", "text", "{type: relation, to: users}"]
        .into_iter()
        .map(|src| member(src, &seq).unwrap().order)
        .collect();
    assert_eq!(orders, vec![100, 101, 102, 103]);
}

#[test]
fn member_mapping_with_nested_fields_and_relation() {
    let seq = OrderSequencer::new();
    let src = r#"
type: object
description: Postal address
required: true
fields:
  street: string
  country:
    type: relation
    to:
      collections: [countries]
      field: code
"#;
    let m = member(src, &seq).unwrap();
    assert_eq!(m.kind, "object");
    assert_eq!(m.description, "Postal address");
    assert!(m.required);
    assert_eq!(m.order, 1);

    let fields = m.fields.as_ref().expect("nested fields");
    assert_eq!(fields.len(), 2);
    assert_eq!(fields.get("street").unwrap().order, 2);

    let country = fields.get("country").unwrap();
    assert_eq!(country.order, 3);
    assert_eq!(
        country.to,
        Some(MemberTo {
            collections: vec!["countries".to_string()],
            field: "code".to_string(),
        })
    );
}

#[test]
fn fields_errors_propagate_unwrapped() {
    let seq = OrderSequencer::new();
    let err = member("{type: object, fields: [a, b]}", &seq).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedFields { .. }));
}

#[test]
fn member_error_names_collection_and_field() {
    let seq = OrderSequencer::new();
    let mut cx = DecodeContext::new(&seq);
    let err = Schema::from_yaml_str("posts:\n  title: string\n  tags: [a]\n", &mut cx).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedMember { .. }));
    assert!(err.to_string().contains("posts.tags"), "{err}");
}

#[test]
fn merge_keys_fill_member_from_anchor() {
    let seq = OrderSequencer::new();
    let mut cx = DecodeContext::new(&seq);
    let src = "posts:\n  base: &d\n    type: string\n    required: true\n  title:\n    <<: *d\n    description: x\n";
    let schema = Schema::from_yaml_str(src, &mut cx).unwrap();

    let posts = schema.collection("posts").unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.get("<<").is_none());

    let title = posts.get("title").unwrap();
    assert_eq!(title.kind, "string");
    assert_eq!(title.description, "x");
    assert!(title.required);
    assert_eq!(title.order, 2);
}

#[test]
fn merge_keys_apply_inside_fragments() {
    let seq = OrderSequencer::new();
    let src = r#"
type: object
fields:
  base: &b {type: text, required: true}
  name:
    <<: *b
    description: Display name
"#;
    let m = member(src, &seq).unwrap();
    let name = m.fields.as_ref().unwrap().get("name").unwrap();
    assert_eq!(name.kind, "text");
    assert!(name.required);
    assert_eq!(name.description, "Display name");

    assert_eq!(
        relation("<<: {collections: [users]}\nfield: id\n").unwrap(),
        MemberTo {
            collections: vec!["users".to_string()],
            field: "id".to_string(),
        }
    );
}

#[test]
fn scalar_merge_value_is_a_malformed_schema() {
    let seq = OrderSequencer::new();
    let mut cx = DecodeContext::new(&seq);
    let err = Schema::from_yaml_str("posts:\n  title:\n    <<: string\n", &mut cx).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedSchema { .. }), "{err}");
}

#[test]
fn aliased_member_copies_the_anchored_node() {
    let seq = OrderSequencer::new();
    let mut cx = DecodeContext::new(&seq);
    let src = "posts:\n  base: &d {type: text, required: true}\n  copy: *d\n";
    let schema = Schema::from_yaml_str(src, &mut cx).unwrap();

    let copy = schema.member("posts", "copy").unwrap();
    assert_eq!(copy.kind, "text");
    assert!(copy.required);
    assert_eq!(copy.order, 2);
}

#[test]
fn anchored_member_in_document_is_numbered() {
    let seq = OrderSequencer::new();
    let mut cx = DecodeContext::new(&seq);
    let schema = Schema::from_yaml_str("posts:\n  a: &x string\n  b: *x\n", &mut cx).unwrap();

    let a = schema.member("posts", "a").unwrap();
    let b = schema.member("posts", "b").unwrap();
    assert_eq!((a.kind.as_str(), a.order), ("string", 1));
    assert_eq!((b.kind.as_str(), b.order), ("string", 2));
    assert_eq!(seq.current(), 2);
}

#[test]
fn global_context_draws_from_process_sequencer() {
    let before = order::global().current();
    let mut cx = DecodeContext::global();
    let m = Member::from_fragment("string", &mut cx).unwrap();
    // Other tests may draw concurrently, so only a lower bound holds.
    assert!(m.order > before);
}

#[test]
fn decoded_fields_can_be_built_by_hand() {
    let fields: Fields = [(
        "title".to_string(),
        Member {
            kind: "string".to_string(),
            order: 1,
            ..Member::default()
        },
    )]
    .into_iter()
    .collect();
    assert_eq!(fields.declared()[0].0, "title");
}
