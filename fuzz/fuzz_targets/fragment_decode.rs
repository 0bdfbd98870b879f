#![no_main]

//! Fuzz target for member, relation, and document decoding.
//!
//! Arbitrary bytes must never panic any decoder; they either decode or return
//! a `DecodeError`.

use libfuzzer_sys::fuzz_target;
use metamodel_types::{DecodeContext, Member, MemberTo, OrderSequencer, Schema};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let seq = OrderSequencer::new();
    let mut cx = DecodeContext::new(&seq);

    let before = seq.current();
    let member = Member::from_fragment(s, &mut cx);
    if s.starts_with('&') {
        assert!(member.is_ok());
        assert_eq!(seq.current(), before);
    }

    let _ = MemberTo::from_fragment(s, &mut cx);

    if let Ok(schema) = Schema::from_yaml_str(s, &mut cx) {
        // Cloning then filtering must leave the decoded schema untouched.
        let mut copy = schema.clone();
        copy.retain(metamodel_types::retain_strings());
        assert!(copy.member_count() <= schema.member_count());
    }
});
