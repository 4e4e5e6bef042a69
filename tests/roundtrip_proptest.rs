//! Property tests for the round-trip law
//!
//! For any document built from valid model values, serializing and
//! re-parsing must reproduce the same document, frame for frame and
//! clause for clause.

use proptest::prelude::*;

use obo_parser::{
    loads, EntityClause, EntityFrame, EntityKind, HeaderClause, HeaderFrame, Ident, OboDoc, Xref,
    XrefList,
};

fn arb_prefix() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z]{1,7}"
}

fn arb_local() -> impl Strategy<Value = String> {
    "[0-9]{1,7}"
}

fn arb_ident() -> impl Strategy<Value = Ident> {
    prop_oneof![
        (arb_prefix(), arb_local())
            .prop_map(|(p, l)| Ident::prefixed(p, l).expect("invalid prefixed ident")),
        "[a-z_]{1,12}".prop_map(|v| Ident::unprefixed(v).expect("invalid unprefixed ident")),
    ]
}

// printable text without edge whitespace, so values survive the
// parser's trimming
fn arb_name() -> impl Strategy<Value = String> {
    r"[!-~]([ -~]{0,18}[!-~])?"
}

// quoted payloads keep their inner spacing, so anything printable goes
fn arb_def_text() -> impl Strategy<Value = String> {
    "[ -~]{0,30}"
}

fn arb_xrefs() -> impl Strategy<Value = XrefList> {
    prop::collection::vec((arb_ident(), prop::option::of(arb_def_text())), 0..4).prop_map(
        |items| {
            items
                .into_iter()
                .map(|(id, description)| match description {
                    Some(description) => Xref::with_description(id, description),
                    None => Xref::new(id),
                })
                .collect()
        },
    )
}

fn arb_entity() -> impl Strategy<Value = EntityFrame> {
    (
        prop::bool::ANY,
        arb_ident(),
        arb_name(),
        arb_def_text(),
        prop::option::of(arb_xrefs()),
        prop::bool::ANY,
    )
        .prop_map(|(is_term, id, name, def, xrefs, obsolete)| {
            let kind = if is_term {
                EntityKind::Term
            } else {
                EntityKind::Typedef
            };
            let mut frame = EntityFrame::new(kind, id);
            frame.push(EntityClause::Name(name));
            frame.push(EntityClause::Def { text: def, xrefs });
            frame.push(EntityClause::IsObsolete(obsolete));
            frame
        })
}

fn arb_doc() -> impl Strategy<Value = OboDoc> {
    (
        arb_name(),
        prop::collection::vec(arb_entity(), 0..8),
    )
        .prop_map(|(remark, entities)| {
            let mut header = HeaderFrame::new();
            header.push(HeaderClause::FormatVersion("1.2".into()));
            header.push(HeaderClause::Remark(remark));
            OboDoc::new(header, entities)
        })
}

proptest! {
    #[test]
    fn identifiers_round_trip(id in arb_ident()) {
        let rendered = id.to_string();
        let reparsed: Ident = rendered.parse().expect("reparse failed");
        prop_assert_eq!(reparsed, id);
    }

    #[test]
    fn xref_lists_round_trip(xrefs in arb_xrefs()) {
        let rendered = xrefs.to_string();
        let reparsed: XrefList = rendered.parse().expect("reparse failed");
        prop_assert_eq!(reparsed, xrefs);
    }

    #[test]
    fn documents_round_trip(doc in arb_doc()) {
        let rendered = doc.to_string();
        let reparsed = loads(&rendered, 1).expect("reparse failed");
        prop_assert_eq!(reparsed, doc);
    }

    #[test]
    fn documents_round_trip_threaded(doc in arb_doc()) {
        let rendered = doc.to_string();
        let reparsed = loads(&rendered, 2).expect("reparse failed");
        prop_assert_eq!(reparsed, doc);
    }
}
