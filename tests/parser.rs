//! Integration tests for parsing and canonical serialization

use obo_parser::{
    loads, EntityClause, EntityKind, Error, HeaderClause, Ident, OboDoc,
};

const SMALL: &str = "\
format-version: 1.2
date: 14:06:2023 10:32

[Term]
id: TST:001
name: test item
def: \"A test item.\" [PMID:123]
is_obsolete: false
";

#[test]
fn loads_small_document() {
    let doc = loads(SMALL, 1).expect("parse failed");
    assert_eq!(doc.header().len(), 2);
    assert_eq!(doc.header()[0], HeaderClause::FormatVersion("1.2".into()));
    assert_eq!(doc.len(), 1);

    let term = &doc[0];
    assert_eq!(term.kind(), EntityKind::Term);
    assert_eq!(term.id(), &Ident::prefixed("TST", "001").expect("invalid"));
    assert_eq!(term.name(), Some("test item"));
    assert_eq!(term[2], EntityClause::IsObsolete(false));
    match &term[1] {
        EntityClause::Def { text, xrefs } => {
            assert_eq!(text, "A test item.");
            let xrefs = xrefs.as_ref().expect("expected xrefs");
            assert_eq!(xrefs.len(), 1);
            assert_eq!(xrefs[0].id().to_string(), "PMID:123");
        }
        other => panic!("expected def clause, got {:?}", other),
    }
}

#[test]
fn serialization_is_canonical() {
    let doc = loads(SMALL, 1).expect("parse failed");
    insta::assert_snapshot!(doc.to_string(), @r###"
    format-version: 1.2
    date: 14:06:2023 10:32

    [Term]
    id: TST:001
    name: test item
    def: "A test item." [PMID:123]
    is_obsolete: false
    "###);
}

#[test]
fn fixture_round_trips() {
    let doc = obo_parser::load("tests/data/example.obo", 0).expect("load failed");
    assert_eq!(doc.len(), 3);
    assert_eq!(doc[0].id().to_string(), "GO:0000001");
    assert_eq!(doc[2].kind(), EntityKind::Typedef);

    let rendered = doc.to_string();
    let reparsed = loads(&rendered, 1).expect("reparse failed");
    assert_eq!(reparsed, doc, "round trip changed the document");

    // a second round trip is byte-identical: the rendering is a fixpoint
    assert_eq!(reparsed.to_string(), rendered);
}

#[test]
fn fixture_round_trips_threaded() {
    let doc = obo_parser::load("tests/data/example.obo", 4).expect("load failed");
    let reparsed = loads(&doc.to_string(), 4).expect("reparse failed");
    assert_eq!(reparsed, doc);
}

#[test]
fn unknown_tags_survive_round_trips() {
    let text = "\
ontology: tst
custom-header-tag: kept as-is

[Term]
id: TST:001
some_future_tag: some future value
";
    let doc = loads(text, 1).expect("parse failed");
    assert_eq!(
        doc.header()[1],
        HeaderClause::Unreserved {
            tag: "custom-header-tag".into(),
            value: "kept as-is".into(),
        }
    );
    assert_eq!(
        doc[0][0],
        EntityClause::Unreserved {
            tag: "some_future_tag".into(),
            value: "some future value".into(),
        }
    );
    let reparsed = loads(&doc.to_string(), 1).expect("reparse failed");
    assert_eq!(reparsed, doc);
}

#[test]
fn qualifiers_and_comments_are_accepted() {
    let text = "\
[Term]
id: TST:001
name: widget {source=\"curator\"} ! inline note
";
    let doc = loads(text, 1).expect("parse failed");
    assert_eq!(doc[0][0], EntityClause::Name("widget".into()));
}

#[test]
fn escaped_values_round_trip() {
    let mut term = obo_parser::EntityFrame::new(
        EntityKind::Term,
        Ident::prefixed("TST", "001").expect("invalid"),
    );
    term.push(EntityClause::Name("watch out! {braces} and \"quotes\"".into()));
    term.push(EntityClause::Def {
        text: "a \"quoted\" definition with \\ backslash".into(),
        xrefs: None,
    });
    let mut doc = OboDoc::default();
    doc.push(term);

    let reparsed = loads(&doc.to_string(), 1).expect("reparse failed");
    assert_eq!(reparsed, doc);
}

#[test]
fn document_parses_from_str() {
    let doc: OboDoc = SMALL.parse().expect("parse failed");
    assert_eq!(doc.len(), 1);
}

#[test]
fn model_serializes_to_json() {
    let doc = loads(SMALL, 1).expect("parse failed");
    let json = serde_json::to_value(&doc).expect("serialize failed");
    assert_eq!(json["header"]["clauses"][0]["FormatVersion"], "1.2");
    assert_eq!(json["entities"][0]["id"]["Prefixed"]["prefix"], "TST");
}

#[test]
fn malformed_document_is_a_syntax_error() {
    match loads("hello there", 1) {
        Err(Error::Syntax(e)) => {
            assert_eq!(e.line(), 1);
            assert!(e.message().contains("hello there"));
        }
        other => panic!("expected syntax error, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn empty_document_parses() {
    let doc = loads("", 1).expect("parse failed");
    assert!(doc.header().is_empty());
    assert!(doc.is_empty());
    assert_eq!(doc.to_string(), "");
}
