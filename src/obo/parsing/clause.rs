//! The clause codec: tag-dispatched parsing of clause payloads
//!
//! One match arm per recognized tag, mirroring the closed clause enums in
//! the model. Unknown tags never fail; they fall through to the
//! `Unreserved` catch-all so format extensions survive round trips.

use crate::obo::ast::date::{self, CreationDate};
use crate::obo::ast::entity::EntityClause;
use crate::obo::ast::header::{HeaderClause, SynonymScope};
use crate::obo::ast::ident::Ident;
use crate::obo::ast::pv::PropertyValue;
use crate::obo::ast::xref::XrefList;
use crate::obo::error::SyntaxError;
use crate::obo::lexing;
use crate::obo::parsing::line::ClauseLine;

fn take_ident<'a>(tag: &str, text: &'a str) -> Result<(Ident, &'a str), SyntaxError> {
    let (raw, rest) = lexing::split_field(text);
    let ident = raw.parse().map_err(|e| {
        SyntaxError::new(format!(
            "invalid identifier {:?} in '{}' clause: {}",
            raw, tag, e
        ))
    })?;
    Ok((ident, rest))
}

fn take_prefix<'a>(tag: &str, text: &'a str) -> Result<(String, &'a str), SyntaxError> {
    let (raw, rest) = lexing::split_field(text);
    if raw.is_empty() {
        return Err(SyntaxError::new(format!(
            "missing idspace prefix in '{}' clause",
            tag
        )));
    }
    Ok((lexing::unescape(raw), rest))
}

fn take_quoted<'a>(tag: &str, text: &'a str) -> Result<(String, &'a str), SyntaxError> {
    lexing::parse_quoted(text)
        .map_err(|e| SyntaxError::new(format!("in '{}' clause: {}", tag, e.message())))
}

fn expect_end(tag: &str, text: &str) -> Result<(), SyntaxError> {
    if text.trim().is_empty() {
        Ok(())
    } else {
        Err(SyntaxError::new(format!(
            "unexpected trailing text {:?} in '{}' clause",
            text, tag
        )))
    }
}

fn final_ident(tag: &str, text: &str) -> Result<Ident, SyntaxError> {
    let (ident, rest) = take_ident(tag, text)?;
    expect_end(tag, rest)?;
    Ok(ident)
}

/// Parse the payload of a header clause line.
pub fn header_clause(line: &ClauseLine<'_>) -> Result<HeaderClause, SyntaxError> {
    let value = line.value;
    match line.tag.as_str() {
        "format-version" => Ok(HeaderClause::FormatVersion(lexing::unescape(value))),
        "data-version" => Ok(HeaderClause::DataVersion(lexing::unescape(value))),
        "date" => date::parse_header_date(value).map(HeaderClause::Date),
        "saved-by" => Ok(HeaderClause::SavedBy(lexing::unescape(value))),
        "auto-generated-by" => Ok(HeaderClause::AutoGeneratedBy(lexing::unescape(value))),
        "import" => final_ident("import", value).map(HeaderClause::Import),
        "subsetdef" => {
            let (subset, rest) = take_ident("subsetdef", value)?;
            let (description, rest) = take_quoted("subsetdef", rest)?;
            expect_end("subsetdef", rest)?;
            Ok(HeaderClause::Subsetdef {
                subset,
                description,
            })
        }
        "synonymtypedef" => {
            let (typedef, rest) = take_ident("synonymtypedef", value)?;
            let (description, rest) = take_quoted("synonymtypedef", rest)?;
            let scope = if rest.is_empty() {
                None
            } else {
                let (raw, trailing) = lexing::split_field(rest);
                expect_end("synonymtypedef", trailing)?;
                Some(raw.parse::<SynonymScope>()?)
            };
            Ok(HeaderClause::SynonymTypedef {
                typedef,
                description,
                scope,
            })
        }
        "default-namespace" => final_ident("default-namespace", value).map(HeaderClause::DefaultNamespace),
        "idspace" => {
            let (prefix, rest) = take_prefix("idspace", value)?;
            let (url, rest) = take_ident("idspace", rest)?;
            let description = if rest.is_empty() {
                None
            } else {
                let (description, trailing) = take_quoted("idspace", rest)?;
                expect_end("idspace", trailing)?;
                Some(description)
            };
            Ok(HeaderClause::Idspace {
                prefix,
                url,
                description,
            })
        }
        "treat-xrefs-as-equivalent" => {
            let (prefix, rest) = take_prefix("treat-xrefs-as-equivalent", value)?;
            expect_end("treat-xrefs-as-equivalent", rest)?;
            Ok(HeaderClause::TreatXrefsAsEquivalent { prefix })
        }
        tag @ ("treat-xrefs-as-genus-differentia" | "treat-xrefs-as-reverse-genus-differentia") => {
            let (prefix, rest) = take_prefix(tag, value)?;
            let (relation, rest) = take_ident(tag, rest)?;
            let (filler, rest) = take_ident(tag, rest)?;
            expect_end(tag, rest)?;
            if tag == "treat-xrefs-as-genus-differentia" {
                Ok(HeaderClause::TreatXrefsAsGenusDifferentia {
                    prefix,
                    relation,
                    filler,
                })
            } else {
                Ok(HeaderClause::TreatXrefsAsReverseGenusDifferentia {
                    prefix,
                    relation,
                    filler,
                })
            }
        }
        "treat-xrefs-as-relationship" => {
            let (prefix, rest) = take_prefix("treat-xrefs-as-relationship", value)?;
            let (relation, rest) = take_ident("treat-xrefs-as-relationship", rest)?;
            expect_end("treat-xrefs-as-relationship", rest)?;
            Ok(HeaderClause::TreatXrefsAsRelationship { prefix, relation })
        }
        "treat-xrefs-as-is_a" => {
            let (prefix, rest) = take_prefix("treat-xrefs-as-is_a", value)?;
            expect_end("treat-xrefs-as-is_a", rest)?;
            Ok(HeaderClause::TreatXrefsAsIsA { prefix })
        }
        "treat-xrefs-as-has-subclass" => {
            let (prefix, rest) = take_prefix("treat-xrefs-as-has-subclass", value)?;
            expect_end("treat-xrefs-as-has-subclass", rest)?;
            Ok(HeaderClause::TreatXrefsAsHasSubclass { prefix })
        }
        // both spellings show up in the wild; serialization uses the first
        "property-value" | "property_value" => {
            value.parse::<PropertyValue>().map(HeaderClause::PropertyValue)
        }
        "remark" => Ok(HeaderClause::Remark(lexing::unescape(value))),
        "ontology" => Ok(HeaderClause::Ontology(lexing::unescape(value))),
        "owl-axioms" => Ok(HeaderClause::OwlAxioms(lexing::unescape(value))),
        _ => Ok(HeaderClause::Unreserved {
            tag: line.tag.clone(),
            value: lexing::unescape(value),
        }),
    }
}

/// Parse the payload of an entity clause line.
///
/// The `id` tag is handled by the frame parser, which owns the rule that
/// it must come first.
pub fn entity_clause(line: &ClauseLine<'_>) -> Result<EntityClause, SyntaxError> {
    let value = line.value;
    match line.tag.as_str() {
        "name" => Ok(EntityClause::Name(lexing::unescape(value))),
        "def" => {
            let (text, rest) = take_quoted("def", value)?;
            let xrefs = if rest.is_empty() {
                None
            } else {
                Some(rest.parse::<XrefList>().map_err(|e| {
                    SyntaxError::new(format!("in 'def' clause: {}", e.message()))
                })?)
            };
            Ok(EntityClause::Def { text, xrefs })
        }
        "consider" => final_ident("consider", value).map(EntityClause::Consider),
        "is_obsolete" => match value {
            "true" => Ok(EntityClause::IsObsolete(true)),
            "false" => Ok(EntityClause::IsObsolete(false)),
            other => Err(SyntaxError::new(format!(
                "invalid value for 'is_obsolete' clause: expected true or false, found {:?}",
                other
            ))),
        },
        "created_by" => Ok(EntityClause::CreatedBy(lexing::unescape(value))),
        "creation_date" => value.parse::<CreationDate>().map(EntityClause::CreationDate),
        _ => Ok(EntityClause::Unreserved {
            tag: line.tag.clone(),
            value: lexing::unescape(value),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(raw: &str) -> Result<HeaderClause, SyntaxError> {
        let line = ClauseLine::parse(raw)
            .expect("line split failed")
            .expect("expected a clause line");
        header_clause(&line)
    }

    fn entity(raw: &str) -> Result<EntityClause, SyntaxError> {
        let line = ClauseLine::parse(raw)
            .expect("line split failed")
            .expect("expected a clause line");
        entity_clause(&line)
    }

    #[test]
    fn test_header_dispatch_round_trip() {
        for raw in [
            "format-version: 1.2",
            "data-version: releases/2023-06-11",
            "date: 14:06:2023 10:32",
            "saved-by: curator",
            "auto-generated-by: OBO-Edit 2.3.1",
            "import: http://purl.obolibrary.org/obo/go.obo",
            "subsetdef: goslim_plant \"Plant GO slim\"",
            "synonymtypedef: systematic_synonym \"Systematic synonym\" EXACT",
            "default-namespace: gene_ontology",
            "idspace: Wikipedia http://en.wikipedia.org/wiki/ \"Wikipedia\"",
            "treat-xrefs-as-equivalent: TEST",
            "treat-xrefs-as-genus-differentia: CL part_of NCBITaxon:7955",
            "treat-xrefs-as-reverse-genus-differentia: CL part_of NCBITaxon:7955",
            "treat-xrefs-as-relationship: MA homologous_to",
            "treat-xrefs-as-is_a: CL",
            "treat-xrefs-as-has-subclass: GO",
            "property-value: IAO:0000117 TST:001",
            "remark: a remark",
            "ontology: go",
            "owl-axioms: Declaration(Class(X))",
        ] {
            let clause = header(raw).unwrap_or_else(|e| panic!("{:?} failed: {}", raw, e));
            assert_eq!(clause.to_string(), raw, "round trip failed for {:?}", raw);
        }
    }

    #[test]
    fn test_header_underscore_property_value_is_accepted() {
        let clause = header("property_value: IAO:0000117 TST:001").expect("parse failed");
        assert_eq!(clause.to_string(), "property-value: IAO:0000117 TST:001");
    }

    #[test]
    fn test_header_unknown_tag_is_unreserved() {
        let clause = header("exotic-tag: some value").expect("parse failed");
        assert_eq!(
            clause,
            HeaderClause::Unreserved {
                tag: "exotic-tag".into(),
                value: "some value".into(),
            }
        );
    }

    #[test]
    fn test_header_errors_name_the_tag() {
        let err = header("date: tomorrow").expect_err("expected error");
        assert!(err.message().contains("date"));
        assert!(err.message().contains("tomorrow"));
        let err = header("subsetdef: only_an_ident").expect_err("expected error");
        assert!(err.message().contains("subsetdef"));
    }

    #[test]
    fn test_entity_dispatch_round_trip() {
        for raw in [
            "name: mitochondrion inheritance",
            "def: \"A definition.\" [PMID:123, ISBN:0321842685 \"Hacker's Delight (2nd Edition)\"]",
            "def: \"No references.\"",
            "consider: GO:0048308",
            "is_obsolete: true",
            "is_obsolete: false",
            "created_by: degtyarenko",
            "creation_date: 2009-04-28T10:02:53Z",
            "creation_date: 2021-01-23",
        ] {
            let clause = entity(raw).unwrap_or_else(|e| panic!("{:?} failed: {}", raw, e));
            assert_eq!(clause.to_string(), raw, "round trip failed for {:?}", raw);
        }
    }

    #[test]
    fn test_entity_unknown_tag_is_unreserved() {
        let clause = entity("xref: EC:1.1.1.1").expect("parse failed");
        assert_eq!(
            clause,
            EntityClause::Unreserved {
                tag: "xref".into(),
                value: "EC:1.1.1.1".into(),
            }
        );
    }

    #[test]
    fn test_is_obsolete_rejects_other_literals() {
        let err = entity("is_obsolete: yes").expect_err("expected error");
        assert!(err.message().contains("is_obsolete"));
        assert!(err.message().contains("yes"));
        assert!(entity("is_obsolete: True").is_err());
    }

    #[test]
    fn test_def_requires_quoted_text() {
        let err = entity("def: unquoted text").expect_err("expected error");
        assert!(err.message().contains("def"));
    }

    #[test]
    fn test_consider_rejects_trailing_text() {
        assert!(entity("consider: GO:1 GO:2").is_err());
    }
}
