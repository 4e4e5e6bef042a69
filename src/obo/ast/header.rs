//! Header frame and header-scoped clauses

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::obo::ast::date;
use crate::obo::ast::ident::Ident;
use crate::obo::ast::pv::PropertyValue;
use crate::obo::error::SyntaxError;
use crate::obo::lexing;

/// The scope of a synonym type declared by a `synonymtypedef` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SynonymScope {
    Exact,
    Broad,
    Narrow,
    Related,
}

impl fmt::Display for SynonymScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynonymScope::Exact => f.write_str("EXACT"),
            SynonymScope::Broad => f.write_str("BROAD"),
            SynonymScope::Narrow => f.write_str("NARROW"),
            SynonymScope::Related => f.write_str("RELATED"),
        }
    }
}

impl FromStr for SynonymScope {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "EXACT" => Ok(SynonymScope::Exact),
            "BROAD" => Ok(SynonymScope::Broad),
            "NARROW" => Ok(SynonymScope::Narrow),
            "RELATED" => Ok(SynonymScope::Related),
            _ => Err(SyntaxError::new(format!(
                "invalid synonym scope {:?}: expected EXACT, BROAD, NARROW or RELATED",
                text
            ))),
        }
    }
}

/// A clause of the header frame.
///
/// The set of recognized tags is closed; clauses with any other tag are
/// kept as [`HeaderClause::Unreserved`] so unknown format extensions
/// survive a parse/serialize round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HeaderClause {
    FormatVersion(String),
    DataVersion(String),
    Date(NaiveDateTime),
    SavedBy(String),
    AutoGeneratedBy(String),
    Import(Ident),
    Subsetdef {
        subset: Ident,
        description: String,
    },
    SynonymTypedef {
        typedef: Ident,
        description: String,
        scope: Option<SynonymScope>,
    },
    DefaultNamespace(Ident),
    Idspace {
        prefix: String,
        url: Ident,
        description: Option<String>,
    },
    TreatXrefsAsEquivalent {
        prefix: String,
    },
    TreatXrefsAsGenusDifferentia {
        prefix: String,
        relation: Ident,
        filler: Ident,
    },
    TreatXrefsAsReverseGenusDifferentia {
        prefix: String,
        relation: Ident,
        filler: Ident,
    },
    TreatXrefsAsRelationship {
        prefix: String,
        relation: Ident,
    },
    TreatXrefsAsIsA {
        prefix: String,
    },
    TreatXrefsAsHasSubclass {
        prefix: String,
    },
    PropertyValue(PropertyValue),
    Remark(String),
    Ontology(String),
    OwlAxioms(String),
    Unreserved {
        tag: String,
        value: String,
    },
}

impl HeaderClause {
    /// The raw tag this clause serializes under.
    pub fn raw_tag(&self) -> &str {
        match self {
            HeaderClause::FormatVersion(_) => "format-version",
            HeaderClause::DataVersion(_) => "data-version",
            HeaderClause::Date(_) => "date",
            HeaderClause::SavedBy(_) => "saved-by",
            HeaderClause::AutoGeneratedBy(_) => "auto-generated-by",
            HeaderClause::Import(_) => "import",
            HeaderClause::Subsetdef { .. } => "subsetdef",
            HeaderClause::SynonymTypedef { .. } => "synonymtypedef",
            HeaderClause::DefaultNamespace(_) => "default-namespace",
            HeaderClause::Idspace { .. } => "idspace",
            HeaderClause::TreatXrefsAsEquivalent { .. } => "treat-xrefs-as-equivalent",
            HeaderClause::TreatXrefsAsGenusDifferentia { .. } => {
                "treat-xrefs-as-genus-differentia"
            }
            HeaderClause::TreatXrefsAsReverseGenusDifferentia { .. } => {
                "treat-xrefs-as-reverse-genus-differentia"
            }
            HeaderClause::TreatXrefsAsRelationship { .. } => "treat-xrefs-as-relationship",
            HeaderClause::TreatXrefsAsIsA { .. } => "treat-xrefs-as-is_a",
            HeaderClause::TreatXrefsAsHasSubclass { .. } => "treat-xrefs-as-has-subclass",
            HeaderClause::PropertyValue(_) => "property-value",
            HeaderClause::Remark(_) => "remark",
            HeaderClause::Ontology(_) => "ontology",
            HeaderClause::OwlAxioms(_) => "owl-axioms",
            HeaderClause::Unreserved { tag, .. } => tag,
        }
    }
}

fn free_text(text: &str) -> String {
    lexing::escaped(text, lexing::VALUE_SPECIALS)
}

fn prefix_text(prefix: &str) -> String {
    lexing::escaped(prefix, lexing::IDENT_PREFIX_SPECIALS)
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", lexing::escaped(text, lexing::QUOTED_SPECIALS))
}

impl fmt::Display for HeaderClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderClause::Unreserved { tag, value } => write!(
                f,
                "{}: {}",
                lexing::escaped(tag, lexing::TAG_SPECIALS),
                free_text(value)
            ),
            other => {
                write!(f, "{}: ", other.raw_tag())?;
                match other {
                    HeaderClause::FormatVersion(value)
                    | HeaderClause::DataVersion(value)
                    | HeaderClause::SavedBy(value)
                    | HeaderClause::AutoGeneratedBy(value)
                    | HeaderClause::Remark(value)
                    | HeaderClause::Ontology(value)
                    | HeaderClause::OwlAxioms(value) => f.write_str(&free_text(value)),
                    HeaderClause::Date(datetime) => {
                        f.write_str(&date::format_header_date(datetime))
                    }
                    HeaderClause::Import(ident) | HeaderClause::DefaultNamespace(ident) => {
                        ident.fmt(f)
                    }
                    HeaderClause::Subsetdef {
                        subset,
                        description,
                    } => write!(f, "{} {}", subset, quoted(description)),
                    HeaderClause::SynonymTypedef {
                        typedef,
                        description,
                        scope,
                    } => {
                        write!(f, "{} {}", typedef, quoted(description))?;
                        if let Some(scope) = scope {
                            write!(f, " {}", scope)?;
                        }
                        Ok(())
                    }
                    HeaderClause::Idspace {
                        prefix,
                        url,
                        description,
                    } => {
                        write!(f, "{} {}", prefix_text(prefix), url)?;
                        if let Some(description) = description {
                            write!(f, " {}", quoted(description))?;
                        }
                        Ok(())
                    }
                    HeaderClause::TreatXrefsAsEquivalent { prefix }
                    | HeaderClause::TreatXrefsAsIsA { prefix }
                    | HeaderClause::TreatXrefsAsHasSubclass { prefix } => {
                        f.write_str(&prefix_text(prefix))
                    }
                    HeaderClause::TreatXrefsAsGenusDifferentia {
                        prefix,
                        relation,
                        filler,
                    }
                    | HeaderClause::TreatXrefsAsReverseGenusDifferentia {
                        prefix,
                        relation,
                        filler,
                    } => write!(f, "{} {} {}", prefix_text(prefix), relation, filler),
                    HeaderClause::TreatXrefsAsRelationship { prefix, relation } => {
                        write!(f, "{} {}", prefix_text(prefix), relation)
                    }
                    HeaderClause::PropertyValue(pv) => pv.fmt(f),
                    HeaderClause::Unreserved { .. } => unreachable!("handled above"),
                }
            }
        }
    }
}

/// The ordered sequence of clauses before the first stanza.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HeaderFrame {
    clauses: Vec<HeaderClause>,
}

impl HeaderFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: HeaderClause) {
        self.clauses.push(clause);
    }

    pub fn get(&self, index: usize) -> Option<&HeaderClause> {
        self.clauses.get(index)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn contains(&self, clause: &HeaderClause) -> bool {
        self.clauses.contains(clause)
    }

    pub fn pop(&mut self) -> Option<HeaderClause> {
        self.clauses.pop()
    }

    pub fn clear(&mut self) {
        self.clauses.clear();
    }

    pub fn reverse(&mut self) {
        self.clauses.reverse();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeaderClause> {
        self.clauses.iter()
    }
}

impl Index<usize> for HeaderFrame {
    type Output = HeaderClause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl FromIterator<HeaderClause> for HeaderFrame {
    fn from_iter<T: IntoIterator<Item = HeaderClause>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl Extend<HeaderClause> for HeaderFrame {
    fn extend<T: IntoIterator<Item = HeaderClause>>(&mut self, iter: T) {
        self.clauses.extend(iter);
    }
}

impl IntoIterator for HeaderFrame {
    type Item = HeaderClause;
    type IntoIter = std::vec::IntoIter<HeaderClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<'a> IntoIterator for &'a HeaderFrame {
    type Item = &'a HeaderClause;
    type IntoIter = std::slice::Iter<'a, HeaderClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl fmt::Display for HeaderFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            writeln!(f, "{}", clause)?;
        }
        Ok(())
    }
}
