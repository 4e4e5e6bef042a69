//! Entity frames and entity-scoped clauses

use std::fmt;
use std::ops::Index;

use serde::Serialize;

use crate::obo::ast::date::CreationDate;
use crate::obo::ast::ident::Ident;
use crate::obo::ast::xref::XrefList;
use crate::obo::lexing;

/// The kind of stanza an entity frame was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Term,
    Typedef,
}

impl EntityKind {
    /// The bracketed marker line opening a stanza of this kind.
    pub fn marker(&self) -> &'static str {
        match self {
            EntityKind::Term => "[Term]",
            EntityKind::Typedef => "[Typedef]",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// A clause of a `[Term]` or `[Typedef]` frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EntityClause {
    /// `name`: the human-readable name of the entity.
    Name(String),
    /// `def`: a quoted definition with an optional xref list.
    Def {
        text: String,
        xrefs: Option<XrefList>,
    },
    /// `consider`: a replacement candidate for an obsolete entity.
    Consider(Ident),
    /// `is_obsolete`: whether the entity is obsolete.
    IsObsolete(bool),
    /// `created_by`: the name of the entity's creator.
    CreatedBy(String),
    /// `creation_date`: when the entity was created.
    CreationDate(CreationDate),
    /// Any unrecognized tag, kept verbatim.
    Unreserved { tag: String, value: String },
}

impl EntityClause {
    /// The raw tag this clause serializes under.
    pub fn raw_tag(&self) -> &str {
        match self {
            EntityClause::Name(_) => "name",
            EntityClause::Def { .. } => "def",
            EntityClause::Consider(_) => "consider",
            EntityClause::IsObsolete(_) => "is_obsolete",
            EntityClause::CreatedBy(_) => "created_by",
            EntityClause::CreationDate(_) => "creation_date",
            EntityClause::Unreserved { tag, .. } => tag,
        }
    }
}

impl fmt::Display for EntityClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityClause::Name(name) => {
                write!(f, "name: {}", lexing::escaped(name, lexing::VALUE_SPECIALS))
            }
            EntityClause::Def { text, xrefs } => {
                write!(
                    f,
                    "def: \"{}\"",
                    lexing::escaped(text, lexing::QUOTED_SPECIALS)
                )?;
                if let Some(xrefs) = xrefs {
                    write!(f, " {}", xrefs)?;
                }
                Ok(())
            }
            EntityClause::Consider(ident) => write!(f, "consider: {}", ident),
            EntityClause::IsObsolete(flag) => write!(f, "is_obsolete: {}", flag),
            EntityClause::CreatedBy(creator) => write!(
                f,
                "created_by: {}",
                lexing::escaped(creator, lexing::VALUE_SPECIALS)
            ),
            EntityClause::CreationDate(date) => write!(f, "creation_date: {}", date),
            EntityClause::Unreserved { tag, value } => write!(
                f,
                "{}: {}",
                lexing::escaped(tag, lexing::TAG_SPECIALS),
                lexing::escaped(value, lexing::VALUE_SPECIALS)
            ),
        }
    }
}

/// One `[Term]` or `[Typedef]` stanza: an identifier followed by an
/// ordered sequence of clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityFrame {
    kind: EntityKind,
    id: Ident,
    clauses: Vec<EntityClause>,
}

impl EntityFrame {
    pub fn new(kind: EntityKind, id: Ident) -> Self {
        Self {
            kind,
            id,
            clauses: Vec::new(),
        }
    }

    pub fn with_clauses(kind: EntityKind, id: Ident, clauses: Vec<EntityClause>) -> Self {
        Self { kind, id, clauses }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn id(&self) -> &Ident {
        &self.id
    }

    pub fn set_id(&mut self, id: Ident) {
        self.id = id;
    }

    /// The value of the first `name` clause, if any.
    pub fn name(&self) -> Option<&str> {
        self.clauses.iter().find_map(|clause| match clause {
            EntityClause::Name(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn push(&mut self, clause: EntityClause) {
        self.clauses.push(clause);
    }

    pub fn get(&self, index: usize) -> Option<&EntityClause> {
        self.clauses.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut EntityClause> {
        self.clauses.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn contains(&self, clause: &EntityClause) -> bool {
        self.clauses.contains(clause)
    }

    pub fn pop(&mut self) -> Option<EntityClause> {
        self.clauses.pop()
    }

    pub fn clear(&mut self) {
        self.clauses.clear();
    }

    pub fn reverse(&mut self) {
        self.clauses.reverse();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityClause> {
        self.clauses.iter()
    }
}

impl Index<usize> for EntityFrame {
    type Output = EntityClause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl<'a> IntoIterator for &'a EntityFrame {
    type Item = &'a EntityClause;
    type IntoIter = std::slice::Iter<'a, EntityClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl fmt::Display for EntityFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        writeln!(f, "id: {}", self.id)?;
        for clause in &self.clauses {
            writeln!(f, "{}", clause)?;
        }
        Ok(())
    }
}
