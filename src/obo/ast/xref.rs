//! Cross-references and cross-reference lists

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::Serialize;

use crate::obo::ast::ident::Ident;
use crate::obo::error::SyntaxError;
use crate::obo::lexing;

/// A cross-reference to another identifier, with an optional
/// human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Xref {
    id: Ident,
    description: Option<String>,
}

impl Xref {
    pub fn new(id: Ident) -> Self {
        Self {
            id,
            description: None,
        }
    }

    pub fn with_description(id: Ident, description: impl Into<String>) -> Self {
        Self {
            id,
            description: Some(description.into()),
        }
    }

    pub fn id(&self) -> &Ident {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }
}

impl fmt::Display for Xref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(f)?;
        if let Some(description) = &self.description {
            write!(f, " \"{}\"", lexing::escaped(description, lexing::QUOTED_SPECIALS))?;
        }
        Ok(())
    }
}

impl FromStr for Xref {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let (raw_id, rest) = lexing::split_field(text);
        let id: Ident = raw_id
            .parse()
            .map_err(|e| SyntaxError::new(format!("invalid xref identifier {:?}: {}", raw_id, e)))?;
        if rest.is_empty() {
            return Ok(Xref::new(id));
        }
        let (description, trailing) = lexing::parse_quoted(rest)?;
        if !trailing.is_empty() {
            return Err(SyntaxError::new(format!(
                "unexpected text after xref description: {:?}",
                trailing
            )));
        }
        Ok(Xref::with_description(id, description))
    }
}

/// An ordered sequence of cross-references.
///
/// Insertion order is preserved and duplicates are permitted; order is
/// semantically visible because it affects serialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct XrefList {
    xrefs: Vec<Xref>,
}

impl XrefList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cross-reference at the end of the list.
    pub fn push(&mut self, xref: Xref) {
        self.xrefs.push(xref);
    }

    pub fn get(&self, index: usize) -> Option<&Xref> {
        self.xrefs.get(index)
    }

    pub fn len(&self) -> usize {
        self.xrefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xrefs.is_empty()
    }

    pub fn contains(&self, xref: &Xref) -> bool {
        self.xrefs.contains(xref)
    }

    /// Remove and return the last cross-reference; `None` when empty.
    pub fn pop(&mut self) -> Option<Xref> {
        self.xrefs.pop()
    }

    pub fn clear(&mut self) {
        self.xrefs.clear();
    }

    pub fn reverse(&mut self) {
        self.xrefs.reverse();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Xref> {
        self.xrefs.iter()
    }
}

impl Index<usize> for XrefList {
    type Output = Xref;

    fn index(&self, index: usize) -> &Self::Output {
        &self.xrefs[index]
    }
}

impl FromIterator<Xref> for XrefList {
    fn from_iter<T: IntoIterator<Item = Xref>>(iter: T) -> Self {
        Self {
            xrefs: iter.into_iter().collect(),
        }
    }
}

impl Extend<Xref> for XrefList {
    fn extend<T: IntoIterator<Item = Xref>>(&mut self, iter: T) {
        self.xrefs.extend(iter);
    }
}

impl IntoIterator for XrefList {
    type Item = Xref;
    type IntoIter = std::vec::IntoIter<Xref>;

    fn into_iter(self) -> Self::IntoIter {
        self.xrefs.into_iter()
    }
}

impl<'a> IntoIterator for &'a XrefList {
    type Item = &'a Xref;
    type IntoIter = std::slice::Iter<'a, Xref>;

    fn into_iter(self) -> Self::IntoIter {
        self.xrefs.iter()
    }
}

impl fmt::Display for XrefList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, xref) in self.xrefs.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            xref.fmt(f)?;
        }
        f.write_str("]")
    }
}

impl FromStr for XrefList {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let inner = text
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| {
                SyntaxError::new(format!("expected xref list in brackets, found {:?}", text))
            })?;
        if inner.trim().is_empty() {
            return Ok(XrefList::new());
        }
        lexing::split_unquoted(inner, ',')?
            .into_iter()
            .map(Xref::from_str)
            .collect()
    }
}
