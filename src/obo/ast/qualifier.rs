//! Clause qualifiers and qualifier lists
//!
//! Qualifiers are the inline `{key="value", ...}` annotations the grammar
//! accepts at the end of every clause line.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::Serialize;

use crate::obo::ast::ident::Ident;
use crate::obo::error::SyntaxError;
use crate::obo::lexing;

/// A single `key="value"` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Qualifier {
    key: Ident,
    value: String,
}

impl Qualifier {
    pub fn new(key: Ident, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    pub fn key(&self) -> &Ident {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}=\"{}\"",
            self.key,
            lexing::escaped(&self.value, lexing::QUOTED_SPECIALS)
        )
    }
}

impl FromStr for Qualifier {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let equals = lexing::find_unescaped(text, '=').ok_or_else(|| {
            SyntaxError::new(format!("expected key=\"value\" qualifier, found {:?}", text))
        })?;
        let key: Ident = text[..equals].trim().parse().map_err(|e| {
            SyntaxError::new(format!("invalid qualifier key in {:?}: {}", text, e))
        })?;
        let (value, trailing) = lexing::parse_quoted(text[equals + 1..].trim_start())?;
        if !trailing.is_empty() {
            return Err(SyntaxError::new(format!(
                "unexpected text after qualifier value: {:?}",
                trailing
            )));
        }
        Ok(Qualifier::new(key, value))
    }
}

/// An ordered sequence of qualifiers, same container shape as
/// [`XrefList`](crate::obo::ast::xref::XrefList).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QualifierList {
    qualifiers: Vec<Qualifier>,
}

impl QualifierList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, qualifier: Qualifier) {
        self.qualifiers.push(qualifier);
    }

    pub fn get(&self, index: usize) -> Option<&Qualifier> {
        self.qualifiers.get(index)
    }

    pub fn len(&self) -> usize {
        self.qualifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualifiers.is_empty()
    }

    pub fn contains(&self, qualifier: &Qualifier) -> bool {
        self.qualifiers.contains(qualifier)
    }

    /// Remove and return the last qualifier; `None` when empty.
    pub fn pop(&mut self) -> Option<Qualifier> {
        self.qualifiers.pop()
    }

    pub fn clear(&mut self) {
        self.qualifiers.clear();
    }

    pub fn reverse(&mut self) {
        self.qualifiers.reverse();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Qualifier> {
        self.qualifiers.iter()
    }
}

impl Index<usize> for QualifierList {
    type Output = Qualifier;

    fn index(&self, index: usize) -> &Self::Output {
        &self.qualifiers[index]
    }
}

impl FromIterator<Qualifier> for QualifierList {
    fn from_iter<T: IntoIterator<Item = Qualifier>>(iter: T) -> Self {
        Self {
            qualifiers: iter.into_iter().collect(),
        }
    }
}

impl Extend<Qualifier> for QualifierList {
    fn extend<T: IntoIterator<Item = Qualifier>>(&mut self, iter: T) {
        self.qualifiers.extend(iter);
    }
}

impl IntoIterator for QualifierList {
    type Item = Qualifier;
    type IntoIter = std::vec::IntoIter<Qualifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.qualifiers.into_iter()
    }
}

impl<'a> IntoIterator for &'a QualifierList {
    type Item = &'a Qualifier;
    type IntoIter = std::slice::Iter<'a, Qualifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.qualifiers.iter()
    }
}

impl fmt::Display for QualifierList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, qualifier) in self.qualifiers.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            qualifier.fmt(f)?;
        }
        f.write_str("}")
    }
}

impl FromStr for QualifierList {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let inner = text
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .ok_or_else(|| {
                SyntaxError::new(format!(
                    "expected qualifier list in braces, found {:?}",
                    text
                ))
            })?;
        if inner.trim().is_empty() {
            return Ok(QualifierList::new());
        }
        lexing::split_unquoted(inner, ',')?
            .into_iter()
            .map(Qualifier::from_str)
            .collect()
    }
}
