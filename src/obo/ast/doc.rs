//! The assembled OBO document
//!
//! An [`OboDoc`] owns its header frame and its entity frames; entity order
//! equals source stanza order and is preserved by serialization.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::obo::ast::entity::EntityFrame;
use crate::obo::ast::header::HeaderFrame;
use crate::obo::error::Error;

/// A parsed OBO document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OboDoc {
    header: HeaderFrame,
    entities: Vec<EntityFrame>,
}

impl OboDoc {
    pub fn new(header: HeaderFrame, entities: Vec<EntityFrame>) -> Self {
        Self { header, entities }
    }

    pub fn header(&self) -> &HeaderFrame {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut HeaderFrame {
        &mut self.header
    }

    pub fn entities(&self) -> &[EntityFrame] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut Vec<EntityFrame> {
        &mut self.entities
    }

    pub fn push(&mut self, entity: EntityFrame) {
        self.entities.push(entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityFrame> {
        self.entities.iter()
    }
}

impl std::ops::Index<usize> for OboDoc {
    type Output = EntityFrame;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entities[index]
    }
}

impl<'a> IntoIterator for &'a OboDoc {
    type Item = &'a EntityFrame;
    type IntoIter = std::slice::Iter<'a, EntityFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl fmt::Display for OboDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.header.fmt(f)?;
        for entity in &self.entities {
            writeln!(f)?;
            entity.fmt(f)?;
        }
        Ok(())
    }
}

impl FromStr for OboDoc {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        crate::obo::reader::loads(text, 1)
    }
}
