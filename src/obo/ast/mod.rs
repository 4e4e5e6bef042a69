//! The OBO document model
//!
//! Every type in this module renders its canonical OBO text through
//! `Display`, and the grammar accepted by the parser matches that
//! rendering exactly, so a parsed document re-serializes to text that
//! parses back to an equal document.

pub mod date;
pub mod doc;
pub mod entity;
pub mod header;
pub mod ident;
pub mod pv;
pub mod qualifier;
pub mod xref;

pub use date::CreationDate;
pub use doc::OboDoc;
pub use entity::{EntityClause, EntityFrame, EntityKind};
pub use header::{HeaderClause, HeaderFrame, SynonymScope};
pub use ident::{Ident, IdentError};
pub use pv::PropertyValue;
pub use qualifier::{Qualifier, QualifierList};
pub use xref::{Xref, XrefList};
