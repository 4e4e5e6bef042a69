//! # obo-parser
//!
//! A parser and serializer for the OBO flat-file ontology format.
//!
//! OBO documents consist of an optional header block of `tag: value` lines
//! followed by `[Term]` / `[Typedef]` stanzas. This crate parses that text
//! into a strongly typed, ordered document model ([`OboDoc`]) and renders
//! the model back to canonical OBO text, guaranteeing that re-parsing the
//! rendered text reproduces the same model.
//!
//! Parsing is frame-parallel: a sequential boundary scanner owns the byte
//! source and splits it into stanza segments, which are handed to a worker
//! pool and reassembled in source order. See the [reader](obo::reader)
//! module for the `load` / `loads` / `iter` entry points and the thread
//! count policy.
//!
//! File Layout
//!
//! The crate follows a lexing / model / parsing split:
//!   src/obo/lexing     Token-level machinery for clause lines
//!   src/obo/ast        The document model and its canonical rendering
//!   src/obo/parsing    Clause codec and frame parser
//!   src/obo/scanner    Sequential stanza boundary scanner
//!   src/obo/reader     Sequential and threaded frame readers

pub mod obo;

pub use obo::ast::{
    CreationDate, EntityClause, EntityFrame, EntityKind, HeaderClause, HeaderFrame, Ident, OboDoc,
    PropertyValue, Qualifier, QualifierList, Xref, XrefList,
};
pub use obo::error::{Error, Result, SyntaxError};
pub use obo::reader::{iter, iter_from, load, load_from, loads, FrameReader};
