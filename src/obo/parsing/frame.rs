//! Frame assembly
//!
//! Turns the raw text of one segment into a typed frame. Errors carry the
//! absolute line of the offending clause (segment start + offset) and,
//! for entity frames, the frame index within the document.

use crate::obo::ast::entity::EntityFrame;
use crate::obo::ast::header::HeaderFrame;
use crate::obo::ast::ident::Ident;
use crate::obo::error::SyntaxError;
use crate::obo::parsing::clause;
use crate::obo::parsing::line::ClauseLine;
use crate::obo::scanner::Segment;

/// Parse the header segment into a header frame.
pub fn header_frame(text: &str, start_line: usize) -> Result<HeaderFrame, SyntaxError> {
    let mut frame = HeaderFrame::new();
    for (offset, raw) in text.lines().enumerate() {
        let line_number = start_line + offset;
        let Some(line) = ClauseLine::parse(raw).map_err(|e| e.at_line(line_number))? else {
            continue;
        };
        frame.push(clause::header_clause(&line).map_err(|e| e.at_line(line_number))?);
    }
    Ok(frame)
}

/// Parse one stanza segment into an entity frame.
///
/// The first clause line must be the `id` clause; the rest dispatch
/// through the entity clause codec.
pub fn entity_frame(segment: &Segment) -> Result<EntityFrame, SyntaxError> {
    let mut id = None;
    let mut clauses = Vec::new();
    for (offset, raw) in segment.text.lines().enumerate() {
        let line_number = segment.start_line + offset;
        let position = |e: SyntaxError| e.at_line(line_number).in_frame(segment.index);
        let Some(line) = ClauseLine::parse(raw).map_err(position)? else {
            continue;
        };
        if line.tag == "id" {
            if id.is_some() {
                return Err(position(SyntaxError::new("duplicate 'id' clause")));
            }
            let ident = line.value.parse::<Ident>().map_err(|e| {
                position(SyntaxError::new(format!(
                    "invalid identifier {:?} in 'id' clause: {}",
                    line.value, e
                )))
            })?;
            id = Some(ident);
        } else {
            if id.is_none() {
                return Err(position(SyntaxError::new(format!(
                    "expected 'id' as first clause of a {} frame, found '{}'",
                    segment.kind.marker(),
                    line.tag
                ))));
            }
            clauses.push(clause::entity_clause(&line).map_err(position)?);
        }
    }
    let id = id.ok_or_else(|| {
        SyntaxError::new(format!(
            "missing required 'id' clause in {} frame",
            segment.kind.marker()
        ))
        .at_line(segment.start_line)
        .in_frame(segment.index)
    })?;
    Ok(EntityFrame::with_clauses(segment.kind, id, clauses))
}
