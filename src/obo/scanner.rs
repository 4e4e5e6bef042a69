//! Boundary scanner
//!
//! A single sequential pass over the raw source that splits it into the
//! header segment and an ordered list of stanza segments, without parsing
//! clause content. The scanner is the only reader of the source stream;
//! workers only ever see the owned segment text it hands out, so no
//! read-side locking is needed anywhere in the pipeline.

use std::io::BufRead;

use crate::obo::ast::entity::EntityKind;
use crate::obo::error::{Error, SyntaxError};

/// One stanza's raw text, tagged with its position in the source.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Zero-based position of this stanza among all stanzas.
    pub index: usize,
    /// The kind declared by the stanza marker.
    pub kind: EntityKind,
    /// 1-based line number of the first line after the marker.
    pub start_line: usize,
    /// The stanza's clause lines, newline separated.
    pub text: String,
}

/// Recognize a stanza marker line.
///
/// Returns `None` for ordinary lines. Marker lines are bracketed, may be
/// surrounded by whitespace and may carry a trailing comment.
fn parse_marker(line: &str) -> Option<Result<EntityKind, SyntaxError>> {
    let trimmed = line.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    let Some(close) = trimmed.find(']') else {
        return Some(Err(SyntaxError::new(format!(
            "unterminated stanza marker {:?}",
            trimmed
        ))));
    };
    let after = trimmed[close + 1..].trim();
    if !(after.is_empty() || after.starts_with('!')) {
        return Some(Err(SyntaxError::new(format!(
            "unexpected text after stanza marker {:?}",
            trimmed
        ))));
    }
    match &trimmed[1..close] {
        "Term" => Some(Ok(EntityKind::Term)),
        "Typedef" => Some(Ok(EntityKind::Typedef)),
        other => Some(Err(SyntaxError::new(format!(
            "unrecognized stanza marker [{}]",
            other
        )))),
    }
}

/// The sequential segmenter; owns the source stream exclusively.
pub struct Scanner<B> {
    stream: B,
    /// Number of lines read so far; also the 1-based number of the line
    /// read last.
    line: usize,
    /// The marker opening the next stanza, once one has been seen.
    next_marker: Option<(EntityKind, usize)>,
    segments: usize,
    done: bool,
}

impl<B: BufRead> Scanner<B> {
    pub fn new(stream: B) -> Self {
        Self {
            stream,
            line: 0,
            next_marker: None,
            segments: 0,
            done: false,
        }
    }

    /// The number of stanza segments produced so far, which is also the
    /// index the next segment will carry.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    fn read_line(&mut self) -> Result<Option<String>, Error> {
        if self.done {
            return Ok(None);
        }
        let mut buffer = String::new();
        let read = self.stream.read_line(&mut buffer)?;
        if read == 0 {
            self.done = true;
            return Ok(None);
        }
        self.line += 1;
        while buffer.ends_with('\n') || buffer.ends_with('\r') {
            buffer.pop();
        }
        Ok(Some(buffer))
    }

    /// Accumulate lines until EOF or the next stanza marker. The marker,
    /// if any, is stashed for the following segment.
    fn read_block(&mut self) -> Result<String, Error> {
        let mut text = String::new();
        while let Some(line) = self.read_line()? {
            if let Some(marker) = parse_marker(&line) {
                let kind = marker.map_err(|e| Error::Syntax(e.at_line(self.line)))?;
                self.next_marker = Some((kind, self.line));
                break;
            }
            text.push_str(&line);
            text.push('\n');
        }
        Ok(text)
    }

    /// Scan the header segment: everything before the first stanza
    /// marker. Must be called once, before the first `next_segment`.
    pub fn scan_header(&mut self) -> Result<String, Error> {
        self.read_block()
    }

    /// Scan the next stanza segment, or `None` once the source is
    /// exhausted.
    pub fn next_segment(&mut self) -> Result<Option<Segment>, Error> {
        let Some((kind, marker_line)) = self.next_marker.take() else {
            return Ok(None);
        };
        let start_line = marker_line + 1;
        let text = self.read_block()?;
        let index = self.segments;
        self.segments += 1;
        Ok(Some(Segment {
            index,
            kind,
            start_line,
            text,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scanner(text: &str) -> Scanner<Cursor<&[u8]>> {
        Scanner::new(Cursor::new(text.as_bytes()))
    }

    fn drain(text: &str) -> (String, Vec<Segment>) {
        let mut scanner = scanner(text);
        let header = scanner.scan_header().expect("header scan failed");
        let mut segments = Vec::new();
        while let Some(segment) = scanner.next_segment().expect("segment scan failed") {
            segments.push(segment);
        }
        (header, segments)
    }

    const SAMPLE: &str = "format-version: 1.2\nremark: two terms\n\n[Term]\nid: TST:001\nname: one\n\n[Typedef]\nid: part_of\n";

    #[test]
    fn test_header_and_segments() {
        let (header, segments) = drain(SAMPLE);
        assert_eq!(header, "format-version: 1.2\nremark: two terms\n\n");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].index, 0);
        assert_eq!(segments[0].kind, EntityKind::Term);
        assert_eq!(segments[0].start_line, 5);
        assert_eq!(segments[0].text, "id: TST:001\nname: one\n\n");
        assert_eq!(segments[1].kind, EntityKind::Typedef);
        assert_eq!(segments[1].start_line, 9);
    }

    #[test]
    fn test_empty_input() {
        let (header, segments) = drain("");
        assert!(header.is_empty());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_document_without_header() {
        let (header, segments) = drain("[Term]\nid: TST:001\n");
        assert!(header.is_empty());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_line, 2);
    }

    #[test]
    fn test_crlf_lines_are_normalized() {
        let (header, segments) = drain("remark: hi\r\n[Term]\r\nid: TST:001\r\n");
        assert_eq!(header, "remark: hi\n");
        assert_eq!(segments[0].text, "id: TST:001\n");
    }

    #[test]
    fn test_marker_with_trailing_comment() {
        let (_, segments) = drain("[Term] ! the first term\nid: TST:001\n");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, EntityKind::Term);
    }

    #[test]
    fn test_unrecognized_marker_is_an_error() {
        let mut scanner = scanner("[Instance]\nid: x\n");
        let err = scanner.scan_header().expect_err("expected error");
        match err {
            Error::Syntax(e) => {
                assert!(e.message().contains("[Instance]"));
                assert_eq!(e.line(), 1);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_marker_with_garbage_after_bracket() {
        let mut scanner = scanner("[Term] stray\nid: x\n");
        assert!(scanner.scan_header().is_err());
    }
}
