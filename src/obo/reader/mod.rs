//! Frame readers and the `load` / `loads` / `iter` entry points
//!
//! The reader stage fans stanza segments out to a worker pool and
//! reassembles parsed frames in source order. The thread count policy:
//!
//! - negative: rejected with an invalid-configuration error, before any
//!   I/O happens
//! - `0`: one worker per detected logical core
//! - `1`: no pool at all, frames parse sequentially on the calling thread
//! - `N > 1`: a fixed pool of `N` workers
//!
//! Every call is self-contained; no state is shared across invocations.

mod sequential;
mod threaded;

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

use tracing::debug;

use crate::obo::ast::doc::OboDoc;
use crate::obo::ast::entity::EntityFrame;
use crate::obo::ast::header::HeaderFrame;
use crate::obo::error::{Error, Result};
use crate::obo::parsing::frame;
use crate::obo::scanner::Scanner;

pub use sequential::SequentialReader;
pub use threaded::ThreadedReader;

/// Resolve the `threads` argument to an actual pool size.
fn thread_count(threads: i32) -> Result<usize> {
    match threads {
        n if n < 0 => Err(Error::InvalidThreadCount(n)),
        0 => Ok(std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)),
        n => Ok(n as usize),
    }
}

enum Inner<B: BufRead> {
    Sequential(SequentialReader<B>),
    Threaded(ThreadedReader<B>),
}

/// An order-preserving, lazy sequence of entity frames.
///
/// The header frame is parsed eagerly on the calling thread when the
/// reader is created; entity frames are pulled one at a time through
/// `Iterator`. Dropping the reader cancels any parsing still scheduled.
pub struct FrameReader<B: BufRead> {
    header: HeaderFrame,
    inner: Inner<B>,
}

impl<B: BufRead> FrameReader<B> {
    /// Create a reader over an open byte stream.
    pub fn new(stream: B, threads: i32) -> Result<Self> {
        let pool = thread_count(threads)?;
        let mut scanner = Scanner::new(stream);
        let header_text = scanner.scan_header()?;
        let header = frame::header_frame(&header_text, 1).map_err(Error::Syntax)?;
        debug!(workers = pool, "parsing OBO frames");
        let inner = if pool == 1 {
            Inner::Sequential(SequentialReader::new(scanner))
        } else {
            Inner::Threaded(ThreadedReader::new(scanner, pool))
        };
        Ok(Self { header, inner })
    }

    /// The document's header frame.
    pub fn header(&self) -> &HeaderFrame {
        &self.header
    }

    pub fn into_header(self) -> HeaderFrame {
        self.header
    }
}

impl<B: BufRead> Iterator for FrameReader<B> {
    type Item = Result<EntityFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Sequential(reader) => reader.next(),
            Inner::Threaded(reader) => reader.next(),
        }
    }
}

fn open(path: &Path) -> Result<File> {
    match File::open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(Error::Io(e)),
    }
}

fn collect<B: BufRead>(mut reader: FrameReader<B>) -> Result<OboDoc> {
    let mut entities = Vec::new();
    while let Some(result) = reader.next() {
        entities.push(result?);
    }
    debug!(entities = entities.len(), "assembled document");
    Ok(OboDoc::new(reader.into_header(), entities))
}

/// Load an OBO document from a filesystem path.
///
/// A missing path fails with [`Error::NotFound`], distinct from other
/// I/O failures.
pub fn load(path: impl AsRef<Path>, threads: i32) -> Result<OboDoc> {
    thread_count(threads)?;
    let file = open(path.as_ref())?;
    collect(FrameReader::new(BufReader::new(file), threads)?)
}

/// Load an OBO document from an open byte stream.
///
/// Read failures raised by the stream propagate unwrapped.
pub fn load_from<R: Read>(stream: R, threads: i32) -> Result<OboDoc> {
    collect(FrameReader::new(BufReader::new(stream), threads)?)
}

/// Parse an OBO document from an in-memory string.
pub fn loads(text: &str, threads: i32) -> Result<OboDoc> {
    collect(FrameReader::new(Cursor::new(text.as_bytes()), threads)?)
}

/// Iterate over the entity frames of the document at `path`, lazily and
/// in source order.
pub fn iter(path: impl AsRef<Path>, threads: i32) -> Result<FrameReader<BufReader<File>>> {
    thread_count(threads)?;
    let file = open(path.as_ref())?;
    FrameReader::new(BufReader::new(file), threads)
}

/// Iterate over the entity frames read from an open byte stream.
pub fn iter_from<B: BufRead>(stream: B, threads: i32) -> Result<FrameReader<B>> {
    FrameReader::new(stream, threads)
}
