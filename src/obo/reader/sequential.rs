//! Sequential frame reader
//!
//! Used when the pool size is one: segments parse on the calling thread,
//! in scan order, with no worker machinery at all.

use std::io::BufRead;

use crate::obo::ast::entity::EntityFrame;
use crate::obo::error::{Error, Result};
use crate::obo::parsing::frame;
use crate::obo::scanner::Scanner;

pub struct SequentialReader<B> {
    scanner: Scanner<B>,
    failed: bool,
}

impl<B: BufRead> SequentialReader<B> {
    pub fn new(scanner: Scanner<B>) -> Self {
        Self {
            scanner,
            failed: false,
        }
    }
}

impl<B: BufRead> Iterator for SequentialReader<B> {
    type Item = Result<EntityFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.scanner.next_segment() {
            Ok(None) => None,
            Ok(Some(segment)) => match frame::entity_frame(&segment) {
                Ok(entity) => Some(Ok(entity)),
                Err(e) => {
                    self.failed = true;
                    Some(Err(Error::Syntax(e)))
                }
            },
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
