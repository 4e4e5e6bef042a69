//! Threaded frame reader
//!
//! The scanner stays on the calling thread and owns the source; workers
//! only ever receive owned, index-tagged segments through a shared task
//! queue. Completed frames come back over a result channel into an
//! index-keyed reassembly buffer and are released strictly in increasing
//! index order, whatever order the workers finish in. Errors are held to
//! the position they occupy: a fast worker failing on a later frame is
//! never surfaced before the earlier frames have been yielded.

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;

use tracing::debug;

use crate::obo::ast::entity::EntityFrame;
use crate::obo::error::{Error, Result, SyntaxError};
use crate::obo::parsing::frame;
use crate::obo::scanner::{Scanner, Segment};

type FrameResult = (usize, std::result::Result<EntityFrame, SyntaxError>);

/// A scan failure, pinned to the sequence position it occupies so it is
/// released in order like any other result.
struct ScanFailure {
    index: usize,
    error: Error,
}

pub struct ThreadedReader<B> {
    scanner: Scanner<B>,
    workers: Vec<JoinHandle<()>>,
    task_tx: Option<Sender<Segment>>,
    result_rx: Receiver<FrameResult>,
    cancelled: Arc<AtomicBool>,
    pending: HashMap<usize, std::result::Result<EntityFrame, SyntaxError>>,
    next_index: usize,
    in_flight: usize,
    /// Maximum number of dispatched-but-unreleased segments; bounds how
    /// far the scanner runs ahead of consumption.
    window: usize,
    scan_done: bool,
    scan_error: Option<ScanFailure>,
    failed: bool,
}

fn worker(
    tasks: Arc<Mutex<Receiver<Segment>>>,
    results: Sender<FrameResult>,
    cancelled: Arc<AtomicBool>,
) {
    loop {
        let segment = {
            let guard = match tasks.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.recv()
        };
        let Ok(segment) = segment else { break };
        if cancelled.load(Ordering::Relaxed) {
            break;
        }
        let index = segment.index;
        let parsed = frame::entity_frame(&segment);
        if results.send((index, parsed)).is_err() {
            break;
        }
    }
}

impl<B: BufRead> ThreadedReader<B> {
    pub fn new(scanner: Scanner<B>, threads: usize) -> Self {
        let (task_tx, task_rx) = mpsc::channel::<Segment>();
        let (result_tx, result_rx) = mpsc::channel();
        let tasks = Arc::new(Mutex::new(task_rx));
        let cancelled = Arc::new(AtomicBool::new(false));
        let workers = (0..threads)
            .map(|_| {
                let tasks = Arc::clone(&tasks);
                let results = result_tx.clone();
                let cancelled = Arc::clone(&cancelled);
                std::thread::spawn(move || worker(tasks, results, cancelled))
            })
            .collect();
        // the last result sender lives in the workers only, so the
        // receiver disconnects if every worker exits
        drop(result_tx);
        debug!(workers = threads, "spawned frame parser pool");
        Self {
            scanner,
            workers,
            task_tx: Some(task_tx),
            result_rx,
            cancelled,
            pending: HashMap::new(),
            next_index: 0,
            in_flight: 0,
            window: threads * 2,
            scan_done: false,
            scan_error: None,
            failed: false,
        }
    }

    /// Keep the dispatch window full. The window bounds dispatched plus
    /// buffered-but-unreleased segments, so one slow frame cannot make
    /// the scanner read arbitrarily far ahead. Scan failures close the
    /// queue so workers drain what was already dispatched and stop.
    fn refill(&mut self) {
        while !self.scan_done && self.in_flight + self.pending.len() < self.window {
            match self.scanner.next_segment() {
                Ok(Some(segment)) => {
                    let sent = self
                        .task_tx
                        .as_ref()
                        .map(|tx| tx.send(segment).is_ok())
                        .unwrap_or(false);
                    if sent {
                        self.in_flight += 1;
                    } else {
                        // no workers left to take tasks
                        self.scan_done = true;
                    }
                }
                Ok(None) => {
                    self.scan_done = true;
                    self.task_tx = None;
                    debug!(segments = self.scanner.segment_count(), "scan complete");
                }
                Err(error) => {
                    self.scan_error = Some(ScanFailure {
                        index: self.scanner.segment_count(),
                        error,
                    });
                    self.scan_done = true;
                    self.task_tx = None;
                }
            }
        }
    }
}

impl<B: BufRead> Iterator for ThreadedReader<B> {
    type Item = Result<EntityFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(result) = self.pending.remove(&self.next_index) {
                self.next_index += 1;
                return Some(match result {
                    Ok(entity) => Ok(entity),
                    Err(e) => {
                        self.failed = true;
                        Err(Error::Syntax(e))
                    }
                });
            }
            if self
                .scan_error
                .as_ref()
                .is_some_and(|failure| failure.index == self.next_index)
            {
                self.failed = true;
                if let Some(failure) = self.scan_error.take() {
                    return Some(Err(failure.error));
                }
            }
            self.refill();
            if self.in_flight > 0 {
                match self.result_rx.recv() {
                    Ok((index, result)) => {
                        self.in_flight -= 1;
                        self.pending.insert(index, result);
                    }
                    // every worker exited; nothing more will arrive
                    Err(_) => self.in_flight = 0,
                }
                continue;
            }
            if let Some(failure) = self.scan_error.take() {
                // only reachable if results were lost with a dead pool;
                // normally the failure is released at its exact position
                self.failed = true;
                return Some(Err(failure.error));
            }
            return None;
        }
    }
}

impl<B> Drop for ThreadedReader<B> {
    fn drop(&mut self) {
        // stop scheduling: queued segments are skipped, in-flight parses
        // finish and their results are discarded with the channel
        self.cancelled.store(true, Ordering::Relaxed);
        self.task_tx = None;
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}
