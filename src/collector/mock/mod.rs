//! In-memory mock table source for testing without a mesh interface.
//!
//! `MockTable` serves canned query output and can inject failures at
//! open, mid-read, and close, so every error path of a sampling pass can
//! be exercised on any machine.

pub mod scenarios;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use crate::collector::traits::{TableSource, TableStream};

/// Canned originator table for tests.
///
/// Successive `open` calls serve the configured outputs in order; the last
/// output repeats, so a single-output table can be sampled any number of
/// times.
#[derive(Debug, Clone, Default)]
pub struct MockTable {
    outputs: RefCell<VecDeque<String>>,
    fail_open: bool,
    fail_read_after: Option<usize>,
    fail_close: bool,
}

impl MockTable {
    /// A table serving the same output on every pass.
    pub fn new(output: impl Into<String>) -> Self {
        Self::sequence([output])
    }

    /// A table serving one output per pass, in order; the last repeats.
    pub fn sequence<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outputs: RefCell::new(outputs.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Makes `open` fail, as when the query command is not installed.
    pub fn with_open_failure(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Makes the stream return an I/O error after `lines` successful reads.
    pub fn with_read_failure_after(mut self, lines: usize) -> Self {
        self.fail_read_after = Some(lines);
        self
    }

    /// Makes `close` fail, as when reaping the child reports an error.
    pub fn with_close_failure(mut self) -> Self {
        self.fail_close = true;
        self
    }

    fn next_output(&self) -> String {
        let mut outputs = self.outputs.borrow_mut();
        if outputs.len() > 1 {
            outputs.pop_front().unwrap_or_default()
        } else {
            outputs.front().cloned().unwrap_or_default()
        }
    }
}

impl TableSource for MockTable {
    type Stream = MockStream;

    fn open(&self) -> io::Result<MockStream> {
        if self.fail_open {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "mock: command not found",
            ));
        }
        Ok(MockStream {
            lines: self.next_output().lines().map(str::to_string).collect(),
            fail_read_after: self.fail_read_after,
            fail_close: self.fail_close,
            served: 0,
        })
    }
}

/// Stream over one canned output of a `MockTable`.
#[derive(Debug)]
pub struct MockStream {
    lines: VecDeque<String>,
    fail_read_after: Option<usize>,
    fail_close: bool,
    served: usize,
}

impl TableStream for MockStream {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(limit) = self.fail_read_after
            && self.served >= limit
        {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "mock: stream broke off",
            ));
        }
        match self.lines.pop_front() {
            Some(line) => {
                self.served += 1;
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }

    fn close(self) -> io::Result<()> {
        if self.fail_close {
            Err(io::Error::other("mock: close failed"))
        } else {
            Ok(())
        }
    }
}
