//! Abstractions for running the neighbor-table query command.
//!
//! The `TableSource` trait lets the collector read originator tables from
//! a real spawned command (`batctl o`) or from a mock implementation for
//! testing without a mesh interface.

use std::io::{self, BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};

/// Source of originator tables, one table per `open` call.
pub trait TableSource {
    type Stream: TableStream;

    /// Starts one read of the originator table.
    fn open(&self) -> io::Result<Self::Stream>;
}

/// Sequential access to the lines of one table read.
pub trait TableStream {
    /// Returns the next line without its terminator, or `None` at end of
    /// stream.
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// Releases the underlying resources.
    ///
    /// For a spawned command this reaps the child process. Callers treat
    /// failures here as non-fatal: reaping is known to report spurious
    /// errors on some platforms.
    fn close(self) -> io::Result<()>;
}

/// Production source that spawns the neighbor-table query command and
/// reads its standard output.
#[derive(Debug, Clone)]
pub struct BatctlCommand {
    program: String,
    args: Vec<String>,
}

impl BatctlCommand {
    /// Default query command: the batman-adv originator table.
    pub const DEFAULT: &'static str = "batctl o";

    /// Builds a source from a command line: a program followed by
    /// whitespace-separated arguments, run without a shell.
    pub fn from_command_line(command: &str) -> io::Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?
            .to_string();
        Ok(Self {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }
}

impl TableSource for BatctlCommand {
    type Stream = CommandStream;

    fn open(&self) -> io::Result<CommandStream> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "child stdout not captured"))?;
        Ok(CommandStream {
            child,
            reader: BufReader::new(stdout),
        })
    }
}

/// Stream over a spawned command's standard output.
pub struct CommandStream {
    child: Child,
    reader: BufReader<ChildStdout>,
}

impl TableStream for CommandStream {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn close(self) -> io::Result<()> {
        let CommandStream { mut child, reader } = self;
        // Dropping the reader closes our end of the pipe, so a child that
        // is still writing terminates instead of blocking the wait.
        drop(reader);
        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "query command exited with {status}"
            )))
        }
    }
}
