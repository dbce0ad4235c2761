//! The harness transcript: every step, warning and the final summary goes to
//! one text destination and is echoed to stdout.

use crate::error::HarnessResult;

use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::panic::Location;
use std::path::Path;

pub struct LogSink<W: Write> {
    out: W,
    echo: bool,
}

impl LogSink<BufWriter<File>> {
    /// Creates (or truncates) the log file at `path`.
    pub fn create<P>(path: P) -> HarnessResult<Self> where P: AsRef<Path> {
        let file = File::create(path)?;
        Ok(LogSink::new(BufWriter::new(file), true))
    }
}

impl LogSink<io::Sink> {
    pub fn stdout_only() -> Self {
        LogSink::new(io::sink(), true)
    }
}

impl<W: Write> LogSink<W> {
    pub fn new(out: W, echo: bool) -> Self {
        LogSink { out, echo }
    }

    pub fn message(&mut self, line: &str) {
        if self.echo {
            println!("{}", line);
        }
        if let Err(err) = writeln!(self.out, "{}", line) {
            debug!("failed to write log line: {}", err);
        }
    }

    /// Writes `text` prefixed with the caller's source location.
    #[track_caller]
    pub fn warning(&mut self, text: &str) {
        let location = Location::caller();
        self.message(&format!("{}:{}: {}", location.file(), location.line(), text));
    }

    /// Flushes and hands back the destination.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
