//! Buffered text emitter with indentation.
//!
//! A sink, an indent level, a rebuilt prefix buffer, and an at-line-start
//! flag that triggers prefix emission on the first byte of each line —
//! indentation is applied lazily so callers can write partial lines without
//! the prefix landing mid-line.

use std::io;

const INDENT: &str = "\t";

/// Any failure of the destination sink.
#[derive(Debug)]
pub struct WriteError(pub io::Error);

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "write error: {}", self.0)
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

pub type WriteResult<T> = Result<T, WriteError>;

pub struct Writer<'w> {
    sink: &'w mut dyn io::Write,
    level: usize,
    prefix: Vec<u8>,
    at_line_start: bool,
}

impl<'w> Writer<'w> {
    pub fn new(sink: &'w mut dyn io::Write) -> Self {
        Writer {
            sink,
            level: 0,
            prefix: Vec::new(),
            at_line_start: true,
        }
    }

    pub fn write(&mut self, bytes: &[u8]) -> WriteResult<()> {
        if self.at_line_start && !bytes.is_empty() {
            self.sink.write_all(&self.prefix).map_err(WriteError)?;
        }
        self.sink.write_all(bytes).map_err(WriteError)?;
        if !bytes.is_empty() {
            self.at_line_start = bytes.ends_with(b"\n");
        }
        Ok(())
    }

    pub fn write_byte(&mut self, b: u8) -> WriteResult<()> {
        self.write(&[b])
    }

    pub fn write_string(&mut self, s: &str) -> WriteResult<()> {
        self.write(s.as_bytes())
    }

    pub fn write_line(&mut self, line: &str) -> WriteResult<()> {
        self.write_string(line)?;
        if !line.ends_with('\n') {
            self.write_newline()?;
        }
        Ok(())
    }

    pub fn write_newline(&mut self) -> WriteResult<()> {
        self.write(b"\n")
    }

    pub fn write_linef(&mut self, args: std::fmt::Arguments<'_>) -> WriteResult<()> {
        self.write_line(&args.to_string())
    }

    pub fn indent(&mut self) {
        self.level += 1;
        self.prefix = INDENT.repeat(self.level).into_bytes();
    }

    /// Fatal (panics) if called at indentation level zero: a dedent with no
    /// matching indent is a bug in the caller, not a recoverable condition.
    pub fn dedent(&mut self) {
        if self.level == 0 {
            panic!("lunar_go: Writer::dedent called when at indentation level 0");
        }
        self.level -= 1;
        self.prefix = INDENT.repeat(self.level).into_bytes();
    }

    pub fn level(&self) -> usize {
        self.level
    }
}

/// Convenience macro mirroring `WriteLinef`'s `fmt`-style call sites.
#[macro_export]
macro_rules! write_linef {
    ($w:expr, $($arg:tt)*) => {
        $w.write_linef(format_args!($($arg)*))
    };
}
