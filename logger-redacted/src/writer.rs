//! Redacting writer for the tracing formatter
//!
//! `tracing_subscriber::fmt` formats each event into a single buffer before
//! writing it, so redacting per `write` call sees whole log lines.

use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

use crate::redactor::PiiRedactor;

/// Writer that redacts every buffer before forwarding it
pub struct RedactingWriter<W: Write> {
    inner: W,
    redactor: Option<Arc<PiiRedactor>>,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, redactor: Option<Arc<PiiRedactor>>) -> Self {
        Self { inner, redactor }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.redactor {
            Some(redactor) => {
                let text = String::from_utf8_lossy(buf);
                let redacted = redactor.redact(&text);
                self.inner.write_all(redacted.as_bytes())?;
                Ok(buf.len())
            }
            None => self.inner.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `MakeWriter` producing stdout writers that share one redactor
#[derive(Clone)]
pub struct RedactingMakeWriter {
    redactor: Option<Arc<PiiRedactor>>,
}

impl RedactingMakeWriter {
    pub fn new(redactor: Option<PiiRedactor>) -> Self {
        Self {
            redactor: redactor.map(Arc::new),
        }
    }
}

impl<'a> MakeWriter<'a> for RedactingMakeWriter {
    type Writer = RedactingWriter<io::Stdout>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(io::stdout(), self.redactor.clone())
    }
}
