//! Message sinks

use super::message::Message;
use crate::error::Result;
use std::io::Write;

/// Destination for protocol messages
pub trait MessageSink {
    /// Write one message
    fn emit(&mut self, message: Message) -> Result<()>;
}

impl MessageSink for Vec<Message> {
    fn emit(&mut self, message: Message) -> Result<()> {
        self.push(message);
        Ok(())
    }
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    #[default]
    Json,
    /// Human-readable output
    Pretty,
}

/// Writes each message as JSON followed by a newline
#[derive(Debug)]
pub struct JsonLinesWriter<W: Write> {
    inner: W,
    format: OutputFormat,
}

impl JsonLinesWriter<std::io::Stdout> {
    /// Writer on the process's stdout
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write> JsonLinesWriter<W> {
    /// Wrap an existing writer
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self { inner, format }
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

impl<W: Write> MessageSink for JsonLinesWriter<W> {
    fn emit(&mut self, message: Message) -> Result<()> {
        match self.format {
            OutputFormat::Json => serde_json::to_writer(&mut self.inner, &message)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut self.inner, &message)?,
        }
        self.inner.write_all(b"\n")?;
        if message.is_state() {
            self.inner.flush()?;
        }
        Ok(())
    }
}
