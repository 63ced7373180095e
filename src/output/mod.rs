//! Output module
//!
//! Everything the tap prints to stdout is a [`Message`], one JSON document
//! per line. Messages go through a [`MessageSink`] so the sync engine can be
//! pointed at stdout or at an in-memory buffer.
//!
//! # Example
//!
//! ```rust,ignore
//! use tap_cin7::output::{JsonLinesWriter, Message, MessageSink, OutputFormat};
//!
//! let mut out = JsonLinesWriter::stdout(OutputFormat::Json);
//! out.emit(Message::info("Starting sync"))?;
//! ```

mod message;
mod writer;

pub use message::{ConnectionStatus, LogMessage, Message, RecordMessage, Status};
pub use writer::{JsonLinesWriter, MessageSink, OutputFormat};

#[cfg(test)]
mod tests;
