use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Body of the POST: `{"prompt": ..., "context": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondRequest {
    prompt: String,
    context: String,
}

impl RespondRequest {
    pub fn new(prompt: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            context: context.into(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// What gets printed: the inputs that were sent plus the server's `output`,
/// whatever JSON type it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub prompt: String,
    pub context: String,
    pub answer: Value,
}

impl Record {
    /// Consumes the request that was sent so `prompt`/`context` are exactly what went over the wire.
    pub fn from_exchange(request: RespondRequest, answer: Value) -> Self {
        Self {
            prompt: request.prompt,
            context: request.context,
            answer,
        }
    }
}

/// Writes the record as 2-space indented JSON followed by a newline.
pub fn write_record<W: Write>(writer: &mut W, record: &Record) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    writeln!(writer, "{json}")?;
    writer.flush()?;
    Ok(())
}
