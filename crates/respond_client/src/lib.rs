//! Client for a local "respond" API: POST `{prompt, context}`, get back `{output}`.
//!
//! ```rust,no_run
//! use respond_client::{write_record, RespondClient, RespondConfig};
//!
//! let client = RespondClient::new(RespondConfig::from_env())?;
//! let record = client.run("Write a short poem about spring.", "You are a helpful assistant.")?;
//! write_record(&mut std::io::stdout().lock(), &record)?;
//! # Ok::<(), respond_client::RespondError>(())
//! ```

pub mod config;
pub mod error;
pub mod evaluation;
pub mod record;

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info, warn};

pub use crate::config::{RespondConfig, DEFAULT_SERVER_URL};
pub use crate::error::{RespondError, Result};
pub use crate::evaluation::{evaluation_config, extract_json_block, parse_schema};
pub use crate::record::{write_record, Record, RespondRequest};

const OUTPUT_FIELD: &str = "output";

/// Blocking client for the respond endpoint.
#[derive(Debug, Clone)]
pub struct RespondClient {
    http: Client,
    endpoint: Url,
}

impl RespondClient {
    pub fn new(config: RespondConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // The exchange waits for the server however long it takes.
        let http = Client::builder()
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| RespondError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends the payload and returns the server's `output` value as-is.
    pub fn respond(&self, request: &RespondRequest) -> Result<Value> {
        debug!(endpoint = %self.endpoint, "POST respond request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .map_err(RespondError::Connection)?;

        let status = response.status();
        let body = response.text().map_err(RespondError::Connection)?;
        debug!(%status, bytes = body.len(), "received response");

        if !status.is_success() {
            warn!(%status, endpoint = %self.endpoint, "server returned non-success status");
            return Err(RespondError::Http { status, body });
        }

        extract_output(&body)
    }

    /// Runs one full exchange and builds the record to print.
    pub fn run(&self, prompt: &str, context: &str) -> Result<Record> {
        let request = RespondRequest::new(prompt, context);
        let answer = self.respond(&request)?;
        info!(endpoint = %self.endpoint, "respond exchange complete");
        Ok(Record::from_exchange(request, answer))
    }
}

fn extract_output(body: &str) -> Result<Value> {
    let mut value: Value = serde_json::from_str(body)?;

    // Non-object bodies have no keys, so they report the same missing field.
    value
        .get_mut(OUTPUT_FIELD)
        .map(Value::take)
        .ok_or(RespondError::MissingField(OUTPUT_FIELD))
}
