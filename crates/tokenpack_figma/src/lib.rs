use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde_json::Value;

/// Attempts per request before giving up.
pub const MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles on each subsequent retry.
pub const INITIAL_RETRY_DELAY_MS: u64 = 1000;

/// Fixed delay between requests when fetching several files, to respect the
/// Figma API rate limits.
pub const BATCH_DELAY_MS: u64 = 500;

/// Delay before retry number `retry` (zero-based), doubling from the initial
/// delay.
pub fn retry_delay(retry: u32) -> Duration {
  Duration::from_millis(INITIAL_RETRY_DELAY_MS << retry)
}

/// Blocking client for the Figma REST API. Every failure here is loud; the
/// fault-tolerant per-token policy only applies once a document has been
/// fetched.
pub struct FigmaClient {
  client: reqwest::blocking::Client,
  token: String,
  base_url: String,
}

impl FigmaClient {
  pub fn new(token: impl Into<String>) -> Self {
    Self::with_base_url(token, "https://api.figma.com")
  }

  pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
    FigmaClient {
      client: reqwest::blocking::Client::new(),
      token: token.into(),
      base_url: base_url.into(),
    }
  }

  /// Fetches the local variables export for a Figma file.
  pub fn fetch_variables(&self, file_key: &str) -> anyhow::Result<Value> {
    self.get_json(&format!(
      "{}/v1/files/{}/variables/local",
      self.base_url, file_key
    ))
  }

  /// Fetches the published styles for a Figma file.
  pub fn fetch_styles(&self, file_key: &str) -> anyhow::Result<Value> {
    self.get_json(&format!("{}/v1/files/{}/styles", self.base_url, file_key))
  }

  /// Fetches variables for several files with a fixed delay between
  /// requests.
  pub fn fetch_all_variables(&self, file_keys: &[String]) -> anyhow::Result<Vec<Value>> {
    let mut exports = Vec::with_capacity(file_keys.len());
    for (index, file_key) in file_keys.iter().enumerate() {
      if index > 0 {
        thread::sleep(Duration::from_millis(BATCH_DELAY_MS));
      }
      exports.push(self.fetch_variables(file_key)?);
    }
    Ok(exports)
  }

  fn get_json(&self, url: &str) -> anyhow::Result<Value> {
    let mut last_error = None;

    for attempt in 0..MAX_ATTEMPTS {
      if attempt > 0 {
        thread::sleep(retry_delay(attempt - 1));
      }

      match self.request(url) {
        Ok(value) => return Ok(value),
        Err(error) => {
          tracing::warn!(
            "Figma request failed (attempt {}/{MAX_ATTEMPTS}): {error}",
            attempt + 1
          );
          last_error = Some(error);
        }
      }
    }

    Err(last_error.unwrap_or_else(|| anyhow!("Figma request failed: {url}")))
  }

  fn request(&self, url: &str) -> anyhow::Result<Value> {
    let response = self
      .client
      .get(url)
      .header("X-Figma-Token", &self.token)
      .send()
      .with_context(|| format!("Unable to reach {url}"))?;

    if !response.status().is_success() {
      return Err(anyhow!("Unable to fetch {} ({})", url, response.status()));
    }

    response
      .json::<Value>()
      .with_context(|| format!("Failed to parse response from {url}"))
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn retry_delays_double_from_one_second() {
    assert_eq!(retry_delay(0), Duration::from_millis(1000));
    assert_eq!(retry_delay(1), Duration::from_millis(2000));
    assert_eq!(retry_delay(2), Duration::from_millis(4000));
  }

  #[test]
  fn requests_target_the_configured_base_url() {
    let client = FigmaClient::with_base_url("secret", "http://127.0.0.1:1");

    // Nothing listens on port 1; the request must fail after bounded
    // retries rather than hang or panic.
    let result = client.fetch_variables("abc123");
    assert!(result.is_err());
  }
}
