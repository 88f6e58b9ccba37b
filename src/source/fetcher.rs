use crate::source::error::RetrievalError;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{info, warn};

/// Blocking HTTP download of the station text.
pub struct StationDataFetcher {
    client: Client,
    url: String,
    timeout: Duration,
}

impl StationDataFetcher {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, RetrievalError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RetrievalError::ClientBuild)?;

        Ok(Self {
            client,
            url: url.to_string(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue a single GET and return the body. Any transport failure, timeout
    /// or non-success status is an error; there is no retry.
    pub fn fetch(&self) -> Result<Vec<u8>, RetrievalError> {
        info!("Downloading station data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error for {}: {}", self.url, status);
            return Err(RetrievalError::HttpStatus {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.bytes().map_err(|e| {
            if e.is_timeout() {
                self.classify(e)
            } else {
                RetrievalError::Body {
                    url: self.url.clone(),
                    source: e,
                }
            }
        })?;

        info!("Downloaded {} bytes from {}", body.len(), self.url);
        Ok(body.to_vec())
    }

    fn classify(&self, error: reqwest::Error) -> RetrievalError {
        warn!("Request to {} failed: {}", self.url, error);
        if error.is_timeout() {
            RetrievalError::Timeout {
                url: self.url.clone(),
                timeout: self.timeout,
            }
        } else {
            RetrievalError::Network {
                url: self.url.clone(),
                source: error,
            }
        }
    }
}
