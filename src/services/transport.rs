// src/services/transport.rs
use std::future::Future;

use reqwest::header::CONTENT_TYPE;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// One blocking-style request/response exchange with the chatbot.
///
/// `body` is an already encoded JSON envelope; the returned string is the raw
/// response body. Implementations do not retry.
pub trait Transport {
    fn post(&self, body: Vec<u8>) -> impl Future<Output = Result<String, TransportError>>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn post(&self, body: Vec<u8>) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| TransportError::new(format!("response body is not UTF-8: {e}")))
    }
}
