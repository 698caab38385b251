use log::debug;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::error::Error as _;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use crate::error::LoginError;

// Every live HttpTransport holds a strong reference; the registry only keeps
// a weak one so the client goes away with the last handle.
static SHARED_CLIENT: Lazy<Mutex<Weak<Client>>> = Lazy::new(|| Mutex::new(Weak::new()));

/// Sends a JSON body somewhere and returns whatever came back.
pub trait Transport {
    fn post_json(&self, url: &Url, body: Vec<u8>, timeout: Duration)
        -> Result<Vec<u8>, LoginError>;
}

/// Blocking HTTP transport backed by a process-wide `reqwest` client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<Client>,
}

impl HttpTransport {
    pub fn acquire() -> Result<Self, LoginError> {
        let mut shared = SHARED_CLIENT
            .lock()
            .map_err(|_| LoginError::ClientInit("http client registry poisoned".into()))?;

        if let Some(client) = shared.upgrade() {
            return Ok(Self { client });
        }

        let client = Client::builder()
            .build()
            .map_err(|e| LoginError::ClientInit(describe(&e)))?;
        let client = Arc::new(client);
        *shared = Arc::downgrade(&client);
        debug!(target: "transport", "Created shared http client.");

        Ok(Self { client })
    }

    /// Number of live handles on the shared client.
    pub fn live_handles() -> usize {
        SHARED_CLIENT
            .lock()
            .map(|shared| shared.strong_count())
            .unwrap_or(0)
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        if Arc::strong_count(&self.client) == 1 {
            debug!(target: "transport", "Releasing shared http client.");
        }
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        url: &Url,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<Vec<u8>, LoginError> {
        let mut response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .timeout(timeout)
            .send()
            .map_err(|e| LoginError::Transport(describe(&e)))?;

        debug!(target: "transport", "{} answered with {}", url, response.status());

        let mut buffer = Vec::new();
        response
            .copy_to(&mut buffer)
            .map_err(|e| LoginError::Transport(describe(&e)))?;

        Ok(buffer)
    }
}

// reqwest's top level message rarely says what actually went wrong, the
// interesting part is further down the source chain.
fn describe(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
