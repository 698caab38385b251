use log::{debug, error};
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

use crate::data::{Credentials, Session};
use crate::error::LoginError;
use crate::transport::{HttpTransport, Transport};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/login";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Performs one login round trip per call against a fixed endpoint.
///
/// The client keeps its transport for as long as it lives; for
/// [`HttpTransport`] that is a handle on the process-wide http client,
/// released when the `LoginClient` is dropped.
pub struct LoginClient<T: Transport = HttpTransport> {
    endpoint: Url,
    timeout: Duration,
    transport: T,
}

impl LoginClient<HttpTransport> {
    pub fn new() -> Result<Self, LoginError> {
        Self::builder().build()
    }

    pub fn builder() -> LoginClientBuilder {
        LoginClientBuilder::default()
    }
}

impl<T: Transport> LoginClient<T> {
    pub fn with_transport(transport: T) -> Result<Self, LoginError> {
        LoginClientBuilder::default().build_with(transport)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends the credentials and returns the parsed response body. A body
    /// carrying `{"error": ...}` still counts as a successful call here, see
    /// [`Session::from_response`] for telling the two apart.
    pub fn login(&self, username: &str, password: &str) -> Result<Value, LoginError> {
        let body = Credentials::new(username, password)
            .to_body()
            .inspect_err(|e| error!(target: "login", "{}", e))?;

        debug!(target: "login", "Posting credentials for {} to {}", username, self.endpoint);

        let response = self
            .transport
            .post_json(&self.endpoint, body, self.timeout)
            .inspect_err(|e| error!(target: "login", "Request to {} failed: {}", self.endpoint, e))?;

        serde_json::from_slice::<Value>(&response)
            .map_err(LoginError::from)
            .inspect_err(|e| error!(target: "login", "{}", e))
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session, LoginError> {
        let response = self.login(username, password)?;
        Session::from_response(&response)
    }
}

pub struct LoginClientBuilder {
    endpoint: String,
    timeout: Duration,
}

impl Default for LoginClientBuilder {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LoginClientBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<LoginClient<HttpTransport>, LoginError> {
        let endpoint = self.parse_endpoint()?;
        Ok(LoginClient {
            endpoint,
            timeout: self.timeout,
            transport: HttpTransport::acquire()
                .inspect_err(|e| error!(target: "login", "{}", e))?,
        })
    }

    pub fn build_with<T: Transport>(self, transport: T) -> Result<LoginClient<T>, LoginError> {
        Ok(LoginClient {
            endpoint: self.parse_endpoint()?,
            timeout: self.timeout,
            transport,
        })
    }

    fn parse_endpoint(&self) -> Result<Url, LoginError> {
        Url::parse(&self.endpoint)
            .map_err(|e| LoginError::ClientInit(format!("invalid endpoint {}: {}", self.endpoint, e)))
            .inspect_err(|e| error!(target: "login", "{}", e))
    }
}
