use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, info};

use crate::error::PadError;

/// Status and raw body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into `PadError::Status`.
    pub fn error_for_status(self, url: &str) -> Result<Self, PadError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(PadError::Status {
                status: self.status,
                url: url.to_string(),
            })
        }
    }
}

/// Blocking GET seam between the fetch logic and the network.
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status; only failures to get a response at all are `Err`.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, PadError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, PadError> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, PadError> {
        (**self).get(url)
    }
}

/// `reqwest` blocking client with default certificate validation.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self, PadError> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| PadError::Config(format!("HTTP client build failed: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one with a custom root certificate.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, PadError> {
        info!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json, image/*;q=0.9, */*;q=0.8")
            .send()
            .map_err(|e| PadError::from_reqwest(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| PadError::from_reqwest(url, e))?
            .to_vec();
        debug!("{} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse { status, body })
    }
}
