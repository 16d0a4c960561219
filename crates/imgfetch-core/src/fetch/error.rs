//! Transport error type for GET requests.

/// Failure to retrieve a URL: curl reported an error or the final status was not 2xx.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, timeout, malformed URL, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {status}")]
    Http { status: u32 },
}

impl FetchError {
    /// True if the request hit the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Curl(e) if e.is_operation_timedout())
    }
}
