//! Blocking HTTP GET.
//!
//! Uses the curl crate (libcurl) to retrieve the full response body into
//! memory together with the final response's `Content-Type`. Redirects are
//! followed; the whole request is bounded by a single timeout.

mod error;

pub use error::FetchError;

use std::time::Duration;

/// Smallest timeout handed to curl, which reads 0 as "wait forever".
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Response of a successful (2xx) GET.
#[derive(Debug, Clone)]
pub struct FetchedContent {
    /// `Content-Type` of the final response, if the server sent one.
    pub content_type: Option<String>,
    /// Complete response body.
    pub body: Vec<u8>,
}

impl FetchedContent {
    /// True if the declared media type is `image/*` (case-insensitive).
    pub fn is_image(&self) -> bool {
        self.content_type.as_deref().is_some_and(is_image_media_type)
    }
}

/// True if a `Content-Type` value declares an image media type.
pub fn is_image_media_type(content_type: &str) -> bool {
    const PREFIX: &str = "image/";
    let value = content_type.trim_start();
    value.len() >= PREFIX.len()
        && value.as_bytes()[..PREFIX.len()].eq_ignore_ascii_case(PREFIX.as_bytes())
}

/// Performs a GET and buffers the body.
///
/// Transport failures (DNS, refused connection, timeout) and non-2xx final
/// statuses are both errors. A zero `timeout` is raised to 1ms so the wait
/// stays bounded. Runs in the current thread.
pub fn get(url: &str, timeout: Duration, max_redirects: u32) -> Result<FetchedContent, FetchError> {
    let timeout = timeout.max(MIN_TIMEOUT);
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(max_redirects)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Http { status });
    }
    // Header bytes need not be UTF-8; a stray byte must not fail a finished transfer.
    let content_type = easy
        .content_type_bytes()?
        .map(|raw| String::from_utf8_lossy(raw).into_owned());

    tracing::debug!(
        url,
        status,
        content_type = content_type.as_deref().unwrap_or("-"),
        bytes = body.len(),
        "GET complete"
    );

    Ok(FetchedContent {
        content_type,
        body,
    })
}
