//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of routes keyed by request path. Each route has a
//! status, optional Content-Type, body, and an optional delay before the
//! response is written (used to trigger client timeouts). Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    /// Raw header value; may hold non-UTF-8 bytes.
    pub content_type: Option<Vec<u8>>,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl Route {
    pub fn image(content_type: &str, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.as_bytes().to_vec()),
            body: body.to_vec(),
            delay: None,
        }
    }

    /// Route whose `Content-Type` header is written byte for byte.
    pub fn raw_content_type(content_type: &[u8], body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.to_vec()),
            body: body.to_vec(),
            delay: None,
        }
    }

    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: Some(b"text/html; charset=utf-8".to_vec()),
            body: body.as_bytes().to_vec(),
            delay: None,
        }
    }

    pub fn untyped(body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: None,
            body: body.to_vec(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: Some(b"text/plain".to_vec()),
            body: b"error".to_vec(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Starts a server in a background thread serving `routes`. Returns the base
/// URL without a trailing slash (e.g. "http://127.0.0.1:12345"). The server
/// runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, route)| (path.to_string(), route))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A URL on localhost where nothing is listening.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/gone.png", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request_path(request);

    let route = match routes.get(path) {
        Some(r) => r.clone(),
        None => Route {
            status: 404,
            content_type: Some(b"text/plain".to_vec()),
            body: b"not found".to_vec(),
            delay: None,
        },
    };
    if let Some(d) = route.delay {
        thread::sleep(d);
    }

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    )
    .into_bytes();
    if let Some(ct) = &route.content_type {
        head.extend_from_slice(b"Content-Type: ");
        head.extend_from_slice(ct);
        head.extend_from_slice(b"\r\n");
    }
    head.extend_from_slice(b"\r\n");
    let _ = stream.write_all(&head);
    let _ = stream.write_all(&route.body);
}

/// Request target of the first line, without query string.
fn request_path(request: &str) -> &str {
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    target.split('?').next().unwrap_or(target)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
