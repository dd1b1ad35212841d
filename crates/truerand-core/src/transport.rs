//! HTTP seam between the fetcher and the network.
//!
//! The [`Transport`] trait abstracts a blocking `GET` so the retry and
//! batching logic can be driven by [`MockTransport`] in tests instead of the
//! real service.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::Result;

/// Status and body of a completed HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP `GET`.
///
/// An `Err` means no response was received at all. Any response, including
/// 4xx/5xx, comes back as `Ok` so the caller decides what counts as failure.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        (**self).get(url)
    }
}

// ---------------------------------------------------------------------------
// reqwest
// ---------------------------------------------------------------------------

/// Production transport backed by `reqwest::blocking`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a client. `None` keeps reqwest's default timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("truerand/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        log::trace!("GET {url} -> {status} ({} bytes)", body.len());
        Ok(HttpResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// Mock
// ---------------------------------------------------------------------------

/// Scripted transport for tests.
///
/// Replies are served in the order they were queued; once the queue is empty
/// every request gets the fallback reply. All requested URLs are recorded.
/// Clones share the same script and call log.
#[derive(Clone)]
pub struct MockTransport {
    queue: Arc<Mutex<VecDeque<HttpResponse>>>,
    fallback: Arc<Mutex<Option<HttpResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    /// A mock with an empty script. Requests fail with status 503 until
    /// something is queued or a fallback is set.
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, response: HttpResponse) -> &Self {
        self.queue.lock().unwrap().push_back(response);
        self
    }

    pub fn set_fallback(&self, response: HttpResponse) -> &Self {
        *self.fallback.lock().unwrap() = Some(response);
        self
    }

    /// URLs requested so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.calls.lock().unwrap().push(url.to_string());
        let next = self.queue.lock().unwrap().pop_front();
        Ok(next
            .or_else(|| self.fallback.lock().unwrap().clone())
            .unwrap_or(HttpResponse {
                status: 503,
                body: "mock transport has no scripted reply".into(),
            }))
    }
}

/// Mock that answers every request with exactly `num` lines, all equal to
/// the request's `min`.
#[derive(Clone, Default)]
pub struct EchoTransport {
    calls: Arc<Mutex<Vec<String>>>,
}

impl EchoTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// `num` parameter of every request made so far.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls()
            .iter()
            .filter_map(|url| query_param(url, "num"))
            .filter_map(|n| n.parse().ok())
            .collect()
    }
}

impl Transport for EchoTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.calls.lock().unwrap().push(url.to_string());
        let num: usize = query_param(url, "num")
            .and_then(|n| n.parse().ok())
            .unwrap_or(1);
        let min = query_param(url, "min").unwrap_or("0");
        let body: Vec<&str> = std::iter::repeat_n(min, num).collect();
        Ok(HttpResponse::ok(body.join("\n") + "\n"))
    }
}

fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_serves_queue_then_fallback() {
        let mock = MockTransport::new();
        mock.push(HttpResponse::ok("1"));
        mock.set_fallback(HttpResponse::ok("2"));

        assert_eq!(mock.get("a").unwrap().body, "1");
        assert_eq!(mock.get("b").unwrap().body, "2");
        assert_eq!(mock.get("c").unwrap().body, "2");
        assert_eq!(mock.calls(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mock_without_script_fails() {
        let mock = MockTransport::new();
        let reply = mock.get("x").unwrap();
        assert!(!reply.is_success());
    }

    #[test]
    fn test_clones_share_call_log() {
        let mock = MockTransport::new();
        let clone = mock.clone();
        let _ = clone.get("x");
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_echo_sizes_reply_from_num() {
        let echo = EchoTransport::new();
        let reply = echo.get("http://h/integers/?num=3&min=7&max=9").unwrap();
        assert_eq!(reply.body, "7\n7\n7\n");
        assert_eq!(echo.batch_sizes(), vec![3]);
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::ok("").is_success());
        let redirect = HttpResponse {
            status: 301,
            body: String::new(),
        };
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_query_param() {
        let url = "http://h/integers/?num=10&min=-5&max=5";
        assert_eq!(query_param(url, "min"), Some("-5"));
        assert_eq!(query_param(url, "col"), None);
        assert_eq!(query_param("http://h/", "num"), None);
    }
}
