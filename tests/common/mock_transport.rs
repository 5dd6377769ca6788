use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

use gis_analyst::{Transport, TransportError};

/// Scripted reply for requests whose URL contains a pattern
#[derive(Debug, Clone)]
pub enum MockReply {
    Body(String),
    Empty,
    Fail(String),
    /// The transport itself panics mid-request
    Panic(String),
}

#[derive(Debug, Clone)]
pub struct MockRoute {
    pub url_contains: String,
    pub reply: MockReply,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: serde_json::Value,
    pub timeout: Option<Duration>,
}

/// Transport double that answers from configured routes and tracks concurrency
#[derive(Debug)]
pub struct MockTransport {
    routes: Vec<MockRoute>,
    fallback: MockReply,
    requests: Mutex<Vec<RecordedRequest>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn replying(body: &str) -> Self {
        Self::with_fallback(MockReply::Body(body.to_string()))
    }

    pub fn failing(reason: &str) -> Self {
        Self::with_fallback(MockReply::Fail(reason.to_string()))
    }

    pub fn with_fallback(fallback: MockReply) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Add a route; the first route whose pattern is in the URL wins
    pub fn route(mut self, url_contains: &str, reply: MockReply, delay: Duration) -> Self {
        self.routes.push(MockRoute {
            url_contains: url_contains.to_string(),
            reply,
            delay,
        });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn select(&self, url: &Url) -> (MockReply, Duration) {
        self.routes
            .iter()
            .find(|route| url.as_str().contains(&route.url_contains))
            .map(|route| (route.reply.clone(), route.delay))
            .unwrap_or_else(|| (self.fallback.clone(), Duration::ZERO))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(
        &self,
        url: &Url,
        body: String,
        timeout: Option<Duration>,
    ) -> Result<Option<String>, TransportError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
            timeout,
        });

        let (reply, delay) = self.select(url);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match reply {
            MockReply::Body(text) => Ok(Some(text)),
            MockReply::Empty => Ok(None),
            MockReply::Fail(reason) => Err(TransportError::connection(reason)),
            MockReply::Panic(reason) => panic!("{reason}"),
        }
    }
}
