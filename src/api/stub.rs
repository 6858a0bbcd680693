//! Scripted transport for unit tests

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use tokio::sync::oneshot;

use super::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

pub(crate) const STUB_BASE: &str = "http://stub.test";

type Reply = Result<HttpResponse, TransportError>;

/// Answers from per-route queues; the last queued reply repeats.
///
/// In gated mode every request parks until the test releases it, which
/// lets tests finish overlapping requests in any order.
#[derive(Default)]
pub(crate) struct StubTransport {
    routes: RefCell<HashMap<(HttpMethod, String), VecDeque<Reply>>>,
    requests: RefCell<Vec<HttpRequest>>,
    backoffs: RefCell<Vec<std::time::Duration>>,
    gated: Cell<bool>,
    pending: RefCell<Vec<Option<oneshot::Sender<Reply>>>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn gated() -> Self {
        let stub = Self::default();
        stub.gated.set(true);
        stub
    }

    pub(crate) fn on(&self, method: HttpMethod, path: &str, status: u16, body: serde_json::Value) {
        self.push(method, path, Ok(HttpResponse::new(status, body.to_string())));
    }

    pub(crate) fn fail(&self, method: HttpMethod, path: &str, error: TransportError) {
        self.push(method, path, Err(error));
    }

    pub(crate) fn push_raw(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(method, path, Ok(HttpResponse::new(status, body)));
    }

    fn push(&self, method: HttpMethod, path: &str, reply: Reply) {
        self.routes
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn count(&self, method: HttpMethod, path: &str) -> usize {
        let url = format!("{}{}", STUB_BASE, path);
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    pub(crate) fn backoffs(&self) -> Vec<std::time::Duration> {
        self.backoffs.borrow().clone()
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.pending.borrow().iter().filter(|p| p.is_some()).count()
    }

    /// Complete the `index`-th gated request (arrival order)
    pub(crate) fn release(&self, index: usize, status: u16, body: serde_json::Value) {
        let sender = self
            .pending
            .borrow_mut()
            .get_mut(index)
            .and_then(Option::take)
            .expect("no pending request at index");
        let _ = sender.send(Ok(HttpResponse::new(status, body.to_string())));
    }

    fn next_reply(&self, request: &HttpRequest) -> Reply {
        let path = request
            .url
            .strip_prefix(STUB_BASE)
            .unwrap_or(&request.url)
            .to_string();
        let mut routes = self.routes.borrow_mut();
        match routes.get_mut(&(request.method, path)) {
            Some(queue) if queue.len() > 1 => queue.pop_front().expect("non-empty queue"),
            Some(queue) if queue.len() == 1 => queue[0].clone(),
            _ => Ok(HttpResponse::new(404, r#"{"error":"no stub"}"#)),
        }
    }
}

#[async_trait(?Send)]
impl HttpTransport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());

        if self.gated.get() {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().push(Some(tx));
            return rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Other("gate dropped".to_string())));
        }

        self.next_reply(&request)
    }

    async fn backoff(&self, delay: std::time::Duration) {
        self.backoffs.borrow_mut().push(delay);
    }
}
