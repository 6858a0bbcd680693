//! Browser implementations of the core's platform seams

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, Storage};

use dsa_tracker::config::DEFAULT_API_BASE;
use dsa_tracker::{
    ClientError, ClientResult, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
    KeyValueStore, Scheduler, TransportError,
};

/// localStorage key that overrides the API base URL
pub const API_URL_KEY: &str = "dsa_tracker_api_url";

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Timer APIs take `u32` milliseconds
fn millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// API base URL from local storage or the default
pub fn api_base_url() -> String {
    let stored = local_storage().and_then(|s| s.get_item(API_URL_KEY).ok().flatten());
    pick_base_url(stored)
}

fn pick_base_url(stored: Option<String>) -> String {
    stored
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// `localStorage` as a [`KeyValueStore`]
pub struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    pub fn new() -> Self {
        let storage = local_storage();
        if storage.is_none() {
            web_sys::console::warn_1(&"localStorage unavailable; session will not persist".into());
        }
        Self { storage }
    }

    fn storage(&self) -> ClientResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| ClientError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(js_error(e)))
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| ClientError::Storage(js_error(e)))
    }
}

/// `fetch` via gloo-net; timeouts abort the request
#[derive(Default)]
pub struct GlooTransport;

impl GlooTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let abort = AbortController::new().map_err(|e| TransportError::Other(js_error(e)))?;
        let timed_out = Rc::new(Cell::new(false));

        // Dropping the timer cancels it
        let _timer = request.timeout.map(|timeout| {
            let flag = Rc::clone(&timed_out);
            let abort = abort.clone();
            Timeout::new(millis(timeout), move || {
                flag.set(true);
                abort.abort();
            })
        });

        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let signal = abort.signal();
        let builder = builder.abort_signal(Some(&signal));

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Other(e.to_string()))?;

        let response = prepared.send().await.map_err(|e| {
            if timed_out.get() {
                TransportError::Timeout
            } else {
                TransportError::Connect(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(HttpResponse::new(status, body))
    }

    async fn backoff(&self, delay: Duration) {
        TimeoutFuture::new(millis(delay)).await;
    }
}

/// `setTimeout`-backed scheduler
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        Timeout::new(millis(delay), task).forget();
    }
}
