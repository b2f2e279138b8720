use reqwest::Url;
use serde_json::Value;

use crate::constants::{CACHE_BUSTER_PARAM, TRAINS_PATH, TRAIN_NOT_FOUND_MESSAGE};
#[allow(unused_imports)]
use crate::logging::log;

/// Result of a `/train/{id}/status` request that reached the server
#[derive(Debug, Clone, PartialEq)]
pub enum StatusOutcome {
    Found(Value),
    /// Non-success status, with the message to show
    NotFound(String),
}

/// Client for the train list and train status endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns an error if `base` is not an absolute URL that can carry a path
    pub fn new(base: &str) -> Result<Self, String> {
        let base = Url::parse(base).map_err(|e| format!("Invalid API base {base}: {e}"))?;
        if base.cannot_be_a_base() {
            return Err(format!("Invalid API base {base}: not a base URL"));
        }
        Ok(Self { base })
    }

    /// Client for the origin the page was served from
    ///
    /// # Errors
    ///
    /// Returns an error if there is no browser window or its origin is unusable
    pub fn from_window() -> Result<Self, String> {
        let window = web_sys::window().ok_or("No window")?;
        let origin = window
            .location()
            .origin()
            .map_err(|e| format!("Failed to read page origin: {e:?}"))?;
        Self::new(&origin)
    }

    fn endpoint(&self, segments: &[&str], cache_buster: i64) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut()
            .append_pair(CACHE_BUSTER_PARAM, &cache_buster.to_string());
        url
    }

    #[must_use]
    pub fn trains_url(&self, cache_buster: i64) -> Url {
        let segments: Vec<&str> = TRAINS_PATH.split('/').filter(|s| !s.is_empty()).collect();
        self.endpoint(&segments, cache_buster)
    }

    /// The train id is percent-encoded as a single path segment
    #[must_use]
    pub fn status_url(&self, train_id: &str, cache_buster: i64) -> Url {
        self.endpoint(&["train", train_id, "status"], cache_buster)
    }

    /// Fetch the train list
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP request fails
    /// - The response status is not ok
    /// - The response body is not JSON
    pub async fn fetch_trains(&self) -> Result<Value, String> {
        let url = self.trains_url(cache_buster());
        log!("GET {url}");

        let response = reqwest::get(url)
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| format!("Failed to deserialize: {e}"))
    }

    /// Fetch the status of one train
    ///
    /// A non-success response is not an error: it becomes
    /// `StatusOutcome::NotFound` carrying the server's `error` text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or a successful response is not JSON
    pub async fn fetch_status(&self, train_id: &str) -> Result<StatusOutcome, String> {
        let url = self.status_url(train_id, cache_buster());
        log!("GET {url}");

        let response = reqwest::get(url)
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(StatusOutcome::NotFound(not_found_message(&body)));
        }

        response
            .json::<Value>()
            .await
            .map(StatusOutcome::Found)
            .map_err(|e| format!("Failed to deserialize: {e}"))
    }
}

/// Message for a failed status lookup: the body's `error` field, or a default
#[must_use]
pub fn not_found_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| TRAIN_NOT_FOUND_MESSAGE.to_string())
}

/// Millisecond timestamp appended to every request so responses are never served from cache
fn cache_buster() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
