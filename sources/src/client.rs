//! HTTP client for the Flightradar24 API.
//!
//! The client is split in two:
//!
//! - a `Transport` doing the actual GET and returning status and body,
//! - the `ApiClient` on top deciding what is a success, what is fatal and what can be retried.
//!
//! A 429 answer is retried after a fixed delay, up to `max_retries` times (0 means forever).
//! Sleeping goes through the `Sleeper` trait so tests do not have to wait.
//!

use std::fmt::Debug;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, trace, warn};

use crate::{version, ApiError};

/// Production endpoint
pub const BASE_URL: &str = "https://fr24api.flightradar24.com/api";
/// Per-request timeout in seconds
pub const TIMEOUT: u64 = 30;
/// Delay before retrying a rate-limited request, in seconds
pub const RETRY_DELAY: u64 = 20;
/// Number of retries on 429 before giving up
pub const MAX_RETRIES: usize = 10;
/// Courtesy pause between two track fetches, in seconds
pub const PAUSE: u64 = 10;

/// API parameters, usually the `api` block of the configuration file.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, endpoints are relative to it
    pub base_url: String,
    /// Request timeout (seconds)
    pub timeout: u64,
    /// Wait this long after a 429 (seconds)
    pub retry_delay: u64,
    /// 0 means retry forever
    pub max_retries: usize,
    /// Pause between successive track fetches (seconds)
    pub pause: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: BASE_URL.to_string(),
            timeout: TIMEOUT,
            retry_delay: RETRY_DELAY,
            max_retries: MAX_RETRIES,
            pause: PAUSE,
        }
    }
}

/// What we keep from an HTTP answer.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

/// Anything able to perform a GET with query parameters.
///
pub trait Transport: Debug {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Reply, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Reply, ApiError> {
        (**self).get(url, query)
    }
}

/// Anything able to wait.
///
pub trait Sleeper: Debug {
    fn sleep(&self, d: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, d: Duration) {
        (**self).sleep(d)
    }
}

/// Real-world sleeper.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, d: Duration) {
        std::thread::sleep(d)
    }
}

/// Blocking `reqwest` transport with the bearer token in every request.
///
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    #[tracing::instrument(skip(token))]
    pub fn new(token: &str, timeout: Duration) -> Result<Self, ApiError> {
        if token.is_empty() {
            return Err(ApiError::NoToken);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("accept-version", HeaderValue::from_static("v1"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ApiError::BadToken(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(version())
            .timeout(timeout)
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Reply, ApiError> {
        let mut req = self.client.get(url);
        if !query.is_empty() {
            req = req.query(query);
        }

        let resp = req.send()?;
        debug!("raw resp={:?}", &resp);

        let status = resp.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = resp.text()?;
        Ok(Reply {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

/// The API client itself.
///
#[derive(Debug)]
pub struct ApiClient<T: Transport, S: Sleeper> {
    base_url: String,
    retry_delay: Duration,
    max_retries: usize,
    transport: T,
    sleeper: S,
}

impl<T: Transport, S: Sleeper> ApiClient<T, S> {
    pub fn new(cfg: &ApiConfig, transport: T, sleeper: S) -> Self {
        ApiClient {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            retry_delay: Duration::from_secs(cfg.retry_delay),
            max_retries: cfg.max_retries,
            transport,
            sleeper,
        }
    }

    /// Full URL for a relative endpoint
    ///
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// One request, sorting out the status.
    ///
    fn once(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        let r = self.transport.get(url, query)?;
        trace!("status={} {}", r.status, r.reason);
        match r.status {
            200..=299 => Ok(r.body),
            429 => Err(ApiError::RateLimited(r.body)),
            status => Err(ApiError::Http {
                status,
                reason: r.reason,
                body: r.body,
            }),
        }
    }

    /// GET `path` with `query` and decode the JSON answer into `R`.
    ///
    #[tracing::instrument(skip(self))]
    pub fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        info!("GET {} with {:?}", path, query);

        let mut retries = 0;
        let body = loop {
            match self.once(&url, query) {
                Ok(body) => break body,
                Err(ApiError::RateLimited(msg)) => {
                    if self.max_retries != 0 && retries >= self.max_retries {
                        return Err(ApiError::RetriesExhausted(retries));
                    }
                    retries += 1;
                    warn!(
                        "Rate limited ({}), retry #{} in {}s",
                        msg.trim(),
                        retries,
                        self.retry_delay.as_secs()
                    );
                    self.sleeper.sleep(self.retry_delay);
                }
                Err(e) => return Err(e),
            }
        };

        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            path: path.to_string(),
            err,
        })
    }

    /// Same as `get()` without a target type.
    ///
    pub fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, ApiError> {
        self.get(path, query)
    }
}
