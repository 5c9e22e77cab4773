use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::constants::defaults;
use crate::helpers::{Clock, SystemClock};

pub const STATUS_PATH: &str = "/status.cgi";

/// Top-level JSON object returned by the gateway's status endpoint
pub type StatusPayload = Map<String, Value>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("invalid gateway host '{0}'")]
    InvalidHost(String),
    #[error("cannot connect to TTN gateway: {0}")]
    Http(#[from] ureq::Error),
    #[error("cannot parse data from TTN gateway: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientOptions {
    /// Minimum time between two actual fetches, shared by all callers of `refresh`
    pub min_time_between_updates: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            min_time_between_updates: defaults::MIN_TIME_BETWEEN_UPDATES,
            request_timeout: defaults::REQUEST_TIMEOUT,
        }
    }
}

/// Build `http://{host}/status.cgi`, rejecting hosts that smuggle in a path, query or fragment
pub fn status_url(host: &str) -> Result<Url, GatewayError> {
    let invalid = || GatewayError::InvalidHost(host.to_string());
    let host = host.trim();
    if host.is_empty() {
        return Err(invalid());
    }
    let url = Url::parse(&format!("http://{host}{STATUS_PATH}")).map_err(|_| invalid())?;
    if url.path() != STATUS_PATH || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid());
    }
    Ok(url)
}

/// Handles the connection to one gateway and limits how often it is polled.
///
/// The most recent successful payload is kept as an immutable snapshot which is
/// swapped as a whole, so readers see either the previous or the new payload.
pub struct GatewayClient {
    host: String,
    url: Url,
    agent: ureq::Agent,
    min_time_between_updates: Duration,
    clock: Box<dyn Clock>,
    // Held for the whole check-and-fetch so that one window yields one request
    last_fetch: Mutex<Option<Instant>>,
    data: RwLock<Option<Arc<StatusPayload>>>,
}

impl GatewayClient {
    pub fn new(host: &str, options: ClientOptions) -> Result<Self, GatewayError> {
        Self::with_clock(host, options, SystemClock)
    }

    pub fn with_clock(
        host: &str,
        options: ClientOptions,
        clock: impl Clock + 'static,
    ) -> Result<Self, GatewayError> {
        let url = status_url(host)?;
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(options.request_timeout))
            .build();

        Ok(Self {
            host: host.trim().to_string(),
            url,
            agent: ureq::Agent::new_with_config(config),
            min_time_between_updates: options.min_time_between_updates,
            clock: Box::new(clock),
            last_fetch: Mutex::new(None),
            data: RwLock::new(None),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn status_url(&self) -> &Url {
        &self.url
    }

    /// Fetch and parse the status document, bypassing the throttle and the cache
    pub fn fetch_status(&self) -> Result<StatusPayload, GatewayError> {
        log::debug!("Downloading data from TTN gateway: {}", self.url);

        let mut response = self.agent.get(self.url.as_str()).call()?;
        log::debug!("Response status from TTN gateway: {}", response.status());

        // The gateway serves JSON as text/html, so the declared content type is ignored
        let body = response.body_mut().read_to_string()?;
        let payload = serde_json::from_str::<StatusPayload>(&body)?;
        log::trace!("Data received from TTN gateway: {:?}", payload);

        Ok(payload)
    }

    /// Update the cached status, unless the last fetch happened within the throttle window.
    ///
    /// Never fails: on any error the cache is cleared and the error is logged.
    pub fn refresh(&self) {
        let mut last_fetch = self
            .last_fetch
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let now = self.clock.now();
        if let Some(last) = *last_fetch {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.min_time_between_updates {
                log::trace!(
                    "Skipping fetch from {}; last fetch was {:.1}s ago",
                    self.host,
                    elapsed.as_secs_f32()
                );
                return;
            }
        }
        *last_fetch = Some(now);

        let data = match self.fetch_status() {
            Ok(payload) if payload.is_empty() => {
                log::warn!("Empty status document from TTN gateway {}", self.host);
                None
            }
            Ok(payload) => Some(Arc::new(payload)),
            Err(e) => {
                log::error!("{e}");
                None
            }
        };
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = data;
    }

    /// The most recent payload, without triggering a fetch
    pub fn latest_data(&self) -> Option<Arc<StatusPayload>> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
