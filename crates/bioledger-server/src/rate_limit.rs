//! Per-client sliding-window rate limiting.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::RateLimitConfig;
use crate::error::ServerError;

/// Shared rate limiter state.
///
/// Each client key keeps the instants of its requests inside the current
/// window. A request is rejected when the window already holds
/// `max_requests` entries; rejected requests are not recorded.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record a request from `key` at `now` if it fits in the window.
    ///
    /// Expired instants are dropped first, along with every client whose
    /// window has emptied, so idle clients do not accumulate.
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        if !self.config.enabled {
            return true;
        }
        let window = Duration::from_secs(self.config.window_secs);
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        windows.retain(|_, hits| {
            while hits.front().is_some_and(|oldest| now.duration_since(*oldest) >= window) {
                hits.pop_front();
            }
            !hits.is_empty()
        });

        if windows.get(key).map_or(0, VecDeque::len) >= self.config.max_requests {
            return false;
        }
        windows.entry(key.to_string()).or_default().push_back(now);
        true
    }

    /// Number of clients with requests still inside their window.
    pub fn tracked_clients(&self) -> usize {
        match self.windows.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }
}

/// Middleware that enforces the per-client limit.
///
/// The key is the peer IP address when the server was started with connect
/// info; otherwise every request shares the `"unknown"` key.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !limiter.check(&key) {
        tracing::warn!(client = %key, "rate limit exceeded");
        return ServerError::RateLimited {
            max_requests: limiter.config.max_requests,
            window_secs: limiter.config.window_secs,
        }
        .into_response();
    }

    next.run(request).await
}
