//! Fixed-window rate limiting keyed by client address.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::ServerConfig;
use crate::error::AppError;

/// Message returned once a client has used up its window.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Key used when the client address cannot be determined.
const UNKNOWN_CLIENT: &str = "unknown";

/// Expired buckets are swept once the table grows past this size.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u64,
    pub window: Duration,
}

impl RateLimitConfig {
    pub fn from_server_config(config: &ServerConfig) -> Self {
        Self {
            max_requests: config.rate_limit_max_requests,
            window: Duration::from_millis(config.rate_limit_window_ms),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    count: u64,
    window_start: Instant,
}

/// Shared limiter state. Clones share the same buckets.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count one request for `key`; `false` once the window's quota is spent.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        let window = self.config.window;

        if buckets.len() >= SWEEP_THRESHOLD {
            buckets.retain(|_, b| now.duration_since(b.window_start) < window);
        }

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            count: 0,
            window_start: now,
        });

        if now.duration_since(bucket.window_start) >= window {
            bucket.count = 0;
            bucket.window_start = now;
        }

        if bucket.count >= self.config.max_requests {
            false
        } else {
            bucket.count += 1;
            true
        }
    }
}

/// Client key: the peer address when known, else the first `x-forwarded-for` hop.
fn client_key(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

/// Reject requests beyond the client's quota with 429.
///
/// The limiter is read from request extensions; without one, requests pass.
pub async fn rate_limit_middleware(request: Request, next: Next) -> Response {
    let limiter = request.extensions().get::<RateLimiter>().cloned();

    if let Some(limiter) = limiter {
        let key = client_key(&request);
        if !limiter.check(&key) {
            tracing::warn!(client = %key, "Rate limit exceeded");
            return AppError::RateLimited(RATE_LIMITED_MESSAGE.to_string()).into_response();
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u64, window: Duration) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            max_requests,
            window,
        })
    }

    #[test]
    fn allows_up_to_quota_then_rejects() {
        let limiter = limiter(2, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check_at("10.0.0.1", now));
        assert!(limiter.check_at("10.0.0.1", now));
        assert!(!limiter.check_at("10.0.0.1", now));
    }

    #[test]
    fn clients_have_separate_quotas() {
        let limiter = limiter(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check_at("10.0.0.1", now));
        assert!(limiter.check_at("10.0.0.2", now));
        assert!(!limiter.check_at("10.0.0.1", now));
    }

    #[test]
    fn quota_resets_after_window() {
        let limiter = limiter(1, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("10.0.0.1", start));
        assert!(!limiter.check_at("10.0.0.1", start + Duration::from_secs(59)));
        assert!(limiter.check_at("10.0.0.1", start + Duration::from_secs(60)));
    }

    #[test]
    fn clones_share_buckets() {
        let limiter = limiter(1, Duration::from_secs(60));
        let clone = limiter.clone();
        assert!(limiter.check("10.0.0.1"));
        assert!(!clone.check("10.0.0.1"));
    }

    #[test]
    fn client_key_prefers_forwarded_header_without_peer() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(client_key(&request), "203.0.113.7");

        let request = Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(client_key(&request), UNKNOWN_CLIENT);
    }
}
