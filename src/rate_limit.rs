use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::warn;

use crate::error::ApiError;
use crate::metrics::RATE_LIMITED;
use crate::state::AppState;

pub const DEFAULT_RATE_LIMIT: &str = "60/minute";

// Rate limit entry - tracks requests per client and route
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid rate limit {0:?}, expected e.g. \"60/minute\"")]
pub struct ParseRateLimitError(String);

// `count` requests per `window`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub count: u32,
    pub window: Duration,
}

impl FromStr for RateLimit {
    type Err = ParseRateLimitError;

    // Accepts "60/minute", "60 per minute", "10/seconds"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRateLimitError(s.to_string());
        let lower = s.trim().to_lowercase();
        let (count, unit) = lower
            .split_once('/')
            .or_else(|| lower.split_once(" per "))
            .ok_or_else(invalid)?;

        let count: u32 = count.trim().parse().map_err(|_| invalid())?;
        let secs = match unit.trim().trim_end_matches('s') {
            "second" | "sec" => 1,
            "minute" | "min" => 60,
            "hour" => 3600,
            "day" => 86400,
            _ => return Err(invalid()),
        };
        if count == 0 {
            return Err(invalid());
        }

        Ok(RateLimit {
            count,
            window: Duration::from_secs(secs),
        })
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, unit) = match self.window.as_secs() {
            s if s % 86400 == 0 => (s / 86400, "day"),
            s if s % 3600 == 0 => (s / 3600, "hour"),
            s if s % 60 == 0 => (s / 60, "minute"),
            s => (s, "second"),
        };
        write!(f, "{} per {} {}", self.count, n, unit)
    }
}

// Fixed-window counters, one per (route, client) pair.
//
// Only routes present in the limit table are counted; everything else
// passes straight through.
pub struct RateLimiter {
    limits: HashMap<String, RateLimit>,
    entries: DashMap<String, RateLimitEntry>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            limits: HashMap::new(),
            entries: DashMap::new(),
        }
    }

    pub fn with_route(mut self, route: &str, limit: RateLimit) -> Self {
        self.limits.insert(route.to_string(), limit);
        self
    }

    pub fn limit_for(&self, route: &str) -> Option<RateLimit> {
        self.limits.get(route).copied()
    }

    // Err carries the limit that was hit
    pub fn check(&self, route: &str, client: &str) -> Result<(), RateLimit> {
        let Some(limit) = self.limit_for(route) else {
            return Ok(());
        };
        let now = Instant::now();

        let mut entry = self
            .entries
            .entry(format!("{}|{}", route, client))
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // window expired..? reset it
        if entry.window_start.elapsed() >= limit.window {
            entry.count = 1;
            entry.window_start = now;
            return Ok(());
        }

        if entry.count < limit.count {
            entry.count += 1;
            return Ok(());
        }

        Err(limit)
    }

    // Drop windows that can no longer reject anything
    pub fn prune(&self) {
        let limits = &self.limits;
        self.entries.retain(|key, entry| {
            let route = key.split('|').next().unwrap_or_default();
            limits
                .get(route)
                .map(|limit| entry.window_start.elapsed() < limit.window)
                .unwrap_or(false)
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

// Client address, "unknown" when the server was not started with connect info
pub fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// Middleware stage run before every handler
pub async fn enforce(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let Some(route) = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
    else {
        return next.run(req).await;
    };
    let client = client_key(&req);

    match state.rate_limiter.check(&route, &client) {
        Ok(()) => next.run(req).await,
        Err(limit) => {
            RATE_LIMITED.inc();
            warn!(%route, %client, %limit, "rate limit exceeded");
            ApiError::RateLimited {
                limit: limit.to_string(),
            }
            .into_response()
        }
    }
}
