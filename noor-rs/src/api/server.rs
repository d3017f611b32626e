//! API Server - HTTP server for the calendar and search REST API

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::{calendar, search, ws};
use crate::calendar::CalendarEngine;
use crate::config::NoorConfig;
use crate::error::Result;
use crate::search::{FsCorpus, SearchManager};

/// Rate limiter state for tracking requests per IP
pub struct RateLimiter {
    /// Map of IP -> (request count, window start time)
    requests: RwLock<HashMap<String, (u32, Instant)>>,
    /// Maximum requests per window
    max_requests: u32,
    /// Window duration
    window_duration: Duration,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            requests: RwLock::new(HashMap::new()),
            max_requests,
            window_duration: Duration::from_secs(window_seconds),
        }
    }

    /// Check if request should be allowed for given IP
    pub async fn check_rate_limit(&self, ip: &str) -> bool {
        let now = Instant::now();
        let mut requests = self.requests.write().await;

        let entry = requests.entry(ip.to_string()).or_insert((0, now));

        // Reset if window has passed
        if now.duration_since(entry.1) > self.window_duration {
            entry.0 = 0;
            entry.1 = now;
        }

        if entry.0 >= self.max_requests {
            return false;
        }

        entry.0 += 1;
        true
    }

    /// Clean up old entries (call periodically)
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut requests = self.requests.write().await;
        requests.retain(|_, (_, start)| now.duration_since(*start) <= self.window_duration * 2);
    }

    pub async fn tracked_clients(&self) -> usize {
        self.requests.read().await.len()
    }

    pub fn window(&self) -> Duration {
        self.window_duration
    }
}

/// Shared application state
pub struct AppState {
    pub calendar: Arc<CalendarEngine>,
    pub search: Arc<SearchManager>,
    pub rate_limiter: Option<Arc<RateLimiter>>,
    /// Quiet period for WebSocket search sessions
    pub debounce: Duration,
}

/// API error response
#[derive(Debug, serde::Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

/// Handler error: status plus JSON body
pub type ApiFailure = (StatusCode, Json<ApiError>);

pub fn bad_request(msg: impl AsRef<str>) -> ApiFailure {
    (StatusCode::BAD_REQUEST, Json(ApiError::new(msg.as_ref())))
}

/// API Server
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
    cors_allow_any: bool,
}

impl ApiServer {
    /// Create a server reading corpora from disk and dates from the system clock
    pub fn new(config: NoorConfig) -> Result<Self> {
        config.validate()?;

        let source = Arc::new(FsCorpus::new(config.corpus.clone()));
        let search = SearchManager::new(source, &config.search);
        let calendar = CalendarEngine::with_config(&config.calendar);

        Ok(Self::with_components(&config, calendar, search))
    }

    /// Create a server around existing engines
    pub fn with_components(config: &NoorConfig, calendar: CalendarEngine, search: SearchManager) -> Self {
        let rate_limiter = config.rate_limit.enabled.then(|| {
            Arc::new(RateLimiter::new(
                config.rate_limit.max_requests,
                config.rate_limit.window_seconds,
            ))
        });

        let state = Arc::new(AppState {
            calendar: Arc::new(calendar),
            search: Arc::new(search),
            rate_limiter,
            debounce: Duration::from_millis(config.search.debounce_ms),
        });

        Self {
            state,
            addr: config.server.listen_addr.clone(),
            cors_allow_any: config.server.cors_allow_any,
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let api_routes = Router::new()
            .route("/health", get(health))
            .route("/calendar/today", get(calendar::today))
            .route("/calendar/events", get(calendar::events))
            .route("/calendar/month", get(calendar::month))
            .route("/calendar/convert", get(calendar::convert))
            .route("/calendar/countdown", get(calendar::countdown))
            .route("/calendar/fasting", get(calendar::fasting))
            .route("/search", get(search::search))
            .route("/search/status", get(search::status));

        let router = Router::new()
            .nest("/api", api_routes)
            .route("/ws/search", get(ws::ws_handler))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http());

        let router = if self.cors_allow_any {
            router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            router
        };

        router.with_state(self.state.clone())
    }

    /// Start the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let router = self.router();

        if let Some(limiter) = self.state.rate_limiter.clone() {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(limiter.window());
                loop {
                    interval.tick().await;
                    limiter.cleanup().await;
                }
            });
        }

        info!("Starting API server on {}", self.addr);

        let listener = TcpListener::bind(&self.addr).await?;
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Reject clients over their request budget
async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(limiter) = &state.rate_limiter {
        let ip = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        if !limiter.check_rate_limit(&ip).await {
            warn!("Rate limit exceeded for {}", ip);
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ApiError::new("Too many requests")),
            )
                .into_response();
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter_window() {
        let limiter = RateLimiter::new(2, 60);
        assert!(limiter.check_rate_limit("10.0.0.1").await);
        assert!(limiter.check_rate_limit("10.0.0.1").await);
        assert!(!limiter.check_rate_limit("10.0.0.1").await);
        // Other clients have their own budget
        assert!(limiter.check_rate_limit("10.0.0.2").await);
        assert_eq!(limiter.tracked_clients().await, 2);
    }

    #[tokio::test]
    async fn test_rate_limiter_cleanup_keeps_fresh_entries() {
        let limiter = RateLimiter::new(5, 60);
        limiter.check_rate_limit("10.0.0.1").await;
        limiter.cleanup().await;
        assert_eq!(limiter.tracked_clients().await, 1);
    }

    #[test]
    fn test_server_creation() {
        let server = ApiServer::new(NoorConfig::development());
        assert!(server.is_ok());
        let _router = server.unwrap().router();
    }
}
