//! HTTP and WebSocket API

pub mod calendar;
pub mod search;
pub mod server;
pub mod ws;

pub use server::{ApiError, ApiServer, AppState, RateLimiter};
