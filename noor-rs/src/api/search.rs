//! Search API endpoints
//!
//! Provides REST API for Quran and Hadith substring search.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::server::AppState;
use crate::search::{IndexStatus, SearchResults, SearchTab};

/// Search request query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Corpus to search (default quran)
    #[serde(default = "default_tab")]
    pub tab: SearchTab,
    /// Search query string
    #[serde(default)]
    pub q: String,
}

fn default_tab() -> SearchTab {
    SearchTab::Quran
}

/// GET /api/search
///
/// Never fails: short queries and corpus failures yield an empty result set.
pub async fn search(State(state): State<Arc<AppState>>, Query(params): Query<SearchParams>) -> Json<SearchResults> {
    Json(state.search.search(params.tab, &params.q).await)
}

/// GET /api/search/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<IndexStatus> {
    Json(state.search.status().await)
}
