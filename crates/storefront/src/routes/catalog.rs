//! Category and collection facets.

use axum::{Json, extract::State};

use crate::catalog::Facet;
use crate::state::AppState;

/// Categories with product counts, for the category filter.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Facet>> {
    Json(state.catalog().categories())
}

/// Collections with product counts, for the collection filter.
pub async fn collections(State(state): State<AppState>) -> Json<Vec<Facet>> {
    Json(state.catalog().collections())
}
