//! Admin surface for catalog maintenance: registering movies and
//! theaters, wiring theaters to movies, and resetting the store.

use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use cinebook_core::{MovieId, TheaterId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct AddNamesRequest {
    names: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AddedIdsResponse {
    ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct AssociateRequest {
    theater_ids: Vec<TheaterId>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/movies", post(add_movies))
        .route("/admin/theaters", post(add_theaters))
        .route("/admin/movies/{movie_id}/theaters", post(add_theaters_to_movie))
        .route("/admin/clear", post(clear))
}

async fn add_movies(
    State(state): State<AppState>,
    Json(req): Json<AddNamesRequest>,
) -> Result<Json<AddedIdsResponse>, ApiError> {
    let titles = unique_names(req.names)?;
    let mut ids = state.store.add_movies(titles)?;
    ids.sort_unstable();
    Ok(Json(AddedIdsResponse { ids }))
}

async fn add_theaters(
    State(state): State<AppState>,
    Json(req): Json<AddNamesRequest>,
) -> Result<Json<AddedIdsResponse>, ApiError> {
    let names = unique_names(req.names)?;
    let mut ids = state.store.add_theaters(names)?;
    ids.sort_unstable();
    Ok(Json(AddedIdsResponse { ids }))
}

async fn add_theaters_to_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
    Json(req): Json<AssociateRequest>,
) -> Result<(), ApiError> {
    let theater_ids: HashSet<TheaterId> = req.theater_ids.iter().copied().collect();
    if theater_ids.len() != req.theater_ids.len() {
        return Err(ApiError::BadRequest(
            "duplicate theater ids in request".to_string(),
        ));
    }
    state.store.add_theaters_to_movie(movie_id, theater_ids)?;
    Ok(())
}

async fn clear(State(state): State<AppState>) {
    state.store.clear();
    info!("store cleared by admin request");
}

fn unique_names(names: Vec<String>) -> Result<HashSet<String>, ApiError> {
    let set: HashSet<String> = names.iter().cloned().collect();
    if set.len() != names.len() {
        return Err(ApiError::BadRequest("duplicate names in request".to_string()));
    }
    if set.is_empty() {
        return Err(ApiError::BadRequest("empty name list".to_string()));
    }
    Ok(set)
}
