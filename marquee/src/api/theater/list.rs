use axum::extract::{rejection::PathRejection, Path, State};
use marquee_types::TheaterListing;

use super::*;

/// Calls `list` when `movie_id` is absent or empty, `read` otherwise.
async fn theaters(
    state: &AppState,
    movie_id: Option<String>,
) -> ApiData<Vec<TheaterListing>> {
    let theaters = match movie_id.filter(|movie_id| !movie_id.is_empty()) {
        None => state.theaters.list().await,
        Some(movie_id) => state.theaters.read(&movie_id).await,
    }
    .map_err(ApiError::service)?;
    Ok(Json(Envelope::new(theaters)))
}

pub(super) async fn list(State(state): State<AppState>) -> ApiData<Vec<TheaterListing>> {
    theaters(&state, None).await
}

/// A path that fails to decode is rejected rather than treated as absent.
pub(super) async fn list_for_movie(
    State(state): State<AppState>,
    movie_id: Result<Path<String>, PathRejection>,
) -> ApiData<Vec<TheaterListing>> {
    let Path(movie_id) = movie_id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    theaters(&state, Some(movie_id)).await
}
