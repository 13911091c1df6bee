use axum::extract::{Path, State};
use marquee_types::Movie;

use super::*;
use crate::service::parse_movie_id;

pub(super) async fn get(
    Path(movie_id): Path<String>,
    State(state): State<AppState>,
) -> ApiData<Movie> {
    let movie_id = parse_movie_id(&movie_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    state
        .database
        .get_movie(movie_id)
        .map_err(ApiError::Other)?
        .map(Envelope::new)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Movie cannot be found.".to_string()))
}
