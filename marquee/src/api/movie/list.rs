use axum::extract::State;
use marquee_types::Movie;

use super::*;

pub(super) async fn list(State(state): State<AppState>) -> ApiData<Vec<Movie>> {
    state
        .database
        .list_movie()
        .map_err(ApiError::Other)
        .map(Envelope::new)
        .map(Json)
}
