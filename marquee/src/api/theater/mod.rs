use super::*;

mod list;

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/theaters", routing::get(list::list))
        .route("/movies/:movie_id/theaters", routing::get(list::list_for_movie))
}
