use super::*;

mod get;
mod list;

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/", routing::get(list::list))
        .route("/:movie_id", routing::get(get::get))
}
