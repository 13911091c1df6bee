use core::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    *,
};
use marquee_types::{Envelope, ErrorBody};

use crate::db::Database;
use crate::service::{InvalidMovieId, TheaterService};

use self::logger::LoggerLayer;
use anyhow::Result;

mod logger;
mod movie;
mod theater;

/// Every handler failure ends up here and is turned into a response exactly once.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Other(anyhow::Error),
}

impl ApiError {
    /// Maps a service failure: malformed input is the client's fault, anything else is ours.
    pub fn service(e: anyhow::Error) -> Self {
        match e.downcast_ref::<InvalidMovieId>() {
            Some(invalid) => ApiError::BadRequest(invalid.to_string()),
            None => ApiError::Other(e),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Debug>::fmt(self, f)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Other(e) => {
                error!("internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong!".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Successful handler output, serialized as `{ "data": ... }`
pub type ApiData<T> = ApiResult<Json<Envelope<T>>>;

#[derive(Clone)]
pub struct AppState {
    pub database: Arc<Database>,
    pub theaters: Arc<dyn TheaterService>,
}

async fn health() {}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Path not found: {}", uri.path()))
}

fn route(state: AppState) -> Router {
    let api = Router::<AppState>::new()
        .merge(theater::route())
        .nest("/movies", movie::route())
        .route("/health", routing::get(health))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api)
        .fallback(not_found)
        .layer(LoggerLayer)
}

/// Serves the API forever, rebinding a second after any server failure.
pub async fn serve(state: AppState, bind: SocketAddr) {
    async fn run(state: AppState, bind: SocketAddr) -> Result<()> {
        let server = axum::Server::try_bind(&bind)?;
        info!("api listening on {}", bind);
        server
            .serve(route(state).into_make_service_with_connect_info::<SocketAddr>())
            .await?;
        Ok(())
    }
    loop {
        if let Err(e) = run(state.clone(), bind).await {
            error!("failed to start api server: {:?}", e);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
