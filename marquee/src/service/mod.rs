mod database;

use std::fmt;

use anyhow::Result;
use marquee_types::TheaterListing;

/// A movie id that is not a number. Reported to clients as a bad request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMovieId(pub String);

impl fmt::Display for InvalidMovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid movie id '{}'", self.0)
    }
}

impl std::error::Error for InvalidMovieId {}

pub fn parse_movie_id(movie_id: &str) -> Result<u64, InvalidMovieId> {
    movie_id
        .parse()
        .map_err(|_| InvalidMovieId(movie_id.to_string()))
}

/// Read access to theater listings, as served by the API.
#[async_trait::async_trait]
pub trait TheaterService: Send + Sync {
    /// Every theater with its full listing.
    async fn list(&self) -> Result<Vec<TheaterListing>>;

    /// Theaters currently showing `movie_id`. Each listing carries only that movie.
    async fn read(&self, movie_id: &str) -> Result<Vec<TheaterListing>>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use super::*;

    /// Records every call and answers with a canned result.
    pub(crate) struct RecordingService {
        theaters: Option<Vec<TheaterListing>>,
        list_calls: AtomicUsize,
        read_calls: Mutex<Vec<String>>,
    }

    impl RecordingService {
        pub(crate) fn returning(theaters: Vec<TheaterListing>) -> Self {
            Self {
                theaters: Some(theaters),
                list_calls: AtomicUsize::new(0),
                read_calls: Mutex::new(vec![]),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                theaters: None,
                ..Self::returning(vec![])
            }
        }

        pub(crate) fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        pub(crate) fn read_calls(&self) -> Vec<String> {
            self.read_calls.lock().unwrap().clone()
        }

        fn answer(&self) -> Result<Vec<TheaterListing>> {
            self.theaters
                .clone()
                .ok_or_else(|| anyhow!("storage unavailable"))
        }
    }

    #[async_trait::async_trait]
    impl TheaterService for RecordingService {
        async fn list(&self) -> Result<Vec<TheaterListing>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.answer()
        }

        async fn read(&self, movie_id: &str) -> Result<Vec<TheaterListing>> {
            self.read_calls.lock().unwrap().push(movie_id.to_string());
            self.answer()
        }
    }
}
