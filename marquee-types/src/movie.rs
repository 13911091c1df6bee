use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub movie_id: u64,
    pub title: String,
    pub runtime_in_minutes: Option<u32>,
    pub rating: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

fn default_is_showing() -> bool {
    true
}

/// Links a movie to a theater's listing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieTheater {
    pub movie_id: u64,
    pub theater_id: u64,
    /// false once a theater stops screening the movie but keeps it listed
    #[serde(default = "default_is_showing")]
    pub is_showing: bool,
}

/// A movie as it appears on one theater's listing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieShowing {
    #[serde(flatten)]
    pub movie: Movie,
    pub is_showing: bool,
}
