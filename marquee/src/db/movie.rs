use marquee_types::Movie;

use anyhow::Result;

use super::{id_key, Database};

impl Database {
    pub fn save_movie(&self, movie: &Movie) -> Result<()> {
        self.put_serde(format!("movie-{}", id_key(movie.movie_id)), movie)
    }

    pub fn get_movie(&self, movie_id: u64) -> Result<Option<Movie>> {
        self.get_serde("movie", &id_key(movie_id))
    }

    pub fn list_movie(&self) -> Result<Vec<Movie>> {
        self.list_serde("movie-")
    }
}
