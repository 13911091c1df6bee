use marquee_types::MovieTheater;

use anyhow::Result;

use super::{id_key, Database};

impl Database {
    /// writes the listing entry and its `playing-` reverse index
    pub fn save_showing(&self, showing: &MovieTheater) -> Result<()> {
        let theater_id = id_key(showing.theater_id);
        let movie_id = id_key(showing.movie_id);
        self.put_serde(format!("showing-{theater_id}-{movie_id}"), showing)?;
        self.put_serde(format!("playing-{movie_id}-{theater_id}"), showing)?;
        Ok(())
    }

    /// every movie on a theater's listing, showing or not
    pub fn list_showing_theater(&self, theater_id: u64) -> Result<Vec<MovieTheater>> {
        self.list_serde(&format!("showing-{}-", id_key(theater_id)))
    }

    /// every theater listing a movie, showing or not
    pub fn list_showing_movie(&self, movie_id: u64) -> Result<Vec<MovieTheater>> {
        self.list_serde(&format!("playing-{}-", id_key(movie_id)))
    }
}
