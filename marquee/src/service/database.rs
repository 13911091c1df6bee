use anyhow::Result;
use marquee_types::{MovieShowing, MovieTheater, Theater, TheaterListing};

use crate::db::Database;

use super::{parse_movie_id, TheaterService};

impl Database {
    fn showings(&self, links: Vec<MovieTheater>) -> Result<Vec<MovieShowing>> {
        let mut out = Vec::with_capacity(links.len());
        for link in links {
            let Some(movie) = self.get_movie(link.movie_id)? else {
                warn!(
                    "theater {} lists unknown movie {}, skipping",
                    link.theater_id, link.movie_id
                );
                continue;
            };
            out.push(MovieShowing {
                movie,
                is_showing: link.is_showing,
            });
        }
        Ok(out)
    }

    fn listing(&self, theater: Theater) -> Result<TheaterListing> {
        let movies = self.showings(self.list_showing_theater(theater.theater_id)?)?;
        Ok(TheaterListing { theater, movies })
    }
}

#[async_trait::async_trait]
impl TheaterService for Database {
    async fn list(&self) -> Result<Vec<TheaterListing>> {
        self.list_theater()?
            .into_iter()
            .map(|theater| self.listing(theater))
            .collect()
    }

    async fn read(&self, movie_id: &str) -> Result<Vec<TheaterListing>> {
        let movie_id = parse_movie_id(movie_id)?;
        let mut out = vec![];
        for link in self.list_showing_movie(movie_id)? {
            if !link.is_showing {
                continue;
            }
            let Some(theater) = self.get_theater(link.theater_id)? else {
                bail!(
                    "dangling showing of movie {} at theater {}",
                    link.movie_id,
                    link.theater_id
                );
            };
            out.push(TheaterListing {
                theater,
                movies: self.showings(vec![link])?,
            });
        }
        Ok(out)
    }
}
