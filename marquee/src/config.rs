use std::net::SocketAddr;

use marquee_types::{Movie, MovieTheater, Theater};
use serde::Deserialize;

fn default_bind() -> SocketAddr {
    ([0, 0, 0, 0], 8000).into()
}

#[derive(Deserialize)]
pub struct Config {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// prometheus exporter is only started when set
    pub metrics_bind: Option<SocketAddr>,
    pub db_file: String,
    /// saved into the database on every startup
    #[serde(default)]
    pub theaters: Vec<Theater>,
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub showings: Vec<MovieTheater>,
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = {
        let mut path = std::env::var("MARQUEE_CONFIG").unwrap_or_default();
        if path.is_empty() {
            path = "config.yml".to_string();
        }
        let raw = std::fs::read_to_string(path).expect("failed to read config");
        serde_yaml::from_str(&raw).expect("failed to parse config")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: Config = serde_yaml::from_str(
            r#"
db_file: ./marquee.db
metrics_bind: 127.0.0.1:9000
theaters:
  - theater_id: 1
    name: Regal City Center
    city: Vancouver
movies:
  - movie_id: 7
    title: Spirited Away
    runtime_in_minutes: 125
showings:
  - movie_id: 7
    theater_id: 1
"#,
        )
        .unwrap();
        assert_eq!(config.bind, default_bind());
        assert_eq!(config.metrics_bind, Some(([127, 0, 0, 1], 9000).into()));
        assert_eq!(config.theaters[0].city.as_deref(), Some("Vancouver"));
        assert!(config.theaters[0].created_at.is_none());
        assert_eq!(config.movies[0].runtime_in_minutes, Some(125));
        assert!(config.showings[0].is_showing);
    }
}
