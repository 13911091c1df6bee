use std::iter::once;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use cli_table::{print_stdout, Table, WithTitle};
use marquee_types::{Envelope, ErrorBody, Movie, TheaterListing};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// Movie theater listing client
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// If set, overrides default and env var lookup (MARQUEE_API) for marquee API server (default is http://localhost:8000/)
    #[clap(short, long)]
    api: Option<Url>,
    /// Increases log level
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    Theater {
        #[clap(subcommand)]
        mode: TheaterMode,
    },
    Movie {
        #[clap(subcommand)]
        mode: MovieMode,
    },
}

#[derive(Subcommand, Debug)]
enum TheaterMode {
    List {
        /// Only list theaters currently showing this movie
        #[clap(short, long)]
        movie_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum MovieMode {
    List,
    Get {
        /// ID of movie to get
        id: String,
    },
}

lazy_static::lazy_static! {
    static ref ARGS: Args = Args::parse();
    static ref API: Url = {
        if let Some(api) = &ARGS.api {
            api.clone()
        } else {
            let raw_api = std::env::var("MARQUEE_API").unwrap_or_default();
            if raw_api.is_empty() {
                "http://localhost:8000/".parse().unwrap()
            } else {
                raw_api.parse().expect("failed to parse MARQUEE_API as URL")
            }
        }
    };
    static ref CLIENT: Client = Client::new();
}

#[tokio::main]
async fn main() {
    lazy_static::initialize(&API);
    env_logger::Builder::new()
        .parse_env(
            env_logger::Env::default().default_filter_or(if ARGS.verbose {
                "debug"
            } else {
                "info"
            }),
        )
        .init();

    if let Err(e) = execute_mode(&ARGS.mode).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Appends `segments` to `base`, skipping empty ones. Segments are percent encoded.
fn endpoint<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| anyhow!("API url '{base}' cannot be a base"))?;
        path.pop_if_empty();
        for segment in segments {
            if !segment.is_empty() {
                path.push(segment);
            }
        }
    }
    Ok(url)
}

/// GETs an endpoint and unwraps the `data` envelope.
async fn get<'a, T: DeserializeOwned>(segments: impl IntoIterator<Item = &'a str>) -> Result<T> {
    let url = endpoint(&API, segments)?;
    log::debug!("GET {url}");
    let response = CLIENT.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await?;
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => bail!("Got HTTP Status: {}\n{}", status, body.error),
            Err(_) => bail!("Got HTTP Status: {}\n{}", status, text),
        }
    }
    let body: Envelope<T> = response.json().await?;
    Ok(body.data)
}

#[derive(Table)]
struct TheaterTable {
    #[table(title = "Id")]
    id: u64,
    #[table(title = "Name")]
    name: String,
    #[table(title = "Address")]
    address: String,
    #[table(title = "Now Showing")]
    now_showing: String,
}

impl From<TheaterListing> for TheaterTable {
    fn from(value: TheaterListing) -> Self {
        Self {
            id: value.theater.theater_id,
            address: value.theater.address(),
            name: value.theater.name,
            now_showing: value
                .movies
                .into_iter()
                .filter(|x| x.is_showing)
                .map(|x| x.movie.title)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Table)]
struct MovieTable {
    #[table(title = "Id")]
    id: u64,
    #[table(title = "Title")]
    title: String,
    #[table(title = "Runtime (min)")]
    runtime: String,
    #[table(title = "Rating")]
    rating: String,
}

impl From<Movie> for MovieTable {
    fn from(value: Movie) -> Self {
        Self {
            id: value.movie_id,
            title: value.title,
            runtime: value
                .runtime_in_minutes
                .map(|x| x.to_string())
                .unwrap_or_default(),
            rating: value.rating.unwrap_or_default(),
        }
    }
}

async fn execute_mode(mode: &Mode) -> Result<()> {
    match mode {
        Mode::Theater { mode } => match mode {
            TheaterMode::List { movie_id } => {
                let list: Vec<TheaterListing> = match movie_id.as_deref() {
                    None | Some("") => get("api/v1/theaters".split('/')).await?,
                    Some(movie_id) => {
                        get("api/v1/movies"
                            .split('/')
                            .chain(once(movie_id))
                            .chain(once("theaters")))
                        .await?
                    }
                };
                let list: Vec<TheaterTable> = list.into_iter().map(Into::into).collect();
                print_stdout(list.with_title())?;
            }
        },
        Mode::Movie { mode } => match mode {
            MovieMode::List => {
                let list: Vec<Movie> = get("api/v1/movies".split('/')).await?;
                let list: Vec<MovieTable> = list.into_iter().map(Into::into).collect();
                print_stdout(list.with_title())?;
            }
            MovieMode::Get { id } => {
                let movie: Movie = get("api/v1/movies".split('/').chain(once(&**id))).await?;
                println!("{}", serde_json::to_string_pretty(&movie)?);
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use marquee_types::{MovieShowing, Theater};

    use super::*;

    #[test]
    fn test_endpoint() {
        let base: Url = "http://localhost:8000/".parse().unwrap();
        let url = endpoint(&base, "api/v1/movies".split('/').chain(once("7 8"))).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/movies/7%208");

        let base: Url = "http://example.com/marquee".parse().unwrap();
        let url = endpoint(&base, "/api/v1/theaters".split('/')).unwrap();
        assert_eq!(url.as_str(), "http://example.com/marquee/api/v1/theaters");
    }

    #[test]
    fn test_endpoint_rejects_non_base() {
        let base: Url = "mailto:box@example.com".parse().unwrap();
        assert!(endpoint(&base, once("theaters")).is_err());
    }

    #[test]
    fn test_theater_table_lists_only_showing() {
        let movie = |movie_id: u64, title: &str, is_showing: bool| MovieShowing {
            movie: Movie {
                movie_id,
                title: title.to_string(),
                runtime_in_minutes: None,
                rating: None,
                description: None,
                image_url: None,
            },
            is_showing,
        };
        let row: TheaterTable = TheaterListing {
            theater: Theater {
                theater_id: 3,
                name: "AMC".to_string(),
                address_line_1: Some("1 Main St.".to_string()),
                address_line_2: None,
                city: Some("Portland".to_string()),
                state: None,
                zip: None,
                created_at: None,
                updated_at: None,
            },
            movies: vec![
                movie(1, "Paprika", true),
                movie(2, "Akira", false),
                movie(3, "Perfect Blue", true),
            ],
        }
        .into();
        assert_eq!(row.id, 3);
        assert_eq!(row.address, "1 Main St., Portland");
        assert_eq!(row.now_showing, "Paprika, Perfect Blue");
    }
}
