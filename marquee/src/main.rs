use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use config::CONFIG;
use log::LevelFilter;

use crate::{api::AppState, db::Database};

mod api;
mod config;
mod db;
mod service;

/// Movie theater listing server
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Dumps the contents of the database and exits
    #[clap(short, long)]
    dump: bool,

    /// Cleans the contents of the database and exits
    #[clap(short, long)]
    clean: bool,

    /// Increases log level
    #[clap(short, long)]
    verbose: bool,
}

#[macro_use]
extern crate anyhow;

#[macro_use]
extern crate log;

/// Saves the configured theaters, movies and showings, overwriting stored copies.
fn seed(db: &Database) -> Result<()> {
    for movie in &CONFIG.movies {
        db.save_movie(movie)
            .with_context(|| format!("failed to save movie {}", movie.movie_id))?;
    }
    for theater in &CONFIG.theaters {
        db.save_theater(theater)
            .with_context(|| format!("failed to save theater {}", theater.theater_id))?;
    }
    for showing in &CONFIG.showings {
        db.save_showing(showing).with_context(|| {
            format!(
                "failed to save showing of movie {} at theater {}",
                showing.movie_id, showing.theater_id
            )
        })?;
    }
    info!(
        "seeded {} theaters, {} movies, {} showings",
        CONFIG.theaters.len(),
        CONFIG.movies.len(),
        CONFIG.showings.len()
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_module("sled", LevelFilter::Warn)
        .parse_env(
            env_logger::Env::default().default_filter_or(if args.verbose {
                "debug"
            } else {
                "info"
            }),
        )
        .init();

    let db = Database::new(sled::open(&*CONFIG.db_file).expect("sled failed to init db"));
    if args.dump {
        println!("dumping");
        for (key, value) in db.dump().expect("failed to dump db") {
            println!("{} = {}", key, value);
        }
        return;
    }
    if args.clean {
        db.clear().expect("clean failed");
        db.flush().await.expect("flush failed");
        return;
    }
    seed(&db).expect("failed to seed db");

    if let Some(metrics_bind) = CONFIG.metrics_bind {
        match prometheus_exporter::start(metrics_bind) {
            Ok(_) => info!("metrics listening on {}", metrics_bind),
            Err(e) => error!("failed to start metrics exporter: {:?}", e),
        }
    }

    let db = Arc::new(db);
    api::serve(
        AppState {
            database: db.clone(),
            theaters: db,
        },
        CONFIG.bind,
    )
    .await;
}
