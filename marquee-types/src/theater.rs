use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MovieShowing;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theater {
    pub theater_id: u64,
    pub name: String,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    /// set by the database on first save
    pub created_at: Option<DateTime<Utc>>,
    /// set by the database on every save
    pub updated_at: Option<DateTime<Utc>>,
}

impl Theater {
    pub fn address(&self) -> String {
        [
            self.address_line_1.as_deref(),
            self.address_line_2.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.zip.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|x| !x.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// A theater together with the movies on its listing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TheaterListing {
    #[serde(flatten)]
    pub theater: Theater,
    pub movies: Vec<MovieShowing>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Movie;
    use serde_json::json;

    fn theater() -> Theater {
        Theater {
            theater_id: 1,
            name: "Regal City Center".to_string(),
            address_line_1: Some("801 C St.".to_string()),
            address_line_2: None,
            city: Some("Vancouver".to_string()),
            state: Some("WA".to_string()),
            zip: Some("98660".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_address() {
        assert_eq!(theater().address(), "801 C St., Vancouver, WA, 98660");
    }

    #[test]
    fn test_listing_flattens_theater() {
        let listing = TheaterListing {
            theater: theater(),
            movies: vec![MovieShowing {
                movie: Movie {
                    movie_id: 7,
                    title: "Spirited Away".to_string(),
                    runtime_in_minutes: Some(125),
                    rating: Some("PG".to_string()),
                    description: None,
                    image_url: None,
                },
                is_showing: true,
            }],
        };
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["theater_id"], json!(1));
        assert_eq!(value["name"], json!("Regal City Center"));
        assert_eq!(value["movies"][0]["movie_id"], json!(7));
        assert_eq!(value["movies"][0]["is_showing"], json!(true));

        let back: TheaterListing = serde_json::from_value(value).unwrap();
        assert_eq!(back, listing);
    }
}
