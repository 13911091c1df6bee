use chrono::Utc;
use marquee_types::Theater;

use anyhow::Result;

use super::{id_key, Database};

impl Database {
    /// stamps `updated_at`, and `created_at` if this is the first save
    pub fn save_theater(&self, theater: &Theater) -> Result<Theater> {
        let now = Utc::now();
        let mut theater = theater.clone();
        if theater.created_at.is_none() {
            theater.created_at = self
                .get_theater(theater.theater_id)?
                .and_then(|x| x.created_at)
                .or(Some(now));
        }
        theater.updated_at = Some(now);
        self.put_serde(format!("theater-{}", id_key(theater.theater_id)), &theater)?;
        Ok(theater)
    }

    pub fn get_theater(&self, theater_id: u64) -> Result<Option<Theater>> {
        self.get_serde("theater", &id_key(theater_id))
    }

    pub fn list_theater(&self) -> Result<Vec<Theater>> {
        self.list_serde("theater-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_database;

    fn theater(theater_id: u64, name: &str) -> Theater {
        Theater {
            theater_id,
            name: name.to_string(),
            address_line_1: None,
            address_line_2: None,
            city: None,
            state: None,
            zip: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_save_stamps_and_keeps_created_at() {
        let db = test_database();
        let first = db.save_theater(&theater(1, "Regal")).unwrap();
        let created_at = first.created_at.unwrap();
        assert!(first.updated_at.is_some());

        let second = db.save_theater(&theater(1, "Regal City Center")).unwrap();
        assert_eq!(second.created_at, Some(created_at));

        let stored = db.get_theater(1).unwrap().unwrap();
        assert_eq!(stored.name, "Regal City Center");
        assert_eq!(stored.created_at, Some(created_at));
    }

    #[test]
    fn test_list_in_id_order() {
        let db = test_database();
        db.save_theater(&theater(10, "AMC")).unwrap();
        db.save_theater(&theater(2, "Regal")).unwrap();
        db.save_theater(&theater(9, "Cinemark")).unwrap();
        let ids: Vec<u64> = db
            .list_theater()
            .unwrap()
            .into_iter()
            .map(|x| x.theater_id)
            .collect();
        assert_eq!(ids, vec![2, 9, 10]);
    }
}
