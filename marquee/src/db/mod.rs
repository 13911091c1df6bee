use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use sled::Db;

mod movie;
pub use movie::*;

mod showing;
pub use showing::*;

mod theater;
pub use theater::*;

pub struct Database {
    db: Db,
}

/// ids are zero padded so that prefix scans come back in id order
fn id_key(id: u64) -> String {
    format!("{id:010}")
}

impl Database {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn flush(&self) -> Result<()> {
        self.db.flush_async().await?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.db.clear()?;
        Ok(())
    }

    pub fn dump(&self) -> Result<Vec<(String, String)>> {
        let mut out = vec![];
        for entry in self.db.iter() {
            let (key, value) = entry?;
            out.push((
                String::from_utf8(key.to_vec())?,
                String::from_utf8(value.to_vec())?,
            ));
        }
        Ok(out)
    }

    fn put_serde<T: Serialize>(&self, key: String, value: &T) -> Result<()> {
        self.db
            .insert(key, serde_json::to_string(value)?.as_bytes())?;
        Ok(())
    }

    fn get_serde<T: DeserializeOwned>(&self, prefix: &str, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.db.get(format!("{prefix}-{key}"))? else {
            return Ok(None);
        };
        let utf = String::from_utf8(raw.to_vec())?;
        Ok(Some(serde_json::from_str(&utf)?))
    }

    fn list_serde<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>> {
        let mut out = vec![];
        for entry in self.db.scan_prefix(prefix) {
            let (_, value) = entry?;
            let value = std::str::from_utf8(&value[..])?;
            out.push(serde_json::from_str(value)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
pub(crate) fn test_database() -> Database {
    Database::new(
        sled::Config::new()
            .temporary(true)
            .open()
            .expect("failed to open temporary sled db"),
    )
}
