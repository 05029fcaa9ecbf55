use super::error::CacheError;
use crate::sdk::route::{format_degrees, Coordinate};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::{fmt, path::Path};

/// Same layout as `CURRENT_TIMESTAMP`, so rows written by either side compare.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// language=sql
const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS raw_fields (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        stored_time TIMESTAMP DATETIME DEFAULT CURRENT_TIMESTAMP,
        latitude text,
        longitude text,
        road text,
        city text,
        postcode text,
        country text
    )
";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressRecord {
    pub road: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
}

/// Rounded coordinate in its stored text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub latitude: String,
    pub longitude: String,
}

impl From<Coordinate> for CacheKey {
    fn from(coordinate: Coordinate) -> Self {
        let rounded = coordinate.rounded();
        Self {
            latitude: format_degrees(rounded.lat),
            longitude: format_degrees(rounded.lon),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub record: AddressRecord,
    pub stored_time: Option<NaiveDateTime>,
}

/// Append-only store of resolved addresses, keyed by rounded coordinate.
///
/// The handle owns its SQLite connection; dropping it closes the database.
pub struct AddressCache {
    conn: Connection,
}

impl AddressCache {
    /// Opens (or creates) the cache file and makes sure the table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let path = path.as_ref();
        let open_error = |source: rusqlite::Error| CacheError::Open {
            path: path.to_path_buf(),
            source,
        };
        let conn = Connection::open(path).map_err(open_error)?;
        Self::with_schema(conn).map_err(open_error)
    }

    pub fn open_in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::with_schema(conn)?)
    }

    fn with_schema(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn lookup(&self, coordinate: Coordinate) -> Result<Option<AddressRecord>, CacheError> {
        Ok(self.entry(coordinate)?.map(|entry| entry.record))
    }

    pub fn entry(&self, coordinate: Coordinate) -> Result<Option<CacheEntry>, CacheError> {
        // language=sql
        const QUERY: &str = "
            SELECT stored_time, road, city, postcode, country FROM raw_fields
            WHERE latitude = ?1 AND longitude = ?2
            ORDER BY id LIMIT 1
        ";

        let key = CacheKey::from(coordinate);
        let entry = self
            .conn
            .query_row(QUERY, params![key.latitude, key.longitude], |row| {
                let text = |index: usize| row.get::<_, Option<String>>(index).map(Option::unwrap_or_default);
                Ok(CacheEntry {
                    key: key.clone(),
                    record: AddressRecord {
                        road: text(1)?,
                        city: text(2)?,
                        postcode: text(3)?,
                        country: text(4)?,
                    },
                    stored_time: row
                        .get::<_, Option<String>>(0)?
                        .and_then(|t| NaiveDateTime::parse_from_str(&t, TIMESTAMP_FORMAT).ok()),
                })
            })
            .optional()?;
        Ok(entry)
    }

    /// Inserts the record unless the rounded key is already present.
    ///
    /// Returns whether a row was written. Existing rows are never overwritten.
    pub fn store(&self, coordinate: Coordinate, record: &AddressRecord) -> Result<bool, CacheError> {
        // language=sql
        const QUERY: &str = "
            INSERT INTO raw_fields (stored_time, latitude, longitude, road, city, postcode, country)
            SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
            WHERE NOT EXISTS (SELECT 1 FROM raw_fields WHERE latitude = ?2 AND longitude = ?3)
        ";

        let key = CacheKey::from(coordinate);
        let stored_time = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let inserted = self.conn.execute(
            QUERY,
            params![
                stored_time,
                key.latitude,
                key.longitude,
                record.road,
                record.city,
                record.postcode,
                record.country,
            ],
        )?;
        if inserted > 0 {
            log::debug!("[CACHE STORE] {}", key);
        }
        Ok(inserted > 0)
    }

    pub fn len(&self) -> Result<usize, CacheError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM raw_fields", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }
}
