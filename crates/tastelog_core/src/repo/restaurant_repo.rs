//! Restaurant repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `restaurants` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Listing order follows the storage-assigned id (insertion order).

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::restaurant::{
    Restaurant, RestaurantDraft, RestaurantId, RestaurantValidationError,
};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RESTAURANT_SELECT_SQL: &str = "SELECT id, name, score FROM restaurants";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for restaurant persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RestaurantValidationError),
    Db(DbError),
    NotFound(RestaurantId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "restaurant not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted restaurant data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: expected schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RestaurantValidationError> for RepoError {
    fn from(value: RestaurantValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for restaurant CRUD operations.
pub trait RestaurantRepository {
    /// Inserts a new record and returns its storage-assigned id.
    fn create(&self, draft: &RestaurantDraft) -> RepoResult<RestaurantId>;
    /// Gets one record by id.
    fn get(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>>;
    /// Lists all records in insertion order.
    fn list(&self) -> RepoResult<Vec<Restaurant>>;
    /// Replaces name and score of an existing record.
    fn update(&self, record: &Restaurant) -> RepoResult<()>;
    /// Hard-deletes a record by id.
    fn delete(&self, id: RestaurantId) -> RepoResult<()>;
    /// Returns all scores in insertion order.
    fn scores(&self) -> RepoResult<Vec<f64>>;
}

/// SQLite-backed restaurant repository.
pub struct SqliteRestaurantRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRestaurantRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RestaurantRepository for SqliteRestaurantRepository<'_> {
    fn create(&self, draft: &RestaurantDraft) -> RepoResult<RestaurantId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO restaurants (name, score) VALUES (?1, ?2);",
            params![draft.name.as_str(), draft.score],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESTAURANT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_restaurant_row(row)?));
        }

        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Restaurant>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESTAURANT_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_restaurant_row(row)?);
        }

        Ok(records)
    }

    fn update(&self, record: &Restaurant) -> RepoResult<()> {
        record.validate()?;

        let changed = self.conn.execute(
            "UPDATE restaurants SET name = ?1, score = ?2 WHERE id = ?3;",
            params![record.name.as_str(), record.score, record.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.id));
        }

        Ok(())
    }

    fn delete(&self, id: RestaurantId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM restaurants WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn scores(&self) -> RepoResult<Vec<f64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT score FROM restaurants ORDER BY id ASC;")?;

        let mut rows = stmt.query([])?;
        let mut scores = Vec::new();

        while let Some(row) = rows.next()? {
            scores.push(row.get(0)?);
        }

        Ok(scores)
    }
}

fn parse_restaurant_row(row: &Row<'_>) -> RepoResult<Restaurant> {
    let record = Restaurant {
        id: row.get("id")?,
        name: row.get("name")?,
        score: row.get("score")?,
    };

    record
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("row id {}: {err}", record.id)))?;

    Ok(record)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    if actual_version == 0 || actual_version > expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "restaurants")? {
        return Err(RepoError::MissingRequiredTable("restaurants"));
    }

    for column in ["id", "name", "score"] {
        if !table_has_column(conn, "restaurants", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "restaurants",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_table_info(?1)
            WHERE name = ?2
        );",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
