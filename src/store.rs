use std::{collections::HashSet, path::Path};

use log::debug;
use sqlite::{Connection, OpenFlags, State};

use crate::{
    common::{quote_identifier, SeedError},
    flight::{FlightRecord, FLIGHT_COLUMNS},
};

/// Exclusive owner of the SQLite connection for one run.
pub struct FlightStore {
    connection: Connection,
}

impl FlightStore {
    /// Opens an existing database. A missing file is an error rather than
    /// being created empty.
    ///
    /// # Errors
    ///
    /// [`SeedError::DatabaseNotFound`] or on failing to open.
    pub fn open(path: &Path) -> Result<Self, SeedError> {
        if !path.exists() {
            return Err(SeedError::DatabaseNotFound(path.to_path_buf()));
        }

        let connection =
            Connection::open_with_flags(path, OpenFlags::new().with_read_write())?;
        debug!("Opened database {}", path.display());

        Ok(Self { connection })
    }

    #[must_use]
    pub const fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    /// # Errors
    ///
    /// On store failure.
    pub fn table_exists(&self, table: &str) -> Result<bool, SeedError> {
        let mut statement = self
            .connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")?;
        statement.bind((1, table))?;

        Ok(statement.next()? == State::Row)
    }

    /// # Errors
    ///
    /// On store failure, including a missing table.
    pub fn existing_flight_codes(&self, table: &str) -> Result<HashSet<String>, SeedError> {
        let mut statement = self
            .connection
            .prepare(format!("SELECT flight FROM {}", quote_identifier(table)))?;

        let mut codes = HashSet::new();
        while statement.next()? == State::Row {
            codes.insert(statement.read::<String, _>(0)?);
        }

        Ok(codes)
    }

    /// # Errors
    ///
    /// On store failure, including a missing table.
    pub fn count_rows(&self, table: &str) -> Result<usize, SeedError> {
        let mut statement = self
            .connection
            .prepare(format!("SELECT COUNT(*) FROM {}", quote_identifier(table)))?;
        statement.next()?;

        Ok(usize::try_from(statement.read::<i64, _>(0)?).unwrap_or_default())
    }

    /// Deletes every row and returns how many were removed.
    ///
    /// # Errors
    ///
    /// On store failure, including a missing table.
    pub fn delete_all(&self, table: &str) -> Result<usize, SeedError> {
        self.connection
            .execute(format!("DELETE FROM {}", quote_identifier(table)))?;
        let deleted = self.connection.change_count();
        debug!("Deleted {deleted} rows from {table}");

        Ok(deleted)
    }

    /// Inserts all records with one prepared statement. Not transactional on
    /// its own, wrap in [`FlightStore::transaction`].
    ///
    /// # Errors
    ///
    /// On store failure, e.g. a primary key violation.
    pub fn insert_flights(&self, table: &str, flights: &[FlightRecord]) -> Result<usize, SeedError> {
        let placeholders = vec!["?"; FLIGHT_COLUMNS.len()].join(", ");
        let mut statement = self.connection.prepare(format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            quote_identifier(table),
            FLIGHT_COLUMNS.join(", "),
        ))?;

        for flight in flights {
            statement.reset()?;
            for (idx, value) in flight.to_row().iter().enumerate() {
                statement.bind((idx + 1, value.as_str()))?;
            }
            while statement.next()? != State::Done {}
        }

        Ok(flights.len())
    }

    /// Runs `work` between `BEGIN` and `COMMIT`, rolling back if it fails.
    ///
    /// # Errors
    ///
    /// Whatever `work` returns, or on store failure.
    pub fn transaction<T, F>(&self, work: F) -> Result<T, SeedError>
    where
        F: FnOnce(&Self) -> Result<T, SeedError>,
    {
        self.connection.execute("BEGIN")?;

        let result = work(self).and_then(|value| {
            self.connection.execute("COMMIT")?;
            Ok(value)
        });

        // A failed COMMIT can leave the transaction open.
        if result.is_err() {
            if let Err(rollback_err) = self.connection.execute("ROLLBACK") {
                log::warn!("Rollback failed: {rollback_err}");
            }
        }

        result
    }
}

/// Schema used by the tests and by anyone bootstrapping an empty database.
#[must_use]
pub fn create_flights_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (
            flight VARCHAR(10) NOT NULL PRIMARY KEY,
            origin VARCHAR(20) NOT NULL,
            destination VARCHAR(20) NOT NULL,
            departure_date DATETIME NOT NULL,
            arrival_date DATETIME NOT NULL,
            price DECIMAL NOT NULL,
            buyUrl TEXT NOT NULL
        )",
        quote_identifier(table)
    )
}
