use chrono::NaiveDateTime;
use indexmap::IndexMap;
use log::{info, warn};
use rand::Rng;

use crate::{
    code_generator::FlightCodeGenerator,
    common::SeedError,
    config::SeedConfig,
    generator::FlightGenerator,
    store::FlightStore,
};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PopulateReport {
    pub inserted: IndexMap<String, usize>,
}

impl PopulateReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.inserted.values().sum()
    }
}

pub struct TablePopulator<'a> {
    store: &'a FlightStore,
    config: &'a SeedConfig,
    now: NaiveDateTime,
}

impl<'a> TablePopulator<'a> {
    #[must_use]
    pub const fn new(store: &'a FlightStore, config: &'a SeedConfig, now: NaiveDateTime) -> Self {
        Self { store, config, now }
    }

    /// Keeps the names that exist in the store. Falls back to the configured
    /// candidates when `requested` is empty.
    ///
    /// # Errors
    ///
    /// [`SeedError::NoFlightTables`] when none exist, or on store failure.
    pub fn resolve_tables(&self, requested: &[String]) -> Result<Vec<String>, SeedError> {
        let tried = if requested.is_empty() {
            self.config.table_candidates.as_slice()
        } else {
            requested
        };

        let mut found = vec![];
        for table in tried {
            if self.store.table_exists(table)? {
                found.push(table.clone());
            } else {
                warn!("Table {table} does not exist, skipping");
            }
        }

        if found.is_empty() {
            return Err(SeedError::NoFlightTables {
                tried: tried.to_vec(),
            });
        }

        Ok(found)
    }

    /// Seeds every existing table of `requested` (or of the candidates).
    /// `on_seeded` runs right after each table commits, so callers learn
    /// about tables already written even if a later one fails. A table named
    /// twice is seeded twice and its counts add up.
    ///
    /// # Errors
    ///
    /// When no table exists, on store failure, or when flight codes run out.
    pub fn populate<R, F>(
        &self,
        requested: &[String],
        count: usize,
        reset: bool,
        rng: &mut R,
        mut on_seeded: F,
    ) -> Result<PopulateReport, SeedError>
    where
        R: Rng + ?Sized,
        F: FnMut(&str, usize),
    {
        let mut report = PopulateReport::default();

        for table in self.resolve_tables(requested)? {
            let inserted = self.seed_table(&table, count, reset, rng)?;
            on_seeded(&table, inserted);
            *report.inserted.entry(table).or_default() += inserted;
        }

        Ok(report)
    }

    /// Optionally empties `table` (committed on its own), then inserts
    /// `count` fresh flights in one transaction.
    ///
    /// # Errors
    ///
    /// On store failure or when flight codes run out.
    pub fn seed_table<R: Rng + ?Sized>(
        &self,
        table: &str,
        count: usize,
        reset: bool,
        rng: &mut R,
    ) -> Result<usize, SeedError> {
        if reset {
            let deleted = self.store.delete_all(table)?;
            info!("Reset {table}: removed {deleted} flights");
        }

        let existing = self.store.existing_flight_codes(table)?;
        let mut codes = FlightCodeGenerator::new(
            existing,
            &self.config.code_prefix,
            self.config.max_code_attempts,
        );
        let generator = FlightGenerator::new(self.config, self.now);

        let flights = (0..count)
            .map(|_| generator.generate(&mut codes, rng))
            .collect::<Result<Vec<_>, _>>()?;

        let inserted = self
            .store
            .transaction(|store| store.insert_flights(table, &flights))?;
        info!("Inserted {inserted} flights into {table}");

        Ok(inserted)
    }
}
