use std::{fs::File, path::Path};

use serde::Deserialize;

use crate::common::SeedError;

pub const DEFAULT_DB_PATH: &str = "db.sqlite3";
pub const DEFAULT_FLIGHTS_PER_TABLE: usize = 25;
pub const DEFAULT_CODE_PREFIX: &str = "AP";
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 1000;

pub const DEFAULT_TABLE_CANDIDATES: [&str; 2] =
    ["airpeek_api_flights", "airpeekbackendapp_flights"];

const DEFAULT_AIRPORTS: [&str; 30] = [
    "MAD", "BCN", "SVQ", "VLC", "BIO", "AGP", "PMI", "LPA", "LIS", "OPO", "CDG", "ORY", "LHR",
    "LGW", "AMS", "FRA", "MUC", "ZRH", "MXP", "FCO", "VIE", "PRG", "WAW", "CPH", "ARN", "OSL",
    "DUB", "BRU", "ATH", "IST",
];

const DEFAULT_BUY_URLS: [&str; 3] = [
    "https://example.com/buy",
    "https://example.com/checkout",
    "https://example.com/tickets",
];

/// Data the generators draw from. Every field is optional in the JSON form,
/// missing ones fall back to the built-in lists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub airports: Vec<String>,
    pub buy_urls: Vec<String>,
    pub table_candidates: Vec<String>,
    pub code_prefix: String,
    pub max_code_attempts: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            airports: DEFAULT_AIRPORTS.iter().map(ToString::to_string).collect(),
            buy_urls: DEFAULT_BUY_URLS.iter().map(ToString::to_string).collect(),
            table_candidates: DEFAULT_TABLE_CANDIDATES
                .iter()
                .map(ToString::to_string)
                .collect(),
            code_prefix: DEFAULT_CODE_PREFIX.into(),
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }
}

impl SeedConfig {
    /// # Errors
    ///
    /// On file operations, malformed JSON or a configuration failing [`SeedConfig::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self, SeedError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// When the lists cannot produce a valid flight.
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut distinct_airports = self.airports.clone();
        distinct_airports.sort();
        distinct_airports.dedup();

        if distinct_airports.len() < 2 {
            return Err(SeedError::InvalidConfig(
                "at least two distinct airports are needed".into(),
            ));
        }
        if self.buy_urls.is_empty() {
            return Err(SeedError::InvalidConfig(
                "at least one purchase URL is needed".into(),
            ));
        }
        if self.table_candidates.is_empty() {
            return Err(SeedError::InvalidConfig(
                "at least one candidate table is needed".into(),
            ));
        }
        if self.max_code_attempts == 0 {
            return Err(SeedError::InvalidConfig(
                "max_code_attempts must be positive".into(),
            ));
        }

        Ok(())
    }
}
