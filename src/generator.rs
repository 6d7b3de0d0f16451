use chrono::{NaiveDateTime, TimeDelta};
use rand::{seq::IndexedRandom, Rng};

use crate::{
    code_generator::FlightCodeGenerator,
    common::SeedError,
    config::SeedConfig,
    flight::{FlightRecord, Price},
};

const MINUTE_OFFSETS: [i64; 4] = [0, 15, 30, 45];

const MAX_DEPARTURE_DAYS: i64 = 30;
const MAX_DEPARTURE_HOURS: i64 = 23;
const MIN_FLIGHT_HOURS: i64 = 1;
const MAX_FLIGHT_HOURS: i64 = 6;

const MIN_PRICE_WHOLE: u32 = 25;
const MAX_PRICE_WHOLE: u32 = 450;

/// Builds random but well-formed flights relative to a fixed `now`.
pub struct FlightGenerator<'a> {
    config: &'a SeedConfig,
    now: NaiveDateTime,
}

impl<'a> FlightGenerator<'a> {
    #[must_use]
    pub const fn new(config: &'a SeedConfig, now: NaiveDateTime) -> Self {
        Self { config, now }
    }

    /// # Errors
    ///
    /// When no unused flight code can be found or the configured lists are empty.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        codes: &mut FlightCodeGenerator,
        rng: &mut R,
    ) -> Result<FlightRecord, SeedError> {
        let flight_code = codes.next_code(rng)?;
        let (origin, destination) = self.random_route(rng)?;
        let (departure_time, arrival_time) = self.random_schedule(rng);
        let price = random_price(rng);
        let purchase_url = self.random_purchase_url(&flight_code, rng)?;

        Ok(FlightRecord {
            flight_code,
            origin,
            destination,
            departure_time,
            arrival_time,
            price,
            purchase_url,
        })
    }

    /// # Errors
    ///
    /// When the airport list has fewer than two distinct entries.
    pub fn random_route<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(String, String), SeedError> {
        let origin = self
            .config
            .airports
            .choose(rng)
            .ok_or_else(|| SeedError::InvalidConfig("airport list is empty".into()))?;

        let destinations: Vec<&String> = self
            .config
            .airports
            .iter()
            .filter(|airport| *airport != origin)
            .collect();
        let destination = destinations.choose(rng).ok_or_else(|| {
            SeedError::InvalidConfig(format!("no destination differs from {origin}"))
        })?;

        Ok((origin.clone(), (*destination).clone()))
    }

    #[must_use]
    pub fn random_schedule<R: Rng + ?Sized>(&self, rng: &mut R) -> (NaiveDateTime, NaiveDateTime) {
        let departure = self.now
            + TimeDelta::days(rng.random_range(0..=MAX_DEPARTURE_DAYS))
            + TimeDelta::hours(rng.random_range(0..=MAX_DEPARTURE_HOURS))
            + TimeDelta::minutes(random_minute_offset(rng));

        let arrival = departure
            + TimeDelta::hours(rng.random_range(MIN_FLIGHT_HOURS..=MAX_FLIGHT_HOURS))
            + TimeDelta::minutes(random_minute_offset(rng));

        (departure, arrival)
    }

    fn random_purchase_url<R: Rng + ?Sized>(
        &self,
        flight_code: &str,
        rng: &mut R,
    ) -> Result<String, SeedError> {
        let base = self
            .config
            .buy_urls
            .choose(rng)
            .ok_or_else(|| SeedError::InvalidConfig("purchase URL list is empty".into()))?;

        Ok(format!("{base}?flight={flight_code}"))
    }
}

#[must_use]
pub fn random_price<R: Rng + ?Sized>(rng: &mut R) -> Price {
    Price::new(
        rng.random_range(MIN_PRICE_WHOLE..=MAX_PRICE_WHOLE),
        rng.random_range(0..=99),
    )
}

fn random_minute_offset<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    MINUTE_OFFSETS[rng.random_range(0..MINUTE_OFFSETS.len())]
}
