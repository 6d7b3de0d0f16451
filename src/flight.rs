use std::fmt;

use chrono::NaiveDateTime;

pub const FLIGHT_CODE_MAX_LEN: usize = 10;
pub const AIRPORT_MAX_LEN: usize = 20;

pub const DB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column names in insertion order.
pub const FLIGHT_COLUMNS: [&str; 7] = [
    "flight",
    "origin",
    "destination",
    "departure_date",
    "arrival_date",
    "price",
    "buyUrl",
];

/// Monetary amount kept in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price {
    cents: u32,
}

impl Price {
    #[must_use]
    pub const fn new(whole: u32, cents: u32) -> Self {
        Self {
            cents: whole * 100 + cents,
        }
    }

    #[must_use]
    pub const fn from_cents(cents: u32) -> Self {
        Self { cents }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRecord {
    pub flight_code: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub price: Price,
    pub purchase_url: String,
}

impl FlightRecord {
    /// Column values as stored, in [`FLIGHT_COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> [String; 7] {
        [
            truncate_chars(&self.flight_code, FLIGHT_CODE_MAX_LEN),
            truncate_chars(&self.origin, AIRPORT_MAX_LEN),
            truncate_chars(&self.destination, AIRPORT_MAX_LEN),
            format_db_datetime(&self.departure_time),
            format_db_datetime(&self.arrival_time),
            self.price.to_string(),
            self.purchase_url.clone(),
        ]
    }
}

#[must_use]
pub fn format_db_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DB_DATETIME_FORMAT).to_string()
}

#[must_use]
pub fn truncate_chars(value: &str, max_len: usize) -> String {
    value.chars().take(max_len).collect()
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use super::*;

    fn datetime(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_price_display() {
        assert_eq!("25.00", Price::new(25, 0).to_string());
        assert_eq!("450.99", Price::new(450, 99).to_string());
        assert_eq!("100.05", Price::from_cents(10_005).to_string());
    }

    #[test]
    fn test_format_db_datetime() {
        assert_eq!("2024-03-07 09:05:00", format_db_datetime(&datetime(9, 5)));
    }

    #[test]
    fn test_to_row_truncates_to_column_widths() {
        let record = FlightRecord {
            flight_code: "ABCDEFGHIJKLMN".into(),
            origin: "A".repeat(25),
            destination: "MAD".into(),
            departure_time: datetime(10, 0),
            arrival_time: datetime(12, 30),
            price: Price::new(99, 9),
            purchase_url: "https://example.com/buy?flight=ABCDEFGHIJ".into(),
        };

        let row = record.to_row();

        assert_eq!("ABCDEFGHIJ", row[0]);
        assert_eq!(20, row[1].len());
        assert_eq!("MAD", row[2]);
        assert_eq!("2024-03-07 10:00:00", row[3]);
        assert_eq!("2024-03-07 12:30:00", row[4]);
        assert_eq!("99.09", row[5]);
    }
}
