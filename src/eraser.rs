use log::info;

use crate::{common::SeedError, store::FlightStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraseReport {
    pub table: String,
    pub deleted: usize,
}

/// Empties whole tables. No filtering, every named table must exist.
pub struct TableEraser<'a> {
    store: &'a FlightStore,
}

impl<'a> TableEraser<'a> {
    #[must_use]
    pub const fn new(store: &'a FlightStore) -> Self {
        Self { store }
    }

    /// Row counts that [`TableEraser::erase`] would remove, without deleting.
    ///
    /// # Errors
    ///
    /// On store failure, including a missing table.
    pub fn dry_run(&self, tables: &[String]) -> Result<Vec<EraseReport>, SeedError> {
        tables
            .iter()
            .map(|table| {
                Ok::<_, SeedError>(EraseReport {
                    table: table.clone(),
                    deleted: self.store.count_rows(table)?,
                })
            })
            .collect()
    }

    /// Deletes all rows of every table in one transaction.
    ///
    /// # Errors
    ///
    /// On store failure, including a missing table. Nothing is deleted then.
    pub fn erase(&self, tables: &[String]) -> Result<Vec<EraseReport>, SeedError> {
        self.store.transaction(|store| {
            let mut reports = vec![];
            for table in tables {
                let deleted = store.delete_all(table)?;
                info!("Emptied {table}: {deleted} flights removed");
                reports.push(EraseReport {
                    table: table.clone(),
                    deleted,
                });
            }
            Ok(reports)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::create_flights_table_sql;

    fn memory_store(tables: &[&str]) -> FlightStore {
        let connection = sqlite::open(":memory:").unwrap();
        for table in tables {
            connection.execute(create_flights_table_sql(table)).unwrap();
        }
        FlightStore::from_connection(connection)
    }

    fn insert_raw(store: &FlightStore, table: &str, code: &str) {
        store
            .connection()
            .execute(format!(
                "INSERT INTO {table} VALUES ('{code}', 'MAD', 'BCN', '2025-01-01 10:00:00', '2025-01-01 11:00:00', '50.00', 'https://example.com/buy?flight={code}')"
            ))
            .unwrap();
    }

    #[test]
    fn test_erase_empty_table() {
        let store = memory_store(&["flights"]);

        let reports = TableEraser::new(&store)
            .erase(&["flights".into()])
            .unwrap();

        assert_eq!(
            vec![EraseReport {
                table: "flights".into(),
                deleted: 0
            }],
            reports
        );
    }

    #[test]
    fn test_erase_multiple_tables() {
        let store = memory_store(&["one", "two"]);
        insert_raw(&store, "one", "AP1");
        insert_raw(&store, "one", "AP2");
        insert_raw(&store, "two", "AP3");

        let reports = TableEraser::new(&store)
            .erase(&["one".into(), "two".into()])
            .unwrap();

        assert_eq!(2, reports[0].deleted);
        assert_eq!(1, reports[1].deleted);
        assert_eq!(0, store.count_rows("one").unwrap());
        assert_eq!(0, store.count_rows("two").unwrap());
    }

    #[test]
    fn test_missing_table_aborts_everything() {
        let store = memory_store(&["one"]);
        insert_raw(&store, "one", "AP1");

        let result = TableEraser::new(&store).erase(&["one".into(), "missing".into()]);

        assert!(matches!(result, Err(SeedError::Store(_))));
        assert_eq!(1, store.count_rows("one").unwrap());
    }

    #[test]
    fn test_dry_run_keeps_rows() {
        let store = memory_store(&["one"]);
        insert_raw(&store, "one", "AP1");

        let reports = TableEraser::new(&store).dry_run(&["one".into()]).unwrap();

        assert_eq!(1, reports[0].deleted);
        assert_eq!(1, store.count_rows("one").unwrap());
    }
}
