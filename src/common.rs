use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database does not exist: {}", .0.display())]
    DatabaseNotFound(PathBuf),
    #[error(
        "No flights table found. Tried: {}\nCheck the table name or pass --tables <table_name>.",
        .tried.join(", ")
    )]
    NoFlightTables { tried: Vec<String> },
    #[error("Could not find an unused flight code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
    #[error("Invalid seed configuration: {0}")]
    InvalidConfig(String),
    #[error("Store error: {0}")]
    Store(#[from] sqlite::Error),
    #[error("Cannot parse seed configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Quotes a table name so it can be spliced into SQL text.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Removes every file in the working directory matching `pattern`.
pub fn delete_all_files_by_glob(pattern: &str) {
    let Ok(paths) = glob::glob(pattern) else {
        return;
    };

    for path in paths.flatten() {
        if let Err(err) = std::fs::remove_file(&path) {
            log::warn!("Failed removing {}: {}", path.display(), err);
        }
    }
}
