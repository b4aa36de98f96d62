use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "default.db";
pub const DEFAULT_TABLE: &str = "teams_records";

/// Where the team records are read from.
///
/// The binary always runs with [`SourceConfig::default`]; other values exist
/// so tests can point the loader at scratch databases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub db_path: PathBuf,
    pub table: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl SourceConfig {
    pub fn new(db_path: impl Into<PathBuf>, table: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            table: table.into(),
        }
    }

    /// `SELECT *` against the table, with the name quoted as an identifier.
    pub fn select_all(&self) -> String {
        format!("SELECT * FROM \"{}\"", self.table.replace('"', "\"\""))
    }
}
