use rusqlite::{Connection, OpenFlags, Rows, Statement};
use std::iter::FusedIterator;
use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::error::{RatioError, Result};
use crate::record::{MIN_COLUMNS, Record, TeamRatio};

/// Owns the read-only connection for one scan of the records table.
///
/// The connection is closed by [`RecordLoader::close`] on success and by
/// `Drop` on every other path.
pub struct RecordLoader {
    config: SourceConfig,
    conn: Connection,
}

impl RecordLoader {
    pub fn open(config: SourceConfig) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let connection_error = |source: rusqlite::Error| RatioError::Connection {
            path: config.db_path.clone(),
            source,
        };

        let conn = Connection::open_with_flags(&config.db_path, flags).map_err(connection_error)?;
        // sqlite opens lazily; touch the header so unreadable or non-database
        // files fail here rather than at query time.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(connection_error)?;

        info!("Opened {:?} read-only", config.db_path);
        Ok(Self { config, conn })
    }

    pub fn from_connection(conn: Connection, table: impl Into<String>) -> Self {
        let config = SourceConfig {
            db_path: conn.path().unwrap_or_default().into(),
            table: table.into(),
        };
        Self { config, conn }
    }

    /// Prepares the full-table select and checks the result has enough columns.
    pub fn prepare(&self) -> Result<Statement<'_>> {
        let sql = self.config.select_all();
        let stmt = self.conn.prepare(&sql).map_err(|source| RatioError::Query {
            table: self.config.table.clone(),
            source,
        })?;

        let found = stmt.column_count();
        if found < MIN_COLUMNS {
            return Err(RatioError::TooFewColumns {
                table: self.config.table.clone(),
                found,
            });
        }
        debug!("Prepared `{}` ({} columns)", sql, found);
        Ok(stmt)
    }

    /// Scans the table and derives one ratio per row, in scan order.
    ///
    /// Stops at the first failing row; nothing partial is returned.
    pub fn load(&self) -> Result<Vec<TeamRatio>> {
        let mut stmt = self.prepare()?;
        let ratios = Records::new(&mut stmt, &self.config.table)?
            .map(|record| record.and_then(Record::into_team_ratio))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Loaded {} record(s) from {}",
            ratios.len(),
            self.config.table
        );
        Ok(ratios)
    }

    pub fn close(self) {
        if let Err((_conn, e)) = self.conn.close() {
            warn!("Failed to close {:?} cleanly: {}", self.config.db_path, e);
        }
    }
}

/// Lazy row sequence over a prepared select. Yields each row once and ends
/// when the cursor is exhausted or after the first error.
pub struct Records<'stmt> {
    rows: Rows<'stmt>,
    table: String,
    position: usize,
    finished: bool,
}

impl<'stmt> Records<'stmt> {
    pub fn new(stmt: &'stmt mut Statement<'_>, table: &str) -> Result<Self> {
        let rows = stmt.query([]).map_err(|source| RatioError::Query {
            table: table.to_string(),
            source,
        })?;
        Ok(Self {
            rows,
            table: table.to_string(),
            position: 0,
            finished: false,
        })
    }
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.rows.next() {
            Ok(Some(row)) => {
                self.position += 1;
                let record = Record::from_row(row, self.position, &self.table);
                if record.is_err() {
                    self.finished = true;
                }
                Some(record)
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(source) => {
                self.finished = true;
                Some(Err(RatioError::Query {
                    table: self.table.clone(),
                    source,
                }))
            }
        }
    }
}

impl FusedIterator for Records<'_> {}

/// Open, scan, close.
pub fn load_ratios(config: SourceConfig) -> Result<Vec<TeamRatio>> {
    let loader = RecordLoader::open(config)?;
    let ratios = loader.load()?;
    loader.close();
    Ok(ratios)
}
