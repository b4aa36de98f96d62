use rusqlite::Row;
use rusqlite::types::ValueRef;
use std::fmt;

use crate::error::{RatioError, Result};

/// Column positions. Rows are bound by position, never by column name.
pub const IDENTIFIER_COLUMN: usize = 0;
pub const WINS_COLUMN: usize = 1;
pub const LOSSES_COLUMN: usize = 2;
pub const MIN_COLUMNS: usize = 3;

/// First column of a row, keeping whatever storage class SQLite returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Identifier {
    /// Copies column 0. Text that is not valid UTF-8 is rejected, not repaired.
    pub fn from_value(value: ValueRef<'_>, row: usize) -> Result<Self> {
        Ok(match value {
            ValueRef::Null => Identifier::Null,
            ValueRef::Integer(i) => Identifier::Integer(i),
            ValueRef::Real(f) => Identifier::Real(f),
            ValueRef::Text(t) => match std::str::from_utf8(t) {
                Ok(text) => Identifier::Text(text.to_string()),
                Err(source) => {
                    return Err(RatioError::InvalidText {
                        row,
                        column: IDENTIFIER_COLUMN,
                        source,
                    });
                }
            },
            ValueRef::Blob(b) => Identifier::Blob(b.to_vec()),
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Null => f.write_str("None"),
            Identifier::Integer(i) => write!(f, "{}", i),
            Identifier::Real(r) => write!(f, "{:?}", r),
            Identifier::Text(s) => write!(f, "{:?}", s),
            Identifier::Blob(b) => write!(f, "{:?}", b),
        }
    }
}

/// A `wins` or `losses` value as stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Real(f) => f,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Real(value)
    }
}

/// One source row: identifier plus the two numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based position in the scan.
    pub row: usize,
    pub identifier: Identifier,
    pub wins: Number,
    pub losses: Number,
}

impl Record {
    pub fn new(
        row: usize,
        identifier: Identifier,
        wins: impl Into<Number>,
        losses: impl Into<Number>,
    ) -> Self {
        Self {
            row,
            identifier,
            wins: wins.into(),
            losses: losses.into(),
        }
    }

    pub fn from_row(row: &Row<'_>, position: usize, table: &str) -> Result<Self> {
        let value = |column: usize| {
            row.get_ref(column).map_err(|source| RatioError::Query {
                table: table.to_string(),
                source,
            })
        };

        let identifier = Identifier::from_value(value(IDENTIFIER_COLUMN)?, position)?;
        let wins = numeric(value(WINS_COLUMN)?, position, WINS_COLUMN)?;
        let losses = numeric(value(LOSSES_COLUMN)?, position, LOSSES_COLUMN)?;

        Ok(Record::new(position, identifier, wins, losses))
    }

    /// `wins / (wins + losses)`. A zero denominator is an error, never `NaN` or `0`.
    ///
    /// Two integers are summed exactly before converting to `f64`.
    pub fn ratio(&self) -> Result<f64> {
        let (wins, games) = match (self.wins, self.losses) {
            (Number::Integer(w), Number::Integer(l)) => {
                let games = w as i128 + l as i128;
                (w as f64, (games != 0).then_some(games as f64))
            }
            (w, l) => {
                let games = w.as_f64() + l.as_f64();
                (w.as_f64(), (games != 0.0).then_some(games))
            }
        };

        match games {
            Some(games) => Ok(wins / games),
            None => Err(RatioError::DivisionByZero {
                row: self.row,
                identifier: self.identifier.clone(),
            }),
        }
    }

    pub fn into_team_ratio(self) -> Result<TeamRatio> {
        let ratio = self.ratio()?;
        Ok(TeamRatio {
            identifier: self.identifier,
            ratio,
        })
    }
}

fn numeric(value: ValueRef<'_>, row: usize, column: usize) -> Result<Number> {
    match value {
        ValueRef::Integer(i) => Ok(Number::Integer(i)),
        ValueRef::Real(f) => Ok(Number::Real(f)),
        other => Err(RatioError::NonNumeric {
            row,
            column,
            found: other.data_type(),
        }),
    }
}

/// Derived record: identifier and its win ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRatio {
    pub identifier: Identifier,
    pub ratio: f64,
}

impl fmt::Display for TeamRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.identifier, self.ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_wins_over_games() {
        let record = Record::new(1, Identifier::Text("A".into()), 3i64, 1i64);
        assert_eq!(record.ratio().unwrap(), 0.75);

        let record = Record::new(2, Identifier::Integer(9), 1.0, 2.0);
        assert_eq!(record.ratio().unwrap(), 1.0 / 3.0);

        let record = Record::new(3, Identifier::Integer(9), 1i64, 0.5);
        assert_eq!(record.ratio().unwrap(), 1.0 / 1.5);
    }

    #[test]
    fn zero_games_is_an_arithmetic_error() {
        let record = Record::new(4, Identifier::Text("C".into()), 0i64, 0i64);
        let err = record.ratio().unwrap_err();
        assert_eq!(err.kind(), "ArithmeticError");
        assert!(matches!(err, RatioError::DivisionByZero { row: 4, .. }));
    }

    #[test]
    fn negative_losses_cancelling_wins_is_still_zero_games() {
        let record = Record::new(1, Identifier::Null, 2.0, -2.0);
        assert!(record.ratio().is_err());

        let record = Record::new(1, Identifier::Null, 2i64, -2i64);
        assert!(record.ratio().is_err());
    }

    #[test]
    fn large_integers_are_summed_exactly() {
        let wins = 1i64 << 60;
        let losses = -((1i64 << 60) - 1);
        let record = Record::new(1, Identifier::Text("X".into()), wins, losses);
        assert_eq!(record.ratio().unwrap(), wins as f64);

        let record = Record::new(2, Identifier::Text("Y".into()), i64::MAX, i64::MAX);
        assert_eq!(record.ratio().unwrap(), 0.5);
    }

    #[test]
    fn invalid_utf8_identifier_is_a_type_error() {
        let err = Identifier::from_value(ValueRef::Text(&[0xff, b'A']), 3).unwrap_err();
        assert_eq!(err.kind(), "TypeError");
        assert!(matches!(
            err,
            RatioError::InvalidText {
                row: 3,
                column: 0,
                ..
            }
        ));
    }

    #[test]
    fn identifiers_render_like_their_rust_values() {
        assert_eq!(Identifier::Text("A".into()).to_string(), "\"A\"");
        assert_eq!(Identifier::Text("it's \"x\"".into()).to_string(), "\"it's \\\"x\\\"\"");
        assert_eq!(Identifier::Integer(7).to_string(), "7");
        assert_eq!(Identifier::Real(2.0).to_string(), "2.0");
        assert_eq!(Identifier::Null.to_string(), "None");
        assert_eq!(Identifier::Blob(vec![1, 2]).to_string(), "[1, 2]");
    }

    #[test]
    fn team_ratio_renders_as_pair() {
        let pair = TeamRatio {
            identifier: Identifier::Text("B".into()),
            ratio: 1.0,
        };
        assert_eq!(pair.to_string(), "(\"B\", 1.0)");
    }
}
