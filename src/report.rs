use std::fmt;

use crate::record::TeamRatio;

/// The full result collection, rendered as one list: `[("A", 0.75), ("B", 0.5)]`.
pub struct Report<'a>(pub &'a [TeamRatio]);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, pair) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", pair)?;
        }
        f.write_str("]")
    }
}
