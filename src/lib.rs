pub mod config;
pub mod error;
pub mod loader;
pub mod record;
pub mod report;

pub use config::SourceConfig;
pub use error::RatioError;
pub use loader::{RecordLoader, Records, load_ratios};
pub use record::{Identifier, Number, Record, TeamRatio};
pub use report::Report;
