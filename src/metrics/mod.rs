pub mod counts;
pub mod outcome;
pub mod report;

pub use report::{generate_report, TeamMetrics};
