use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("No scores found between {start} and {end}")]
    NoDataForPeriod { start: NaiveDate, end: NaiveDate },
}
