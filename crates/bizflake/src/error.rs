use jiff::Timestamp;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by identifier generation and parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid business type {value}; expected 1..={max}")]
    InvalidBusinessType { value: u8, max: u8 },
    #[error("unknown business type name: {0}")]
    UnknownBusinessType(String),
    #[error("clock is behind the epoch: epoch={epoch}, now={now}")]
    ClockBeforeEpoch { epoch: Timestamp, now: Timestamp },
    #[error("time field exhausted: {elapsed_ms} ms since epoch exceeds {max_ms} ms")]
    TimeOverflow { elapsed_ms: i64, max_ms: u64 },
    #[error("generator state lock is poisoned")]
    StatePoisoned,
    #[error("invalid id: {0}")]
    InvalidId(String),
}
