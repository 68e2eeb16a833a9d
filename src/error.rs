use thiserror::Error;

/// Why a single row was dropped from a batch. Per-row failures never abort
/// the batch; they are collected alongside the row's position instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("unparseable date `{0}`")]
    BadDate(String),
    #[error("unparseable week number `{0}`")]
    BadWeek(String),
    #[error("time range `{0}` has no `-` separator")]
    MissingTimeSeparator(String),
    #[error("unparseable timestamp `{0}`")]
    BadTimestamp(String),
}
