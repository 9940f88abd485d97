use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Errors raised by the dashboard's own rules (as opposed to I/O failures,
/// which travel as `anyhow::Error`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The selector produced a value outside the catalog and the sentinel.
    #[error("'{0}' is not a known language selection")]
    InvalidLanguageSelection(String),

    #[error("invalid year range: {min} is after {max}")]
    InvalidYearRange { min: i32, max: i32 },

    #[error("year range {min}–{max} spans more than {limit} years")]
    YearRangeTooWide { min: i32, max: i32, limit: u32 },
}
