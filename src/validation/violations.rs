//! Step-argument violations.

use thiserror::Error;

/// Structural problems with step arguments, found before any command runs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArgumentViolation {
    #[error("'{field}' must list at least one well")]
    EmptyWells { field: &'static str },

    #[error("{sources} source wells cannot pair with {destinations} destination wells")]
    MismatchedWellCounts { sources: usize, destinations: usize },

    #[error("'{field}' must be a positive volume (got {value})")]
    NonPositiveVolume { field: &'static str, value: f64 },

    #[error("'{field}' must not be negative (got {value})")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("'{field}' must repeat at least once")]
    ZeroRepetitions { field: &'static str },

    #[error("'{field}' repeats {times} times, above the limit of {limit}")]
    TooManyRepetitions {
        field: &'static str,
        times: u32,
        limit: u32,
    },
}
