//! Errors raised while assigning cities and generating rules.
//!
//! Every error here comes from malformed reference data, so none of them is retried. They
//! abort the whole run and no partial output should be used.

/// A reference in the input data that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// A machine was assigned a city that has no record in the latency table.
    #[error("could not find city {0} in the latency table")]
    City(String),
    /// The latency record of `origin` has no delay towards `destination`.
    #[error("latency record for {origin} has no delay towards {destination}")]
    MissingDelay {
        /// City whose record was found.
        origin: String,
        /// City missing from that record.
        destination: String,
    },
    /// A host identity that is not part of the machine roster.
    #[error("could not find machine with hostname {0} in the machine list")]
    Machine(String),
    /// A machine reached rule generation without an assigned city.
    #[error("machine {0} has not been assigned a city")]
    Unassigned(String),
}

/// Failure of city assignment or rule generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Configuration error: cities cannot be assigned from an empty latency table.
    #[error("latency table is empty, no city can be assigned")]
    EmptyLatencyTable,
    /// A reference in the input data could not be resolved.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

pub type Result<T> = std::result::Result<T, Error>;
