use std::path::PathBuf;

use thiserror::Error;

use crate::network::LocationId;

/// Convenient result alias for the route planner library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default data directory")]
    ProjectDirsUnavailable,

    /// Raised when a dataset file could not be found.
    #[error("dataset file not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when a dataset row cannot be interpreted.
    #[error("invalid dataset row {row}: {message}")]
    InvalidDataset { row: usize, message: String },

    /// Raised when two locations share a code or an id.
    #[error("duplicate location {code} (id {id})")]
    DuplicateLocation { code: String, id: LocationId },

    /// Raised when a route row references a location code that was never loaded.
    #[error("route on row {row} references unknown location code {code}")]
    UnknownRouteEndpoint { row: usize, code: String },

    /// Raised when a location code or name could not be found in the network.
    #[error("unknown location: {query}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        query: String,
        suggestions: Vec<String>,
    },

    /// Raised when a numeric location id could not be found in the network.
    #[error("unknown location id: {id}")]
    UnknownLocationId { id: LocationId },

    /// Raised when an avoided segment does not correspond to an existing route.
    #[error("no route segment from {from} to {to}")]
    UnknownSegment { from: LocationId, to: LocationId },

    /// Raised when a route request is malformed or inconsistent.
    #[error("invalid route request: {message}")]
    InvalidRequest { message: String },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: message.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
