//! Error taxonomy for the flight network. Absent vertices surface as
//! explicit errors rather than silently fabricated defaults; malformed
//! dataset rows are fatal to network construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A lookup referenced an airport code which is not in the vertex table
    #[error("airport {0} is not present in the network")]
    VertexNotFound(i64),

    /// A dataset row could not be interpreted
    #[error("invalid dataset row: {0}")]
    InvalidDataset(String),

    /// The dataset reader itself failed
    #[error("could not read dataset: {0}")]
    Dataset(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
