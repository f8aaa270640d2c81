use thiserror::Error;

use crate::session::SnapshotId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process {pid}: {message}")]
    ProcessOpenFailed { pid: u32, message: String },

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Memory read at address {address:#x} exceeded the capture deadline")]
    ReadTimeout { address: u64 },

    #[error("Race type code {0} is not an online race")]
    InvalidRaceType(u32),

    #[error("Race reports zero players")]
    EmptyRoster,

    #[error("Unknown map slug: {0:?}")]
    UnknownMapSlug(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Snapshot {0} is not in the session")]
    SnapshotNotFound(SnapshotId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error means the target process simply isn't running —
    /// the one condition a caller should treat as routine rather than a fault.
    pub fn is_process_missing(&self) -> bool {
        matches!(self, Error::ProcessNotFound(_))
    }
}
