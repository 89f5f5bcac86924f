//! Analysis payloads and the upstream source that produces them.
//!
//! Scanning and size computation happen in the drive-analysis backend; this
//! module only models its output and reads it back.

mod model;
mod source;

pub use model::{AnalysisResult, Categories, DirEntry, FileEntry, Timestamp, FREE_CATEGORY};
pub use source::{DriveSource, PayloadSource};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`DriveSource`].
///
/// These are upstream faults: the UI shows their text verbatim in the
/// summary line and does not retry.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The payload could not be read
    #[error("cannot read payload {path}: {source}")]
    Io {
        /// The payload path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The payload is not a valid analysis or drive bundle
    #[error("invalid payload {path}: {source}")]
    Parse {
        /// The payload path
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The requested drive is not in the payload
    #[error("unknown drive: {0}")]
    UnknownDrive(String),

    /// The payload is a bundle without any drive
    #[error("no drives in payload {path}")]
    NoDrives {
        /// The payload path
        path: PathBuf,
    },
}
