//! Analysis payload types.
//!
//! These mirror what the drive-analysis backend serializes: totals, a
//! category breakdown and the two ranked top-N lists.

use indexmap::IndexMap;
use serde::Deserialize;

/// Name of the reserved category holding unused capacity.
pub const FREE_CATEGORY: &str = "free";

/// Seconds since the Unix epoch.
///
/// Accepts either a bare integer or the `{secs_since_epoch, nanos_since_epoch}`
/// object that `std::time::SystemTime` serializes to. Sub-second precision is
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(from = "RawTimestamp")]
pub struct Timestamp(u64);

impl Timestamp {
    #[cfg(test)]
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn secs(&self) -> u64 {
        self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Secs(u64),
    SystemTime {
        secs_since_epoch: u64,
        #[allow(dead_code)]
        #[serde(default)]
        nanos_since_epoch: u32,
    },
}

impl From<RawTimestamp> for Timestamp {
    fn from(raw: RawTimestamp) -> Self {
        match raw {
            RawTimestamp::Secs(secs) => Timestamp(secs),
            RawTimestamp::SystemTime {
                secs_since_epoch, ..
            } => Timestamp(secs_since_epoch),
        }
    }
}

/// Category sizes in payload order.
pub type Categories = IndexMap<String, u64>;

/// One entry of the largest-directories list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirEntry {
    pub path: String,
    pub size: u64,
}

/// One entry of the largest-files list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub created: Timestamp,
    pub modified: Timestamp,
    /// Coarse type label ("Video", "Archive", ...) when the backend provides one
    #[serde(default)]
    pub file_type: Option<String>,
}

/// A finished drive analysis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisResult {
    pub total: u64,
    pub used: u64,
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub largest_directories: Vec<DirEntry>,
    #[serde(default)]
    pub largest_files: Vec<FileEntry>,
}
