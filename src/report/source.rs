//! Where finished analyses come from.
//!
//! The drive-scanning backend lives elsewhere; this crate only sees its two
//! operations through [`DriveSource`]. [`PayloadSource`] serves them from a
//! JSON payload on disk.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use super::model::AnalysisResult;
use super::SourceError;

/// Upstream collaborator: drive enumeration and drive analysis.
pub trait DriveSource: Send + Sync {
    /// Drive identifiers, in the order they should be offered.
    fn list_drives(&self) -> Result<Vec<String>, SourceError>;

    /// Analyze one drive. May block; callers run this off the UI thread.
    fn analyze_drive(&self, drive: &str) -> Result<AnalysisResult, SourceError>;
}

/// Top-level shape probe: a bundle carries a `drives` map.
#[derive(Deserialize)]
struct BundleProbe {
    #[serde(default)]
    drives: Option<IndexMap<String, AnalysisResult>>,
}

enum Payload {
    Single(AnalysisResult),
    Bundle(IndexMap<String, AnalysisResult>),
}

/// Reads analyses from a JSON payload file.
///
/// The file is either one analysis (whose drive identifier is the file path
/// as given) or a bundle `{"drives": {"<id>": analysis, ...}}`. It is re-read
/// on every call so each analysis request sees a fresh payload.
#[derive(Debug, Clone)]
pub struct PayloadSource {
    path: PathBuf,
}

impl PayloadSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn single_drive_id(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Payload, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let parse_error = |source| SourceError::Parse {
            path: self.path.clone(),
            source,
        };

        let probe: BundleProbe = serde_json::from_str(&text).map_err(parse_error)?;
        match probe.drives {
            Some(drives) => Ok(Payload::Bundle(drives)),
            None => serde_json::from_str(&text)
                .map(Payload::Single)
                .map_err(parse_error),
        }
    }
}

impl DriveSource for PayloadSource {
    fn list_drives(&self) -> Result<Vec<String>, SourceError> {
        match self.load()? {
            Payload::Single(_) => Ok(vec![self.single_drive_id()]),
            Payload::Bundle(drives) if drives.is_empty() => Err(SourceError::NoDrives {
                path: self.path.clone(),
            }),
            Payload::Bundle(drives) => Ok(drives.into_keys().collect()),
        }
    }

    fn analyze_drive(&self, drive: &str) -> Result<AnalysisResult, SourceError> {
        match self.load()? {
            Payload::Single(analysis) if drive == self.single_drive_id() => Ok(analysis),
            Payload::Single(_) => Err(SourceError::UnknownDrive(drive.to_string())),
            Payload::Bundle(drives) => drives
                .get(drive)
                .cloned()
                .ok_or_else(|| SourceError::UnknownDrive(drive.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn payload_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const SINGLE: &str = r#"{
        "total": 1000, "used": 600,
        "categories": {"docs": 300, "media": 200, "free": 400},
        "largest_directories": [], "largest_files": []
    }"#;

    #[test]
    fn test_single_payload_is_one_drive() {
        let file = payload_file(SINGLE);
        let source = PayloadSource::new(file.path());

        let drives = source.list_drives().unwrap();
        assert_eq!(drives, vec![file.path().display().to_string()]);

        let analysis = source.analyze_drive(&drives[0]).unwrap();
        assert_eq!(analysis.used, 600);
    }

    #[test]
    fn test_single_payload_rejects_other_drive() {
        let file = payload_file(SINGLE);
        let source = PayloadSource::new(file.path());

        let err = source.analyze_drive("D:\\").unwrap_err();
        assert!(matches!(err, SourceError::UnknownDrive(ref d) if d == "D:\\"));
        assert_eq!(err.to_string(), "unknown drive: D:\\");
    }

    #[test]
    fn test_bundle_lists_drives_in_document_order() {
        let file = payload_file(
            r#"{"drives": {
                "Z:\\": {"total": 10, "used": 1, "categories": {"free": 9}},
                "C:\\": {"total": 20, "used": 5, "categories": {"free": 15}}
            }}"#,
        );
        let source = PayloadSource::new(file.path());

        assert_eq!(source.list_drives().unwrap(), vec!["Z:\\", "C:\\"]);
        assert_eq!(source.analyze_drive("C:\\").unwrap().total, 20);
        assert!(matches!(
            source.analyze_drive("Q:\\"),
            Err(SourceError::UnknownDrive(_))
        ));
    }

    #[test]
    fn test_empty_bundle_has_no_drives() {
        let file = payload_file(r#"{"drives": {}}"#);
        let source = PayloadSource::new(file.path());

        assert!(matches!(source.list_drives(), Err(SourceError::NoDrives { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = PayloadSource::new("/this/path/definitely/does/not/exist/payload.json");
        let err = source.list_drives().unwrap_err();

        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("payload.json"));
    }

    #[test]
    fn test_malformed_payload_is_parse_error() {
        let file = payload_file(r#"{"total": "lots"}"#);
        let source = PayloadSource::new(file.path());

        assert!(matches!(source.list_drives(), Err(SourceError::Parse { .. })));
    }
}
