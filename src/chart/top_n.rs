//! Top-N lists with a synthetic "Others" remainder.

use tracing::warn;

use super::DataIntegrityFault;
use crate::report::{DirEntry, FileEntry};

/// Label of the synthetic remainder slice.
pub const OTHERS_LABEL: &str = "Others";

/// An entry that can appear in a ranked chart.
pub trait RankedEntry {
    /// Short name shown on the slice.
    fn display_name(&self) -> String;
    fn size(&self) -> u64;
}

impl RankedEntry for DirEntry {
    fn display_name(&self) -> String {
        last_path_segment(&self.path)
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl RankedEntry for FileEntry {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// Last non-empty segment of a Windows or Unix path.
///
/// `C:\Users\me` gives `me`, `/var/log/` gives `log`. A bare root keeps its
/// own text (`C:\` gives `C:`, `/` stays `/`).
pub fn last_path_segment(path: &str) -> String {
    let is_sep = |c: char| c == '\\' || c == '/';
    let trimmed = path.trim_end_matches(is_sep);
    if trimmed.is_empty() {
        return path.to_string();
    }
    match trimmed.rsplit(is_sep).next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => trimmed.to_string(),
    }
}

/// One slice of a ranked chart: a real entry or the remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankedSlice<'a, E> {
    Entry(&'a E),
    Others { size: u64 },
}

impl<E: RankedEntry> RankedSlice<'_, E> {
    pub fn label(&self) -> String {
        match self {
            RankedSlice::Entry(entry) => entry.display_name(),
            RankedSlice::Others { .. } => OTHERS_LABEL.to_string(),
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            RankedSlice::Entry(entry) => entry.size(),
            RankedSlice::Others { size } => *size,
        }
    }
}

/// Output of [`aggregate_top`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSlices<'a, E> {
    pub slices: Vec<RankedSlice<'a, E>>,
    /// Set when the ranked entries add up to more than the used total.
    pub integrity: Option<DataIntegrityFault>,
}

/// Append the "Others" remainder to a ranked list.
///
/// The entries are kept as given; the list length is whatever upstream sent.
/// `Others` is always present, even at size zero, so the chart sums to
/// `used_total`. When the entries already exceed `used_total` the remainder
/// is clamped to zero and the overflow reported as a [`DataIntegrityFault`].
pub fn aggregate_top<E: RankedEntry>(entries: &[E], used_total: u64) -> TopSlices<'_, E> {
    let ranked_total = entries
        .iter()
        .fold(0u64, |acc, entry| acc.saturating_add(entry.size()));

    let (others, integrity) = match used_total.checked_sub(ranked_total) {
        Some(rest) => (rest, None),
        None => {
            let fault = DataIntegrityFault::OthersOverflow {
                used_total,
                ranked_total,
            };
            warn!("{}", fault);
            (0, Some(fault))
        }
    };

    let mut slices: Vec<RankedSlice<'_, E>> = entries.iter().map(RankedSlice::Entry).collect();
    slices.push(RankedSlice::Others { size: others });

    TopSlices { slices, integrity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Timestamp;

    fn dir(path: &str, size: u64) -> DirEntry {
        DirEntry {
            path: path.to_string(),
            size,
        }
    }

    fn file(name: &str, size: u64) -> FileEntry {
        FileEntry {
            path: format!("/data/{}", name),
            name: name.to_string(),
            size,
            created: Timestamp::from_secs(1),
            modified: Timestamp::from_secs(2),
            file_type: None,
        }
    }

    #[test]
    fn test_last_path_segment() {
        assert_eq!(last_path_segment("C:\\a"), "a");
        assert_eq!(last_path_segment("C:\\Users\\me\\Videos"), "Videos");
        assert_eq!(last_path_segment("/var/log/"), "log");
        assert_eq!(last_path_segment("/home/user"), "user");
        assert_eq!(last_path_segment("C:\\"), "C:");
        assert_eq!(last_path_segment("/"), "/");
        assert_eq!(last_path_segment("plain"), "plain");
        assert_eq!(last_path_segment(""), "");
    }

    #[test]
    fn test_single_directory_scenario() {
        let dirs = vec![dir("C:\\a", 100)];
        let top = aggregate_top(&dirs, 300);

        assert!(top.integrity.is_none());
        assert_eq!(top.slices.len(), 2);
        assert_eq!(top.slices[0].label(), "a");
        assert_eq!(top.slices[0].size(), 100);
        assert_eq!(top.slices[1].label(), "Others");
        assert_eq!(top.slices[1].size(), 200);
    }

    #[test]
    fn test_sizes_sum_to_used_total() {
        let files = vec![file("a.iso", 500), file("b.mkv", 300), file("c.zip", 150)];
        let top = aggregate_top(&files, 2_000);

        assert_eq!(top.slices.len(), files.len() + 1);
        let sum: u64 = top.slices.iter().map(|s| s.size()).sum();
        assert_eq!(sum, 2_000);
        // order preserved
        let labels: Vec<String> = top.slices.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["a.iso", "b.mkv", "c.zip", "Others"]);
    }

    #[test]
    fn test_zero_others_still_emitted() {
        let dirs = vec![dir("/a", 60), dir("/b", 40)];
        let top = aggregate_top(&dirs, 100);

        assert_eq!(top.slices.last(), Some(&RankedSlice::Others { size: 0 }));
        assert!(top.integrity.is_none());
    }

    #[test]
    fn test_empty_list_is_all_others() {
        let top = aggregate_top::<DirEntry>(&[], 42);
        assert_eq!(top.slices, vec![RankedSlice::Others { size: 42 }]);
    }

    #[test]
    fn test_overflow_clamps_and_reports() {
        let dirs = vec![dir("/a", 250), dir("/b", 100)];
        let top = aggregate_top(&dirs, 300);

        assert_eq!(top.slices.last(), Some(&RankedSlice::Others { size: 0 }));
        assert_eq!(
            top.integrity,
            Some(DataIntegrityFault::OthersOverflow {
                used_total: 300,
                ranked_total: 350,
            })
        );
    }

    #[test]
    fn test_sum_saturates() {
        let dirs = vec![dir("/a", u64::MAX), dir("/b", 10)];
        let top = aggregate_top(&dirs, 5);

        assert_eq!(
            top.integrity,
            Some(DataIntegrityFault::OthersOverflow {
                used_total: 5,
                ranked_total: u64::MAX,
            })
        );
    }
}
