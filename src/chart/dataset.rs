//! Chart datasets: labels, values, colors and per-slice metadata, aligned by
//! position.

use std::fmt;

use chrono::TimeZone;
use serde::Serialize;

use super::category::CategorySlice;
use super::colors::{ColorCycler, SliceColor};
use super::top_n::RankedSlice;
use crate::format::format_timestamp_in;
use crate::report::{DirEntry, FileEntry};

/// Which widget a dataset feeds, and so how its tooltips read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetFlavor {
    Categories,
    Directories,
    Files,
}

/// Per-slice metadata consumed by tooltips and actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SliceMeta {
    Category {
        size: u64,
    },
    Directory {
        path: String,
    },
    File {
        path: String,
        created: String,
        modified: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        file_type: Option<String>,
    },
    /// The synthetic remainder slice: no path, no timestamps.
    Others,
}

impl SliceMeta {
    /// Filesystem path behind the slice, if it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            SliceMeta::Directory { path } | SliceMeta::File { path, .. } => Some(path.as_str()),
            SliceMeta::Category { .. } | SliceMeta::Others => None,
        }
    }
}

/// A dataset ready for a rendering surface.
///
/// `labels`, `values`, `colors` and `metadata` always have the same length;
/// the only way to add a slice is [`ChartDataset::push`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDataset {
    pub flavor: DatasetFlavor,
    labels: Vec<String>,
    values: Vec<u64>,
    colors: Vec<SliceColor>,
    metadata: Vec<SliceMeta>,
}

impl ChartDataset {
    /// A zero-slice dataset.
    pub fn empty(flavor: DatasetFlavor) -> Self {
        Self {
            flavor,
            labels: Vec::new(),
            values: Vec::new(),
            colors: Vec::new(),
            metadata: Vec::new(),
        }
    }

    pub fn push(&mut self, label: String, value: u64, color: SliceColor, meta: SliceMeta) {
        self.labels.push(label);
        self.values.push(value);
        self.colors.push(color);
        self.metadata.push(meta);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn colors(&self) -> &[SliceColor] {
        &self.colors
    }

    pub fn metadata(&self) -> &[SliceMeta] {
        &self.metadata
    }

    /// Segment widths in percent of `total`: `size / total * 100`.
    pub fn segment_percentages(&self, total: u64) -> Vec<f64> {
        self.values
            .iter()
            .map(|&v| {
                if total == 0 {
                    0.0
                } else {
                    v as f64 / total as f64 * 100.0
                }
            })
            .collect()
    }
}

/// Dataset for the storage bar and its legend.
pub fn category_dataset(slices: &[CategorySlice], cycler: &mut ColorCycler) -> ChartDataset {
    cycler.reset();
    let mut dataset = ChartDataset::empty(DatasetFlavor::Categories);
    for slice in slices {
        dataset.push(
            slice.name.clone(),
            slice.size,
            cycler.next_color(),
            SliceMeta::Category { size: slice.size },
        );
    }
    dataset
}

/// Dataset for the largest-directories pie.
pub fn directory_dataset(
    slices: &[RankedSlice<'_, DirEntry>],
    cycler: &mut ColorCycler,
) -> ChartDataset {
    cycler.reset();
    let mut dataset = ChartDataset::empty(DatasetFlavor::Directories);
    for slice in slices {
        let meta = match slice {
            RankedSlice::Entry(dir) => SliceMeta::Directory {
                path: dir.path.clone(),
            },
            RankedSlice::Others { .. } => SliceMeta::Others,
        };
        dataset.push(slice.label(), slice.size(), cycler.next_color(), meta);
    }
    dataset
}

/// Dataset for the largest-files pie. Timestamps are formatted in `tz`.
pub fn file_dataset<Tz>(
    slices: &[RankedSlice<'_, FileEntry>],
    cycler: &mut ColorCycler,
    tz: &Tz,
) -> ChartDataset
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    cycler.reset();
    let mut dataset = ChartDataset::empty(DatasetFlavor::Files);
    for slice in slices {
        let meta = match slice {
            RankedSlice::Entry(file) => SliceMeta::File {
                path: file.path.clone(),
                created: format_timestamp_in(file.created, tz),
                modified: format_timestamp_in(file.modified, tz),
                file_type: file.file_type.clone(),
            },
            RankedSlice::Others { .. } => SliceMeta::Others,
        };
        dataset.push(slice.label(), slice.size(), cycler.next_color(), meta);
    }
    dataset
}
