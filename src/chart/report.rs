//! One render pass: an analysis in, the three chart datasets out.

use std::fmt;

use chrono::TimeZone;

use super::category::aggregate_categories;
use super::colors::ColorCycler;
use super::dataset::{category_dataset, directory_dataset, file_dataset, ChartDataset};
use super::lifecycle::Slot;
use super::top_n::aggregate_top;
use super::DataIntegrityFault;
use crate::format::summary_line;
use crate::report::AnalysisResult;

/// Everything a surface needs to draw one drive's report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDatasets {
    pub total: u64,
    pub used: u64,
    pub summary: String,
    pub storage_bar: ChartDataset,
    pub directories: ChartDataset,
    pub files: ChartDataset,
    /// Integrity faults, tagged with the slot they were found in.
    pub integrity: Vec<(Slot, DataIntegrityFault)>,
}

impl ReportDatasets {
    /// Per-segment storage-bar widths in percent of the drive total.
    pub fn storage_bar_percentages(&self) -> Vec<f64> {
        self.storage_bar.segment_percentages(self.total)
    }
}

/// Build the datasets for all three slots.
///
/// Each visual gets its own freshly reset cycler, so a slot's colors depend
/// only on its own input order.
pub fn build_report<Tz>(analysis: &AnalysisResult, tz: &Tz) -> ReportDatasets
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut integrity = Vec::new();

    let storage_bar = category_dataset(
        &aggregate_categories(&analysis.categories),
        &mut ColorCycler::new(),
    );

    let dirs = aggregate_top(&analysis.largest_directories, analysis.used);
    if let Some(fault) = dirs.integrity {
        integrity.push((Slot::Directories, fault));
    }
    let directories = directory_dataset(&dirs.slices, &mut ColorCycler::new());

    let files = aggregate_top(&analysis.largest_files, analysis.used);
    if let Some(fault) = files.integrity {
        integrity.push((Slot::Files, fault));
    }
    let files = file_dataset(&files.slices, &mut ColorCycler::new(), tz);

    ReportDatasets {
        total: analysis.total,
        used: analysis.used,
        summary: summary_line(analysis.used, analysis.total),
        storage_bar,
        directories,
        files,
        integrity,
    }
}
