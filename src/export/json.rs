use serde::Serialize;
use std::io::Write;

use crate::chart::{ChartDataset, ReportDatasets};

/// A dataset as exported, with optional per-slice percentages.
#[derive(Serialize)]
pub struct ExportDataset<'a> {
    #[serde(flatten)]
    pub dataset: &'a ChartDataset,
    /// Segment widths in percent of the drive total (storage bar only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentages: Option<Vec<f64>>,
}

/// The exported report for one drive
#[derive(Serialize)]
pub struct ExportReport<'a> {
    pub drive: &'a str,
    pub summary: &'a str,
    pub total: u64,
    pub used: u64,
    pub integrity_warnings: Vec<String>,
    pub storage_bar: ExportDataset<'a>,
    pub directories: ExportDataset<'a>,
    pub files: ExportDataset<'a>,
}

impl<'a> ExportReport<'a> {
    pub fn new(drive: &'a str, report: &'a ReportDatasets) -> Self {
        Self {
            drive,
            summary: &report.summary,
            total: report.total,
            used: report.used,
            integrity_warnings: report
                .integrity
                .iter()
                .map(|(slot, fault)| format!("{}: {}", slot.title(), fault))
                .collect(),
            storage_bar: ExportDataset {
                dataset: &report.storage_bar,
                percentages: Some(report.storage_bar_percentages()),
            },
            directories: ExportDataset {
                dataset: &report.directories,
                percentages: None,
            },
            files: ExportDataset {
                dataset: &report.files,
                percentages: None,
            },
        }
    }
}

/// Export one drive's report datasets as pretty JSON
///
/// # Returns
/// * `Ok(())` on success
/// * `Err(std::io::Error)` on write failure
pub fn export_json(
    drive: &str,
    report: &ReportDatasets,
    writer: &mut impl Write,
) -> Result<(), std::io::Error> {
    serde_json::to_writer_pretty(writer, &ExportReport::new(drive, report))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}
