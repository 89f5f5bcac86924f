//! Storage-report chart pipeline.
//!
//! Turns an [`AnalysisResult`](crate::report::AnalysisResult) into bounded,
//! deterministic chart datasets: ordered category segments, top-N lists
//! with an "Others" remainder, stable colors and tooltip text. A
//! [`ChartRegistry`] owns the widgets built from those datasets.

mod category;
mod colors;
mod dataset;
mod lifecycle;
mod report;
mod tooltip;
mod top_n;

pub use colors::SliceColor;
pub use dataset::{ChartDataset, SliceMeta};
pub use lifecycle::{ChartRegistry, ChartSurface, EmptyRing, Slot, SlotContent, SlotState};
pub use report::{build_report, ReportDatasets};
pub use tooltip::{tooltip, Tooltip};

#[cfg(test)]
pub use colors::PALETTE;
#[cfg(test)]
pub use dataset::DatasetFlavor;

use thiserror::Error;

/// An aggregation invariant the payload broke.
///
/// These never abort a render: the offending value is clamped and the fault
/// is reported next to the chart.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataIntegrityFault {
    /// Ranked entries add up to more than the drive's used space
    #[error(
        "ranked entries total {ranked_total} bytes but only {used_total} bytes are used; \
         Others clamped to 0"
    )]
    OthersOverflow {
        /// Used bytes reported by the analysis
        used_total: u64,
        /// Sum of the ranked entry sizes
        ranked_total: u64,
    },
}
