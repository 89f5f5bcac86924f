//! Tooltip text for a slice, as a pure function of `(dataset, index)`.

use super::dataset::{ChartDataset, DatasetFlavor, SliceMeta};
use crate::format::format_bytes;

/// Placeholder for fields the "Others" slice does not have.
const MISSING: &str = "-";

/// Tooltip content: an (always empty) title, a label line and a footer that
/// may span several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub title: String,
    pub label: String,
    pub footer: String,
}

/// Compose the tooltip for slice `index`, or `None` past the end.
pub fn tooltip(dataset: &ChartDataset, index: usize) -> Option<Tooltip> {
    let label = dataset.labels().get(index)?;
    let size = format_bytes(*dataset.values().get(index)?);
    let meta = dataset.metadata().get(index)?;

    let (label, footer) = match dataset.flavor {
        DatasetFlavor::Categories => (format!("{} {}", label, size), String::new()),
        DatasetFlavor::Directories => (
            format!("{}: {}", label, size),
            meta.path().unwrap_or(MISSING).to_string(),
        ),
        DatasetFlavor::Files => {
            let (created, modified, path) = match meta {
                SliceMeta::File {
                    path,
                    created,
                    modified,
                    ..
                } => (created.as_str(), modified.as_str(), path.as_str()),
                _ => (MISSING, MISSING, MISSING),
            };
            (
                label.clone(),
                format!(
                    "Size: {}\nCreated: {}\nModified: {}\nPath: {}",
                    size, created, modified, path
                ),
            )
        }
    };

    Some(Tooltip {
        title: String::new(),
        label,
        footer,
    })
}
