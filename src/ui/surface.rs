//! Terminal chart surface.
//!
//! A terminal has no retained drawing objects, so a widget here is the
//! retained state the frame is drawn from each tick: the slot content plus
//! the slice the user has selected in it.

use tracing::debug;

use crate::chart::{tooltip, ChartDataset, ChartSurface, SliceMeta, Slot, SlotContent, Tooltip};

/// One live chart widget.
#[derive(Debug)]
pub struct TerminalChart {
    content: SlotContent,
    /// Creation counter, unique per surface
    generation: u64,
    selected: Option<usize>,
}

impl TerminalChart {
    pub fn content(&self) -> &SlotContent {
        &self.content
    }

    pub fn dataset(&self) -> Option<&ChartDataset> {
        self.content.dataset()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn slice_count(&self) -> usize {
        self.dataset().map_or(0, ChartDataset::len)
    }

    /// Select the next slice, wrapping. Starts at the first slice.
    pub fn select_next(&mut self) {
        let count = self.slice_count();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => (index + 1) % count,
            None => 0,
        });
    }

    /// Select the previous slice, wrapping. Starts at the last slice.
    pub fn select_prev(&mut self) {
        let count = self.slice_count();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => (index + count - 1) % count,
            None => count - 1,
        });
    }

    /// Select slice `index`; out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.slice_count() {
            self.selected = Some(index);
        }
    }

    pub fn selected_meta(&self) -> Option<&SliceMeta> {
        self.dataset()?.metadata().get(self.selected?)
    }

    pub fn selected_tooltip(&self) -> Option<Tooltip> {
        tooltip(self.dataset()?, self.selected?)
    }
}

/// Builds [`TerminalChart`]s and keeps count of the live ones.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    created: u64,
    live: usize,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of widgets created and not yet disposed.
    pub fn live(&self) -> usize {
        self.live
    }
}

impl ChartSurface for TerminalSurface {
    type Widget = TerminalChart;

    fn create(&mut self, _slot: Slot, content: SlotContent) -> TerminalChart {
        self.created += 1;
        self.live += 1;
        TerminalChart {
            content,
            generation: self.created,
            selected: None,
        }
    }

    fn dispose(&mut self, slot: Slot, widget: TerminalChart) {
        self.live = self.live.saturating_sub(1);
        debug!(?slot, generation = widget.generation, "released terminal chart");
    }
}
