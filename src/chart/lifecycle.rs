//! Chart slots and the registry that owns their widgets.
//!
//! Each slot holds at most one live widget. Rendering into a slot disposes
//! the current widget before the surface builds the next one.

use tracing::debug;

use super::colors::SliceColor;
use super::dataset::ChartDataset;

/// The three fixed visual targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    StorageBar,
    Directories,
    Files,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::StorageBar, Slot::Directories, Slot::Files];

    pub fn title(&self) -> &'static str {
        match self {
            Slot::StorageBar => "Storage",
            Slot::Directories => "Largest Directories",
            Slot::Files => "Largest Files",
        }
    }

    fn index(self) -> usize {
        match self {
            Slot::StorageBar => 0,
            Slot::Directories => 1,
            Slot::Files => 2,
        }
    }

    /// Next slot in focus order, wrapping.
    pub fn next(self) -> Slot {
        Slot::ALL[(self.index() + 1) % Slot::ALL.len()]
    }

    /// Previous slot in focus order, wrapping.
    pub fn prev(self) -> Slot {
        Slot::ALL[(self.index() + Slot::ALL.len() - 1) % Slot::ALL.len()]
    }
}

/// Ring drawn in a chart that has no data yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmptyRing {
    pub color: SliceColor,
    /// Stroke width in dots
    pub width: u16,
    /// How far inside the chart radius the ring sits, as a fraction of it
    pub radius_decrease: f64,
}

impl Default for EmptyRing {
    fn default() -> Self {
        Self {
            color: SliceColor::rgb(255, 128, 0),
            width: 2,
            radius_decrease: 0.2,
        }
    }
}

/// What a widget is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotContent {
    /// Zero slices, decorated with an empty ring.
    Placeholder(EmptyRing),
    Dataset(ChartDataset),
}

impl SlotContent {
    pub fn placeholder() -> Self {
        SlotContent::Placeholder(EmptyRing::default())
    }

    pub fn dataset(&self) -> Option<&ChartDataset> {
        match self {
            SlotContent::Dataset(dataset) => Some(dataset),
            SlotContent::Placeholder(_) => None,
        }
    }
}

/// Lifecycle state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Uninitialized,
    Empty,
    Populated,
}

/// A rendering surface that can build and release chart widgets.
pub trait ChartSurface {
    type Widget;

    fn create(&mut self, slot: Slot, content: SlotContent) -> Self::Widget;

    /// Release a widget's resources. Called exactly once per created widget.
    fn dispose(&mut self, slot: Slot, widget: Self::Widget);
}

struct Bound<W> {
    widget: W,
    state: SlotState,
}

/// Slot to widget registry: dispose-then-replace, never two live widgets in
/// the same slot.
pub struct ChartRegistry<S: ChartSurface> {
    surface: S,
    slots: [Option<Bound<S::Widget>>; 3],
}

impl<S: ChartSurface> ChartRegistry<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            slots: [None, None, None],
        }
    }

    /// Bind a new widget built from `content` to `slot`, disposing the
    /// previous one first.
    pub fn render(&mut self, slot: Slot, content: SlotContent) -> &mut S::Widget {
        if let Some(old) = self.slots[slot.index()].take() {
            debug!(?slot, "disposing chart widget");
            self.surface.dispose(slot, old.widget);
        }

        let state = match content {
            SlotContent::Placeholder(_) => SlotState::Empty,
            SlotContent::Dataset(_) => SlotState::Populated,
        };
        debug!(?slot, ?state, "creating chart widget");
        let widget = self.surface.create(slot, content);

        &mut self.slots[slot.index()]
            .insert(Bound { widget, state })
            .widget
    }

    /// Render the empty-ring placeholder into `slot`.
    pub fn render_empty(&mut self, slot: Slot) -> &mut S::Widget {
        self.render(slot, SlotContent::placeholder())
    }

    pub fn state(&self, slot: Slot) -> SlotState {
        self.slots[slot.index()]
            .as_ref()
            .map_or(SlotState::Uninitialized, |bound| bound.state)
    }

    pub fn widget(&self, slot: Slot) -> Option<&S::Widget> {
        self.slots[slot.index()].as_ref().map(|bound| &bound.widget)
    }

    pub fn widget_mut(&mut self, slot: Slot) -> Option<&mut S::Widget> {
        self.slots[slot.index()].as_mut().map(|bound| &mut bound.widget)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Dispose every live widget; all slots return to uninitialized.
    pub fn teardown(&mut self) {
        for slot in Slot::ALL {
            if let Some(old) = self.slots[slot.index()].take() {
                self.surface.dispose(slot, old.widget);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::colors::PALETTE;
    use crate::chart::dataset::{DatasetFlavor, SliceMeta};
    use std::collections::HashSet;

    /// Surface that tracks which widget ids are alive.
    #[derive(Default)]
    struct RecordingSurface {
        next_id: u32,
        live: HashSet<u32>,
        disposed: Vec<(Slot, u32)>,
    }

    struct TestWidget {
        id: u32,
        content: SlotContent,
    }

    impl ChartSurface for RecordingSurface {
        type Widget = TestWidget;

        fn create(&mut self, _slot: Slot, content: SlotContent) -> TestWidget {
            self.next_id += 1;
            self.live.insert(self.next_id);
            TestWidget {
                id: self.next_id,
                content,
            }
        }

        fn dispose(&mut self, slot: Slot, widget: TestWidget) {
            assert!(self.live.remove(&widget.id), "widget disposed twice");
            self.disposed.push((slot, widget.id));
        }
    }

    fn dataset(label: &str, value: u64) -> ChartDataset {
        let mut ds = ChartDataset::empty(DatasetFlavor::Directories);
        ds.push(label.to_string(), value, PALETTE[0], SliceMeta::Others);
        ds
    }

    #[test]
    fn test_slot_focus_order() {
        assert_eq!(Slot::StorageBar.next(), Slot::Directories);
        assert_eq!(Slot::Files.next(), Slot::StorageBar);
        assert_eq!(Slot::StorageBar.prev(), Slot::Files);
        assert_eq!(Slot::Directories.prev(), Slot::StorageBar);
    }

    #[test]
    fn test_uninitialized_until_rendered() {
        let registry = ChartRegistry::new(RecordingSurface::default());
        for slot in Slot::ALL {
            assert_eq!(registry.state(slot), SlotState::Uninitialized);
            assert!(registry.widget(slot).is_none());
        }
    }

    #[test]
    fn test_replace_disposes_previous() {
        let mut registry = ChartRegistry::new(RecordingSurface::default());

        let first = registry
            .render(Slot::Directories, SlotContent::Dataset(dataset("d1", 1)))
            .id;
        let second = registry
            .render(Slot::Directories, SlotContent::Dataset(dataset("d2", 2)))
            .id;

        let surface = registry.surface();
        assert_eq!(surface.live.len(), 1);
        assert!(surface.live.contains(&second));
        assert_eq!(surface.disposed, vec![(Slot::Directories, first)]);

        let widget = registry.widget(Slot::Directories).unwrap();
        assert_eq!(widget.content.dataset().unwrap().labels(), &["d2"]);
    }

    #[test]
    fn test_state_machine() {
        let mut registry = ChartRegistry::new(RecordingSurface::default());

        registry.render_empty(Slot::Files);
        assert_eq!(registry.state(Slot::Files), SlotState::Empty);
        assert!(registry.widget(Slot::Files).unwrap().content.dataset().is_none());

        registry.render(Slot::Files, SlotContent::Dataset(dataset("f", 3)));
        assert_eq!(registry.state(Slot::Files), SlotState::Populated);

        registry.render(Slot::Files, SlotContent::Dataset(dataset("f2", 4)));
        assert_eq!(registry.state(Slot::Files), SlotState::Populated);
        assert_eq!(registry.surface().live.len(), 1);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut registry = ChartRegistry::new(RecordingSurface::default());

        for slot in Slot::ALL {
            registry.render_empty(slot);
        }
        registry.render(Slot::StorageBar, SlotContent::Dataset(dataset("bar", 9)));

        assert_eq!(registry.surface().live.len(), 3);
        assert_eq!(registry.surface().disposed.len(), 1);
        assert_eq!(registry.state(Slot::Directories), SlotState::Empty);
        assert_eq!(registry.state(Slot::StorageBar), SlotState::Populated);
    }

    #[test]
    fn test_many_renders_never_leak() {
        let mut registry = ChartRegistry::new(RecordingSurface::default());
        for i in 0..50 {
            registry.render(Slot::StorageBar, SlotContent::Dataset(dataset("x", i)));
        }
        assert_eq!(registry.surface().live.len(), 1);
        assert_eq!(registry.surface().disposed.len(), 49);
    }

    #[test]
    fn test_teardown_disposes_all() {
        let mut registry = ChartRegistry::new(RecordingSurface::default());
        for slot in Slot::ALL {
            registry.render_empty(slot);
        }
        registry.teardown();

        assert!(registry.surface().live.is_empty());
        for slot in Slot::ALL {
            assert_eq!(registry.state(slot), SlotState::Uninitialized);
        }
    }
}
