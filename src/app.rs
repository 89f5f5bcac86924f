use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::chart::{build_report, ChartRegistry, Slot, SlotContent, SlotState, Tooltip};
use crate::report::{AnalysisResult, DriveSource, SourceError};
use crate::ui::{BarHitArea, ColorScheme, Command, InputMode, PieHitArea, TerminalSurface};

/// Text shown while no analysis has been requested yet.
const PROMPT: &str = "Select a drive and press Enter to analyze";

/// Application state
pub struct App {
    source: Arc<dyn DriveSource>,

    // Drive picker
    pub drives: Vec<String>,
    pub selected_drive: usize,

    // Analysis state
    pub analysis_state: AnalysisState,
    pub summary: Summary,
    /// Drive whose report is on screen
    pub report_drive: Option<String>,
    /// Drive total the storage bar is proportional to
    pub report_total: u64,
    pub integrity_warnings: Vec<String>,
    result_receiver: Option<Receiver<Result<AnalysisResult, SourceError>>>,

    // Charts
    pub charts: ChartRegistry<TerminalSurface>,
    pub focus: Slot,

    // UI state
    pub color_scheme: ColorScheme,
    pub input_mode: InputMode,
    pub status_message: Option<String>,

    // Mouse hover state, hit areas are refreshed on every draw
    pub mouse_pos: Option<(u16, u16)>,
    pub hovered: Option<(Slot, usize)>,
    pub bar_hit: Option<BarHitArea>,
    pub pie_hits: Vec<PieHitArea>,

    // Animation
    pub spinner_frame: usize,
    pub last_spinner_update: Instant,

    // Flags
    pub should_quit: bool,
}

/// Whether an analysis request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Busy { drive: String, started: Instant },
}

/// The line above the storage bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Prompt,
    /// `"{used} of {total} Used"`
    Usage(String),
    /// Upstream error text, shown verbatim
    Fault(String),
}

impl Summary {
    pub fn text(&self) -> &str {
        match self {
            Summary::Prompt => PROMPT,
            Summary::Usage(text) | Summary::Fault(text) => text,
        }
    }
}

impl App {
    /// Build the app and load the drive list.
    ///
    /// A failing drive listing is an upstream fault: its text becomes the
    /// summary and the picker stays empty. Both pie slots start with the
    /// empty-ring placeholder.
    pub fn new(source: Arc<dyn DriveSource>, color_scheme: ColorScheme) -> Self {
        let (drives, summary) = match source.list_drives() {
            Ok(drives) => {
                info!(count = drives.len(), "loaded drive list");
                (drives, Summary::Prompt)
            }
            Err(e) => {
                error!(error = %e, "failed to list drives");
                (Vec::new(), Summary::Fault(e.to_string()))
            }
        };

        let mut charts = ChartRegistry::new(TerminalSurface::new());
        charts.render_empty(Slot::Directories);
        charts.render_empty(Slot::Files);

        Self {
            source,
            drives,
            selected_drive: 0,
            analysis_state: AnalysisState::Idle,
            summary,
            report_drive: None,
            report_total: 0,
            integrity_warnings: Vec::new(),
            result_receiver: None,
            charts,
            focus: Slot::StorageBar,
            color_scheme,
            input_mode: InputMode::Normal,
            status_message: None,
            mouse_pos: None,
            hovered: None,
            bar_hit: None,
            pie_hits: Vec::new(),
            spinner_frame: 0,
            last_spinner_update: Instant::now(),
            should_quit: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.analysis_state, AnalysisState::Busy { .. })
    }

    /// The Analyze trigger is shown only while idle and a drive is available.
    pub fn trigger_visible(&self) -> bool {
        !self.is_busy() && !self.drives.is_empty()
    }

    pub fn busy_visible(&self) -> bool {
        self.is_busy()
    }

    pub fn current_drive(&self) -> Option<&str> {
        self.drives.get(self.selected_drive).map(String::as_str)
    }

    /// Preselect a drive by identifier. Returns false if it is not listed.
    pub fn select_drive(&mut self, drive: &str) -> bool {
        match self.drives.iter().position(|d| d == drive) {
            Some(index) => {
                self.selected_drive = index;
                true
            }
            None => false,
        }
    }

    /// Request analysis of the selected drive in a background thread.
    ///
    /// Ignored while a request is already in flight.
    pub fn start_analysis(&mut self) {
        if self.is_busy() {
            return;
        }
        let Some(drive) = self.current_drive().map(str::to_string) else {
            self.status_message = Some("No drive to analyze".to_string());
            return;
        };

        info!(%drive, "starting analysis");
        self.analysis_state = AnalysisState::Busy {
            drive: drive.clone(),
            started: Instant::now(),
        };
        self.status_message = None;

        let (tx, rx) = mpsc::channel();
        self.result_receiver = Some(rx);

        let source = Arc::clone(&self.source);
        thread::spawn(move || {
            let result = source.analyze_drive(&drive);
            // The receiver is gone only when the app has shut down
            let _ = tx.send(result);
        });
    }

    /// Advance the spinner and collect a finished analysis (non-blocking)
    pub fn update(&mut self) {
        if self.last_spinner_update.elapsed() >= Duration::from_millis(80) {
            self.spinner_frame = (self.spinner_frame + 1) % 10;
            self.last_spinner_update = Instant::now();
        }

        let outcome = match self.result_receiver.as_ref().map(Receiver::try_recv) {
            None | Some(Err(TryRecvError::Empty)) => return,
            Some(Ok(result)) => result.map_err(|e| e.to_string()),
            Some(Err(TryRecvError::Disconnected)) => {
                Err("analysis worker stopped without a result".to_string())
            }
        };
        self.result_receiver = None;
        self.settle(outcome);
    }

    /// Settle the in-flight request. The busy state is cleared first, on
    /// every path.
    fn settle(&mut self, outcome: Result<AnalysisResult, String>) {
        let state = std::mem::replace(&mut self.analysis_state, AnalysisState::Idle);
        let (drive, elapsed) = match state {
            AnalysisState::Busy { drive, started } => (drive, started.elapsed()),
            AnalysisState::Idle => return,
        };

        match outcome {
            Ok(analysis) => {
                info!(%drive, elapsed_ms = elapsed.as_millis() as u64, "analysis finished");
                self.render_report(drive, &analysis);
            }
            Err(message) => {
                error!(%drive, error = %message, "analysis failed");
                self.summary = Summary::Fault(message);
            }
        }
    }

    /// Rebuild all three slots from one analysis.
    pub fn render_report(&mut self, drive: String, analysis: &AnalysisResult) {
        let report = build_report(analysis, &Local);

        self.integrity_warnings = report
            .integrity
            .iter()
            .map(|(slot, fault)| format!("{}: {}", slot.title(), fault))
            .collect();
        self.summary = Summary::Usage(report.summary);
        self.report_total = report.total;
        self.report_drive = Some(drive);
        self.hovered = None;

        let datasets = [
            (Slot::StorageBar, report.storage_bar),
            (Slot::Directories, report.directories),
            (Slot::Files, report.files),
        ];
        for (slot, dataset) in datasets {
            self.charts.render(slot, SlotContent::Dataset(dataset));
        }
    }

    /// Handle a command from user input
    pub fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.should_quit = true,
            Command::PrevDrive => {
                if !self.is_busy() && !self.drives.is_empty() {
                    let count = self.drives.len();
                    self.selected_drive = (self.selected_drive + count - 1) % count;
                }
            }
            Command::NextDrive => {
                if !self.is_busy() && !self.drives.is_empty() {
                    self.selected_drive = (self.selected_drive + 1) % self.drives.len();
                }
            }
            Command::Analyze => self.start_analysis(),
            Command::FocusNext => self.focus = self.focus.next(),
            Command::FocusPrev => self.focus = self.focus.prev(),
            Command::SelectNext => self.step_selection(true),
            Command::SelectPrev => self.step_selection(false),
            Command::CopyPath => self.copy_selected_path(),
            Command::OpenPath => self.open_selected_path(),
            Command::ShowHelp => self.input_mode = InputMode::Help,
            Command::HideHelp => self.input_mode = InputMode::Normal,
            Command::Noop => {}
        }
    }

    /// Move the selection in the focused chart. Only populated charts have
    /// slices to step through.
    fn step_selection(&mut self, forward: bool) {
        if self.charts.state(self.focus) != SlotState::Populated {
            self.status_message = Some(format!("{} has no data yet", self.focus.title()));
            return;
        }
        if let Some(chart) = self.charts.widget_mut(self.focus) {
            if forward {
                chart.select_next();
            } else {
                chart.select_prev();
            }
        }
    }

    /// Path behind the selected slice of the focused chart.
    pub fn selected_path(&self) -> Result<&str, &'static str> {
        let chart = self
            .charts
            .widget(self.focus)
            .ok_or("Nothing selected")?;
        let meta = chart.selected_meta().ok_or("Nothing selected")?;
        meta.path().ok_or("Selected slice has no path")
    }

    /// Copy selected path to clipboard
    fn copy_selected_path(&mut self) {
        let path = match self.selected_path() {
            Ok(path) => path.to_string(),
            Err(reason) => {
                self.status_message = Some(reason.to_string());
                return;
            }
        };

        let copied = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(&path));
        self.status_message = Some(match copied {
            Ok(()) => format!("Copied {}", path),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                format!("Clipboard unavailable: {}", e)
            }
        });
    }

    /// Open selected path with the system opener
    fn open_selected_path(&mut self) {
        let path = match self.selected_path() {
            Ok(path) => path.to_string(),
            Err(reason) => {
                self.status_message = Some(reason.to_string());
                return;
            }
        };

        self.status_message = Some(match open::that(&path) {
            Ok(()) => format!("Opened {}", path),
            Err(e) => {
                warn!(%path, error = %e, "failed to open path");
                format!("Failed to open {}: {}", path, e)
            }
        });
    }

    /// Slice under screen cell `(x, y)`, using the hit areas of the last draw.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(Slot, usize)> {
        if let Some(index) = self.bar_hit.as_ref().and_then(|hit| hit.hit(x, y)) {
            return Some((Slot::StorageBar, index));
        }
        self.pie_hits.iter().find_map(|hit| {
            let dataset = self.charts.widget(hit.slot)?.dataset()?;
            hit.hit(dataset.values(), x, y).map(|index| (hit.slot, index))
        })
    }

    /// Update mouse position and the hovered slice.
    pub fn update_mouse_pos(&mut self, x: u16, y: u16) {
        self.mouse_pos = Some((x, y));
        self.update_hovered_slice();
    }

    /// Recompute the hovered slice after the hit areas changed.
    pub fn update_hovered_slice(&mut self) {
        self.hovered = self.mouse_pos.and_then(|(x, y)| self.hit_test(x, y));
    }

    /// Click selects the slice under the cursor and focuses its chart.
    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        let Some((slot, index)) = self.hit_test(x, y) else {
            return false;
        };
        self.focus = slot;
        if let Some(chart) = self.charts.widget_mut(slot) {
            chart.select(index);
        }
        true
    }

    /// Hovered slice index within `slot`.
    pub fn hovered_in(&self, slot: Slot) -> Option<usize> {
        self.hovered
            .filter(|(hovered_slot, _)| *hovered_slot == slot)
            .map(|(_, index)| index)
    }

    /// Tooltip for the hovered slice, anchored at the mouse position.
    pub fn hover_tooltip(&self) -> Option<((u16, u16), Tooltip)> {
        let (slot, index) = self.hovered?;
        let anchor = self.mouse_pos?;
        let dataset = self.charts.widget(slot)?.dataset()?;
        crate::chart::tooltip(dataset, index).map(|tip| (anchor, tip))
    }

    /// Tooltip for the focused chart's selected slice, anchored on that
    /// chart: at the segment's first cell for the bar, at the canvas center
    /// for a pie.
    pub fn selection_tooltip(&self) -> Option<((u16, u16), Tooltip)> {
        let chart = self.charts.widget(self.focus)?;
        let index = chart.selected()?;
        let anchor = match self.focus {
            Slot::StorageBar => {
                let bar = self.bar_hit.as_ref()?;
                let offset = bar
                    .spans
                    .iter()
                    .find(|span| span.index == index)
                    .map_or(0, |span| span.start);
                (bar.row.x + offset, bar.row.y)
            }
            slot => {
                let hit = self.pie_hits.iter().find(|hit| hit.slot == slot)?;
                (
                    hit.canvas.x + hit.canvas.width / 2,
                    hit.canvas.y + hit.canvas.height / 2,
                )
            }
        };
        chart.selected_tooltip().map(|tip| (anchor, tip))
    }

    /// The hovered slice wins; otherwise the keyboard selection.
    pub fn active_tooltip(&self) -> Option<((u16, u16), Tooltip)> {
        self.hover_tooltip().or_else(|| self.selection_tooltip())
    }

    /// Get spinner character for current frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    /// Release every chart widget before exit.
    pub fn shutdown(&mut self) {
        debug!(live = self.charts.surface().live(), "releasing chart widgets");
        self.charts.teardown();
    }
}
