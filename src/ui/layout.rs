//! Main UI layout and rendering for the storage-report TUI.
//!
//! This module provides the main render function: header with the drive
//! picker and Analyze trigger, the summary line, the storage bar, the two
//! pie charts and the status bar, plus the help and tooltip overlays.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Summary};
use crate::chart::Slot;
use crate::format::truncate_path;
use crate::ui::colors::ColorScheme;
use crate::ui::input::InputMode;
use crate::ui::pie::render_pie_chart;
use crate::ui::storage_bar::render_storage_bar;
use crate::ui::tooltip::render_tooltip;

/// Application version string.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
const APP_NAME: &str = "storage-report";

/// Main render function that draws the entire UI.
///
/// Also refreshes the app's hit areas, so mouse events are tested against
/// what is actually on screen.
pub fn render_ui(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // header, summary, storage bar, charts, status
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(size);

    render_header(frame, main_layout[0], app);
    render_summary(frame, main_layout[1], app);

    app.bar_hit = render_storage_bar(
        frame,
        main_layout[2],
        app.charts.widget(Slot::StorageBar),
        app.report_total,
        app.hovered_in(Slot::StorageBar),
        app.focus == Slot::StorageBar,
        &app.color_scheme,
    );

    let chart_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_layout[3]);

    let mut pie_hits = Vec::with_capacity(2);
    for (slot, area) in [(Slot::Directories, chart_columns[0]), (Slot::Files, chart_columns[1])] {
        if let Some(hit) = render_pie_chart(
            frame,
            area,
            slot,
            app.charts.widget(slot),
            app.hovered_in(slot),
            app.focus == slot,
            &app.color_scheme,
        ) {
            pie_hits.push(hit);
        }
    }
    app.pie_hits = pie_hits;
    app.update_hovered_slice();

    render_status_bar(frame, main_layout[4], app);

    if app.input_mode == InputMode::Help {
        render_help_overlay(frame, size, &app.color_scheme);
    } else if let Some((anchor, tip)) = app.active_tooltip() {
        render_tooltip(frame, anchor, &tip, &app.color_scheme);
    }
}

/// Render the header bar: title, drive picker, Analyze trigger or spinner.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let color_scheme = &app.color_scheme;
    let header_style = Style::default()
        .fg(color_scheme.header_fg)
        .bg(color_scheme.header_bg);

    let title_style = Style::default()
        .fg(color_scheme.accent)
        .add_modifier(Modifier::BOLD);

    let hint_style = Style::default()
        .fg(color_scheme.hint_fg)
        .add_modifier(Modifier::DIM);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(format!("{} v{}", APP_NAME, VERSION), title_style),
        Span::raw(" "),
        Span::styled("\u{2502}", header_style), // Vertical separator
        Span::raw(" "),
        Span::styled("Drive: ", hint_style),
    ];

    match app.current_drive() {
        Some(drive) => {
            let max_drive_len = area.width.saturating_sub(60).max(8) as usize;
            spans.push(Span::styled("\u{25C0} ", Style::default().fg(color_scheme.key_fg)));
            spans.push(Span::styled(
                truncate_path(drive, max_drive_len),
                Style::default().fg(color_scheme.path_fg),
            ));
            spans.push(Span::styled(" \u{25B6}", Style::default().fg(color_scheme.key_fg)));
        }
        None => spans.push(Span::styled("none", Style::default().fg(color_scheme.text_dim))),
    }

    spans.push(Span::raw(" "));
    spans.push(Span::styled("\u{2502}", header_style));
    spans.push(Span::raw(" "));

    if app.busy_visible() {
        spans.push(Span::styled(
            format!("{} Analyzing...", app.spinner_char()),
            Style::default()
                .fg(color_scheme.busy_fg)
                .add_modifier(Modifier::BOLD),
        ));
    } else if app.trigger_visible() {
        spans.push(Span::styled(
            "[ Analyze ]",
            Style::default()
                .fg(color_scheme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ));
    }

    spans.push(Span::raw(" "));
    spans.push(Span::styled("\u{2502}", header_style));
    spans.push(Span::raw(" "));
    spans.push(Span::styled("Press ? for help", hint_style));

    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.border))
        .style(header_style);

    let header = Paragraph::new(Line::from(spans))
        .block(header_block)
        .style(header_style);

    frame.render_widget(header, area);
}

/// Render the summary line, or the upstream error in its place.
fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let color_scheme = &app.color_scheme;
    let style = match app.summary {
        Summary::Prompt => Style::default().fg(color_scheme.hint_fg),
        Summary::Usage(_) => Style::default()
            .fg(color_scheme.size_fg)
            .add_modifier(Modifier::BOLD),
        Summary::Fault(_) => Style::default()
            .fg(color_scheme.error_fg)
            .add_modifier(Modifier::BOLD),
    };

    let title = match &app.report_drive {
        Some(drive) => format!(" {} ", drive),
        None => " Summary ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.border))
        .title(title)
        .title_style(Style::default().fg(color_scheme.hint_fg));

    let paragraph = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(app.summary.text().to_string(), style),
    ]))
    .block(block);

    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom of the screen.
///
/// Integrity warnings win over the status message; key hints follow.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let color_scheme = &app.color_scheme;
    let status_style = Style::default()
        .fg(color_scheme.status_fg)
        .bg(color_scheme.status_bg);

    let key_style = Style::default()
        .fg(color_scheme.key_fg)
        .add_modifier(Modifier::BOLD);

    let hint_style = Style::default().fg(color_scheme.hint_fg);

    let mut spans = vec![Span::raw(" ")];

    if !app.integrity_warnings.is_empty() {
        spans.push(Span::styled(
            format!("\u{26A0} {}", app.integrity_warnings.join(" | ")),
            Style::default()
                .fg(color_scheme.warning_fg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled("\u{2502}", status_style));
        spans.push(Span::raw(" "));
    }

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(message.clone(), Style::default().fg(color_scheme.text)));
        spans.push(Span::raw(" "));
        spans.push(Span::styled("\u{2502}", status_style));
        spans.push(Span::raw(" "));
    }

    if app.input_mode == InputMode::Normal {
        for (key, action) in [
            ("\u{2190}\u{2192}", ":drive "),
            ("Enter", ":analyze "),
            ("Tab", ":chart "),
            ("\u{2191}\u{2193}", ":slice "),
            ("c", ":copy "),
            ("o", ":open "),
            ("?", ":help "),
            ("q", ":quit"),
        ] {
            spans.push(Span::styled(key, key_style));
            spans.push(Span::styled(action, hint_style));
        }
    }

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.border))
        .style(status_style);

    let status = Paragraph::new(Line::from(spans))
        .block(status_block)
        .style(status_style);

    frame.render_widget(status, area);
}

/// Render help overlay with all keyboard shortcuts.
fn render_help_overlay(frame: &mut Frame, area: Rect, color_scheme: &ColorScheme) {
    let overlay_width = 56.min(area.width.saturating_sub(4));
    let overlay_height = 22.min(area.height.saturating_sub(2));
    let overlay_x = (area.width.saturating_sub(overlay_width)) / 2;
    let overlay_y = (area.height.saturating_sub(overlay_height)) / 2;

    let overlay_area = Rect::new(overlay_x, overlay_y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(format!(" {} Help ", APP_NAME))
        .title_style(Style::default().fg(color_scheme.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.accent))
        .style(Style::default().bg(color_scheme.overlay_bg));

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(color_scheme.accent).add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |keys: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", keys), Style::default().fg(color_scheme.key_fg)),
            Span::styled(text, Style::default().fg(color_scheme.text)),
        ])
    };

    let help_text = vec![
        heading("Drive"),
        entry("h/\u{2190} l/\u{2192}", "Previous / next drive"),
        entry("Enter/a", "Analyze selected drive"),
        Line::from(""),
        heading("Charts"),
        entry("Tab/S-Tab", "Focus next / previous chart"),
        entry("k/\u{2191} j/\u{2193}", "Select previous / next slice"),
        entry("mouse", "Hover for details, click to select"),
        Line::from(""),
        heading("Actions"),
        entry("c", "Copy selected path to clipboard"),
        entry("o", "Open selected path"),
        Line::from(""),
        entry("?", "Show this help"),
        entry("q/Ctrl-C", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(color_scheme.hint_fg),
        )),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().bg(color_scheme.overlay_bg));

    frame.render_widget(paragraph, overlay_area);
}
