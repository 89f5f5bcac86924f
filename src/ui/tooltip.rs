//! Tooltip overlay for hovered or selected slices.
//!
//! Draws a [`Tooltip`] in a bordered box next to the mouse cursor, moved
//! as needed to stay on screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::chart::Tooltip;
use crate::format::{truncate_path, truncate_str};
use crate::ui::colors::ColorScheme;

/// Widest tooltip content, in columns.
const MAX_CONTENT_WIDTH: usize = 48;

/// Render `tip` as an overlay anchored at `anchor` (usually the mouse cursor).
///
/// The label line is bold; footer lines follow it, with path lines shortened
/// from the left so the file name stays visible.
pub fn render_tooltip(
    frame: &mut Frame,
    anchor: (u16, u16),
    tip: &Tooltip,
    color_scheme: &ColorScheme,
) {
    let screen_size = frame.area();

    let mut lines: Vec<Line> = Vec::new();
    if !tip.title.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", truncate_str(&tip.title, MAX_CONTENT_WIDTH)),
            Style::default().fg(color_scheme.accent),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!(" {}", truncate_str(&tip.label, MAX_CONTENT_WIDTH)),
        Style::default()
            .fg(color_scheme.text)
            .add_modifier(Modifier::BOLD),
    )));
    for footer_line in tip.footer.lines() {
        let text = match footer_line.strip_prefix("Path: ") {
            Some(path) => format!("Path: {}", truncate_path(path, MAX_CONTENT_WIDTH - 6)),
            None if footer_line.contains(['/', '\\']) => {
                truncate_path(footer_line, MAX_CONTENT_WIDTH)
            }
            None => truncate_str(footer_line, MAX_CONTENT_WIDTH),
        };
        let style = if footer_line.starts_with("Size: ") {
            Style::default().fg(color_scheme.size_fg)
        } else if text.contains(['/', '\\']) {
            Style::default().fg(color_scheme.path_fg)
        } else {
            Style::default().fg(color_scheme.hint_fg)
        };
        lines.push(Line::from(Span::styled(format!(" {}", text), style)));
    }

    // Calculate tooltip dimensions
    let content_width = lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.width()).sum::<usize>())
        .max()
        .unwrap_or(20);
    let tooltip_width = ((content_width + 2) as u16).min(screen_size.width); // +2 for borders
    let tooltip_height = ((lines.len() + 2) as u16).min(screen_size.height);

    let (x, y) = calculate_tooltip_position(anchor, tooltip_width, tooltip_height, screen_size);
    let tooltip_area = Rect::new(x, y, tooltip_width, tooltip_height);

    // Clear the area first
    frame.render_widget(Clear, tooltip_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.accent))
        .style(Style::default().bg(color_scheme.overlay_bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(color_scheme.overlay_bg));

    frame.render_widget(paragraph, tooltip_area);
}

/// Calculate tooltip position to keep it visible on screen.
/// Prefers positioning below and to the right of the cursor.
fn calculate_tooltip_position(
    mouse_pos: (u16, u16),
    width: u16,
    height: u16,
    screen: Rect,
) -> (u16, u16) {
    let (mx, my) = mouse_pos;

    // Offset from cursor to avoid overlapping
    let offset_x: u16 = 2;
    let offset_y: u16 = 1;

    let mut x = mx.saturating_add(offset_x);
    let mut y = my.saturating_add(offset_y);

    // Off the right edge: left of the cursor instead
    if x + width > screen.width {
        x = mx.saturating_sub(width).saturating_sub(1);
    }

    // Off the bottom edge: above the cursor instead
    if y + height > screen.height {
        y = my.saturating_sub(height);
    }

    x = x.min(screen.width.saturating_sub(width));
    y = y.min(screen.height.saturating_sub(height));

    (x, y)
}
