//! Segmented storage bar with its legend.
//!
//! Each category gets a run of cells proportional to `size / total`. Cell
//! boundaries are rounded from cumulative sums, so the runs never drift and
//! the bar fills its row exactly when the categories add up to the total.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::chart::{ChartDataset, SlotContent};
use crate::ui::colors::ColorScheme;
use crate::ui::surface::TerminalChart;

/// Cell range `[start, end)` covered by slice `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpan {
    pub index: usize,
    pub start: u16,
    pub end: u16,
}

impl SegmentSpan {
    pub fn width(&self) -> u16 {
        self.end - self.start
    }

    pub fn contains(&self, cell: u16) -> bool {
        self.start <= cell && cell < self.end
    }
}

/// Lay out `values` across `width` cells, proportionally to `total`.
///
/// Returns one span per value, zero-width spans included. Cells past the
/// last span are unaccounted space (the slices sum to less than `total`).
pub fn layout_segments(values: &[u64], total: u64, width: u16) -> Vec<SegmentSpan> {
    let mut cumulative: u128 = 0;
    let mut start = 0u16;

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            cumulative += value as u128;
            let end = if total == 0 {
                0
            } else {
                let scaled = (cumulative * width as u128 + total as u128 / 2) / total as u128;
                scaled.min(width as u128) as u16
            };
            let span = SegmentSpan {
                index,
                start,
                end: end.max(start),
            };
            start = span.end;
            span
        })
        .collect()
}

/// Slice under cell `cell` of the bar row.
pub fn segment_at(spans: &[SegmentSpan], cell: u16) -> Option<usize> {
    spans.iter().find(|span| span.contains(cell)).map(|span| span.index)
}

/// Where the bar row was drawn, for mouse hit testing.
#[derive(Debug, Clone, PartialEq)]
pub struct BarHitArea {
    pub row: Rect,
    pub spans: Vec<SegmentSpan>,
}

impl BarHitArea {
    pub fn hit(&self, column: u16, row: u16) -> Option<usize> {
        if row != self.row.y || column < self.row.x || column >= self.row.x + self.row.width {
            return None;
        }
        segment_at(&self.spans, column - self.row.x)
    }
}

/// Render the storage bar slot.
///
/// `total` is the drive total the segments are proportional to. Returns the
/// hit area of the bar row when a dataset was drawn.
pub fn render_storage_bar(
    frame: &mut Frame,
    area: Rect,
    widget: Option<&TerminalChart>,
    total: u64,
    hovered: Option<usize>,
    focused: bool,
    color_scheme: &ColorScheme,
) -> Option<BarHitArea> {
    let border_color = if focused {
        color_scheme.selected
    } else {
        color_scheme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Storage ")
        .title_style(Style::default().fg(color_scheme.hint_fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let dataset = match widget.map(TerminalChart::content) {
        Some(SlotContent::Dataset(dataset)) => dataset,
        _ => {
            let hint = Paragraph::new(Line::from(Span::styled(
                " Select a drive and press Enter to analyze",
                Style::default().fg(color_scheme.hint_fg),
            )));
            frame.render_widget(hint, inner);
            return None;
        }
    };
    if inner.height == 0 || inner.width == 0 {
        return None;
    }

    let selected = widget.and_then(TerminalChart::selected);
    let highlight = hovered.or(selected);

    let row = Rect::new(inner.x, inner.y, inner.width, 1);
    let spans = layout_segments(dataset.values(), total, row.width);
    let bar = bar_line(dataset, &spans, row.width, highlight, color_scheme);
    frame.render_widget(Paragraph::new(bar), row);

    if inner.height > 1 {
        let legend_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        let legend = Paragraph::new(legend_line(dataset, highlight, color_scheme))
            .wrap(Wrap { trim: true });
        frame.render_widget(legend, legend_area);
    }

    Some(BarHitArea { row, spans })
}

fn bar_line<'a>(
    dataset: &ChartDataset,
    spans: &[SegmentSpan],
    width: u16,
    highlight: Option<usize>,
    color_scheme: &ColorScheme,
) -> Line<'a> {
    let mut cells: Vec<Span> = spans
        .iter()
        .filter(|span| span.width() > 0)
        .map(|span| {
            let color: Color = dataset.colors()[span.index].into();
            let glyph = if highlight == Some(span.index) {
                "\u{2593}" // Dark shade marks the highlighted segment
            } else {
                "\u{2588}"
            };
            Span::styled(glyph.repeat(span.width() as usize), Style::default().fg(color))
        })
        .collect();

    let filled = spans.last().map_or(0, |span| span.end);
    if filled < width {
        cells.push(Span::styled(
            "\u{2591}".repeat((width - filled) as usize),
            Style::default().fg(color_scheme.hint_fg),
        ));
    }
    Line::from(cells)
}

fn legend_line<'a>(
    dataset: &ChartDataset,
    highlight: Option<usize>,
    color_scheme: &ColorScheme,
) -> Line<'a> {
    let mut spans = Vec::with_capacity(dataset.len() * 2);
    for (index, (label, color)) in dataset.labels().iter().zip(dataset.colors()).enumerate() {
        let mut text_style = Style::default().fg(color_scheme.text);
        if highlight == Some(index) {
            text_style = text_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled("\u{25A0} ", Style::default().fg(Color::from(*color))));
        spans.push(Span::styled(format!("{}  ", label), text_style));
    }
    Line::from(spans)
}
