//! Pie charts drawn on a braille canvas, with a side legend.
//!
//! Angles run clockwise from twelve o'clock. The canvas spans `[-1, 1]` on
//! both axes; hit testing maps terminal cells into the same space.

use std::f64::consts::TAU;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Painter, Shape},
        Block, Borders, Paragraph,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::chart::{ChartDataset, EmptyRing, Slot, SlotContent, SliceColor};
use crate::format::format_bytes;
use crate::ui::colors::ColorScheme;
use crate::ui::surface::TerminalChart;

/// Grid resolution used to fill the disc.
const FILL_STEPS: usize = 160;

/// Radius of unhighlighted slices; the highlighted one reaches the rim.
const INNER_RADIUS: f64 = 0.9;

/// Slice covering canvas point `(x, y)`, or `None` outside the unit disc.
pub fn slice_at(values: &[u64], x: f64, y: f64) -> Option<usize> {
    if x * x + y * y > 1.0 {
        return None;
    }
    let total: u128 = values.iter().map(|&v| v as u128).sum();
    if total == 0 {
        return None;
    }

    let mut angle = x.atan2(y);
    if angle < 0.0 {
        angle += TAU;
    }
    let fraction = angle / TAU;

    let mut cumulative: u128 = 0;
    let mut last_nonzero = None;
    for (index, &value) in values.iter().enumerate() {
        if value == 0 {
            continue;
        }
        cumulative += value as u128;
        last_nonzero = Some(index);
        if fraction < cumulative as f64 / total as f64 {
            return Some(index);
        }
    }
    last_nonzero
}

/// Map a terminal cell inside `canvas` to canvas coordinates (cell center).
pub fn cell_to_canvas(canvas: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    if canvas.width == 0
        || canvas.height == 0
        || column < canvas.x
        || row < canvas.y
        || column >= canvas.x + canvas.width
        || row >= canvas.y + canvas.height
    {
        return None;
    }
    let x = ((column - canvas.x) as f64 + 0.5) / canvas.width as f64 * 2.0 - 1.0;
    let y = 1.0 - ((row - canvas.y) as f64 + 0.5) / canvas.height as f64 * 2.0;
    Some((x, y))
}

/// Largest area inside `area` that renders as a circle.
///
/// Terminal cells are about twice as tall as wide, so a round pie needs two
/// columns per row.
pub fn square_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Where a pie was drawn, for mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieHitArea {
    pub slot: Slot,
    pub canvas: Rect,
}

impl PieHitArea {
    pub fn hit(&self, values: &[u64], column: u16, row: u16) -> Option<usize> {
        let (x, y) = cell_to_canvas(self.canvas, column, row)?;
        slice_at(values, x, y)
    }
}

/// The filled disc.
struct PieShape<'a> {
    values: &'a [u64],
    colors: &'a [SliceColor],
    highlight: Option<usize>,
}

impl Shape for PieShape<'_> {
    fn draw(&self, painter: &mut Painter) {
        let step = 2.0 / FILL_STEPS as f64;
        for i in 0..=FILL_STEPS {
            for j in 0..=FILL_STEPS {
                let x = -1.0 + i as f64 * step;
                let y = -1.0 + j as f64 * step;
                let Some(index) = slice_at(self.values, x, y) else {
                    continue;
                };
                let radius = (x * x + y * y).sqrt();
                if radius > INNER_RADIUS && self.highlight != Some(index) {
                    continue;
                }
                if let Some((px, py)) = painter.get_point(x, y) {
                    painter.paint(px, py, Color::from(self.colors[index]));
                }
            }
        }
    }
}

/// Render a pie chart slot: canvas on the left, legend on the right.
///
/// Returns the canvas hit area when a dataset was drawn.
pub fn render_pie_chart(
    frame: &mut Frame,
    area: Rect,
    slot: Slot,
    widget: Option<&TerminalChart>,
    hovered: Option<usize>,
    focused: bool,
    color_scheme: &ColorScheme,
) -> Option<PieHitArea> {
    let border_color = if focused {
        color_scheme.selected
    } else {
        color_scheme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", slot.title()))
        .title_style(Style::default().fg(color_scheme.hint_fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let widget = widget?;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    let canvas_area = square_area(columns[0]);

    match widget.content() {
        SlotContent::Placeholder(ring) => {
            render_empty_ring(frame, canvas_area, ring);
            let hint = Paragraph::new(Line::from(Span::styled(
                "No data",
                Style::default().fg(color_scheme.hint_fg),
            )));
            frame.render_widget(hint, columns[1]);
            None
        }
        SlotContent::Dataset(dataset) => {
            let highlight = hovered.or(widget.selected());
            let shape = PieShape {
                values: dataset.values(),
                colors: dataset.colors(),
                highlight,
            };
            let canvas = Canvas::default()
                .marker(Marker::Braille)
                .x_bounds([-1.0, 1.0])
                .y_bounds([-1.0, 1.0])
                .paint(|ctx| ctx.draw(&shape));
            frame.render_widget(canvas, canvas_area);

            render_legend(frame, columns[1], dataset, highlight, color_scheme);
            Some(PieHitArea {
                slot,
                canvas: canvas_area,
            })
        }
    }
}

fn render_empty_ring(frame: &mut Frame, area: Rect, ring: &EmptyRing) {
    let radius = 1.0 - ring.radius_decrease;
    let color = Color::from(ring.color);
    let width = ring.width;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(move |ctx| {
            for stroke in 0..width {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: radius - stroke as f64 * 0.03,
                    color,
                });
            }
        });
    frame.render_widget(canvas, area);
}

fn render_legend(
    frame: &mut Frame,
    area: Rect,
    dataset: &ChartDataset,
    highlight: Option<usize>,
    color_scheme: &ColorScheme,
) {
    // "■ " + label + " " + size
    let size_width = 10;
    let label_width = (area.width as usize).saturating_sub(size_width + 3).max(1);

    let lines: Vec<Line> = dataset
        .labels()
        .iter()
        .zip(dataset.values())
        .zip(dataset.colors())
        .enumerate()
        .map(|(index, ((label, &value), &color))| {
            let mut text_style = Style::default().fg(color_scheme.text);
            if highlight == Some(index) {
                text_style = text_style
                    .fg(color_scheme.selected)
                    .add_modifier(Modifier::BOLD);
            }
            Line::from(vec![
                Span::styled("\u{25A0} ", Style::default().fg(Color::from(color))),
                Span::styled(pad_to_width(label, label_width), text_style),
                Span::raw(" "),
                Span::styled(
                    format!("{:>width$}", format_bytes(value), width = size_width),
                    Style::default().fg(color_scheme.size_fg),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Truncate or pad `s` to exactly `width` display columns.
fn pad_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrants_map_to_slices() {
        // four equal slices, clockwise from twelve o'clock
        let values = [1, 1, 1, 1];
        assert_eq!(slice_at(&values, 0.3, 0.5), Some(0)); // upper right
        assert_eq!(slice_at(&values, 0.3, -0.5), Some(1)); // lower right
        assert_eq!(slice_at(&values, -0.3, -0.5), Some(2)); // lower left
        assert_eq!(slice_at(&values, -0.3, 0.5), Some(3)); // upper left
    }

    #[test]
    fn test_outside_disc() {
        assert_eq!(slice_at(&[1], 0.9, 0.9), None);
        assert_eq!(slice_at(&[1], 0.0, 0.0), Some(0));
    }

    #[test]
    fn test_zero_slices_are_never_hit() {
        let values = [0, 3, 0, 1];
        assert_eq!(slice_at(&values, 0.1, 0.5), Some(1));
        assert_eq!(slice_at(&values, -0.5, 0.1), Some(3));
        assert_eq!(slice_at(&[0, 0], 0.1, 0.1), None);
    }

    #[test]
    fn test_proportional_sweep() {
        // 3:1 split, the first slice covers three quadrants
        let values = [300, 100];
        assert_eq!(slice_at(&values, -0.5, -0.3), Some(0));
        assert_eq!(slice_at(&values, -0.5, 0.3), Some(1));
    }

    #[test]
    fn test_cell_to_canvas() {
        let canvas = Rect::new(10, 5, 20, 10);
        let (x, y) = cell_to_canvas(canvas, 10, 5).unwrap();
        assert!(x < -0.9 && y > 0.8);
        let (x, y) = cell_to_canvas(canvas, 29, 14).unwrap();
        assert!(x > 0.9 && y < -0.8);
        assert!(cell_to_canvas(canvas, 30, 5).is_none());
        assert!(cell_to_canvas(canvas, 9, 5).is_none());
    }

    #[test]
    fn test_hit_area() {
        let hit = PieHitArea {
            slot: Slot::Directories,
            canvas: Rect::new(0, 0, 20, 10),
        };
        let values = [1, 1];
        // right half is the first slice, left half the second
        assert_eq!(hit.hit(&values, 14, 4), Some(0));
        assert_eq!(hit.hit(&values, 5, 4), Some(1));
        // corner lies outside the disc
        assert_eq!(hit.hit(&values, 0, 0), None);
    }

    #[test]
    fn test_square_area() {
        let area = square_area(Rect::new(0, 0, 40, 10));
        assert_eq!(area, Rect::new(10, 0, 20, 10));
        let area = square_area(Rect::new(0, 0, 10, 20));
        assert_eq!(area, Rect::new(0, 7, 10, 5));
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("abc", 5), "abc  ");
        assert_eq!(pad_to_width("abcdefgh", 5), "abcd\u{2026}");
        assert_eq!(pad_to_width("日本語", 4), "日\u{2026} ");
    }
}
