//! Chart Widgets
//!
//! Draws the same chart definitions the HTML snapshot hands to Chart.js:
//! the citations bar chart with ratatui's `BarChart`, the topic doughnut as
//! braille points on a `Canvas`.

use crate::tui::theme::{hex_color, Theme};
use crate::utils::{format_thousands, percentage, truncate_string};
use crate::view::chart::BAR_BORDER;
use crate::view::{ChartSpec, TickFormat};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Points},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use std::f64::consts::TAU;

const INNER_RADIUS: f64 = 0.5;
const RING_STEP: f64 = 0.04;
const ANGLE_STEP: f64 = 0.015;

pub fn render_bar_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let block = Block::default()
        .title(" Citations by Topic ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let values = spec.values();
    if values.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2);
    let slots = values.len() as u16;
    let bar_width = (inner_width / slots).saturating_sub(1).clamp(1, 12);
    let color = hex_color(BAR_BORDER);

    let bars: Vec<Bar> = spec
        .labels()
        .iter()
        .zip(values)
        .map(|(label, value)| {
            let text = match spec.y_tick_format() {
                TickFormat::Thousands => format_thousands(*value),
                TickFormat::Plain => value.to_string(),
            };
            Bar::default()
                .value(*value)
                .text_value(text)
                .label(Line::from(truncate_string(label, bar_width as usize)))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .value_style(Theme::heading())
        .label_style(Theme::text_secondary());

    frame.render_widget(chart, area);
}

/// Start and end angle of every slice, clockwise from twelve o'clock.
fn slice_angles(values: &[u64]) -> Vec<(f64, f64)> {
    let total: u64 = values.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    values
        .iter()
        .map(|v| {
            let end = start + *v as f64 / total as f64 * TAU;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

fn ring_points(start: f64, end: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let mut radius = INNER_RADIUS;
    while radius <= 1.0 {
        let mut angle = start;
        while angle < end {
            // Clockwise from the top, like Chart.js
            points.push((radius * angle.sin(), radius * angle.cos()));
            angle += ANGLE_STEP;
        }
        radius += RING_STEP;
    }
    points
}

pub fn render_doughnut(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let block = Block::default()
        .title(" Topic Distribution ")
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Legend sits on the right
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let values = spec.values();
    let slices: Vec<(Vec<(f64, f64)>, ratatui::style::Color)> = slice_angles(values)
        .into_iter()
        .enumerate()
        .map(|(i, (start, end))| (ring_points(start, end), hex_color(spec.color_at(i))))
        .collect();

    // Braille dots are twice as tall as wide per cell, so stretch x to keep it round
    let plot = columns[0];
    let aspect = (plot.width as f64 * 2.0) / (plot.height.max(1) as f64 * 4.0);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.1 * aspect, 1.1 * aspect])
        .y_bounds([-1.1, 1.1])
        .paint(move |ctx| {
            for (coords, color) in &slices {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });
    frame.render_widget(canvas, plot);

    let total: u64 = values.iter().sum();
    let legend: Vec<Line> = spec
        .labels()
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (label, value))| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(hex_color(spec.color_at(i)))),
                Span::styled(label.clone(), Theme::text()),
                Span::styled(
                    format!(" {:.1}%", percentage(*value, total)),
                    Theme::text_dim(),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_cover_full_circle() {
        let angles = slice_angles(&[30, 50, 20]);
        assert_eq!(angles.len(), 3);
        assert_eq!(angles[0].0, 0.0);
        assert!((angles[2].1 - TAU).abs() < 1e-9);
        assert!((angles[1].1 - angles[1].0 - TAU * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_draws_nothing() {
        assert!(slice_angles(&[0, 0]).is_empty());
        assert!(slice_angles(&[]).is_empty());
    }

    #[test]
    fn test_ring_points_stay_inside_ring() {
        for (x, y) in ring_points(0.0, 1.0) {
            let r = (x * x + y * y).sqrt();
            assert!(r >= INNER_RADIUS - 1e-9 && r <= 1.0 + 1e-9);
        }
    }
}
