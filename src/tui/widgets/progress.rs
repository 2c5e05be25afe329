//! Progress Widget
//!
//! The generate progress gauge plus the plain message renderers shared by
//! every panel (loading text, inline status lines).

use crate::tui::theme::{Icons, Theme};
use crate::view::{Content, StatusMessage};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Render the simulated generation progress.
pub fn render_progress(frame: &mut Frame, area: Rect, percent: u8) {
    let style = if percent >= 100 {
        Theme::severity(crate::view::Severity::Success)
    } else {
        Theme::title()
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Progress ")
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(style)
        .percent(u16::from(percent.min(100)))
        .label(format!("{}%", percent));

    frame.render_widget(gauge, area);
}

/// One styled line for an inline status message.
pub fn status_line(status: &StatusMessage) -> Line<'static> {
    let style = Theme::severity(status.severity);
    let mut spans = vec![Span::styled(
        format!("{} ", Icons::severity(status.severity)),
        style,
    )];
    if let Some(headline) = &status.headline {
        spans.push(Span::styled(format!("{} ", headline), Theme::heading()));
    }
    spans.push(Span::styled(status.text.clone(), style));
    Line::from(spans)
}

/// Loading text or a status line; other content renders nothing here.
pub fn render_message(frame: &mut Frame, area: Rect, content: &Content) {
    let line = match content {
        Content::Loading(text) => Line::from(Span::styled(text.clone(), Theme::text_secondary())),
        Content::Status(status) => status_line(status),
        _ => return,
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}
