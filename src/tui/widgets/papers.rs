use crate::tui::theme::Theme;
use crate::utils::truncate_string;
use crate::view::{CacheBanner, PapersTable};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Cache banner: state, source badge, timing and the cache key.
pub fn render_banner(frame: &mut Frame, area: Rect, banner: &CacheBanner) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(banner.headline(), Theme::banner(banner.state)),
            Span::raw("  "),
            Span::styled(format!(" {} ", banner.badge()), Theme::badge(banner.state)),
            Span::raw("  "),
            Span::styled(format!("{} ms", banner.elapsed_ms), Theme::heading()),
        ]),
        Line::from(vec![
            Span::styled(banner.description(), Theme::text()),
            Span::styled(
                format!("  status={} source={}", banner.cache_status, banner.source),
                Theme::text_dim(),
            ),
        ]),
    ];
    if !banner.cache_key.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Key: ", Theme::text_secondary()),
            Span::styled(banner.cache_key.clone(), Theme::text()),
        ]));
    }
    if let Some(hint) = banner.ttl_hint() {
        lines.push(Line::from(Span::styled(hint, Theme::text_secondary())));
    }

    let block = Block::default()
        .title(" Cache ")
        .borders(Borders::ALL)
        .border_style(Theme::banner(banner.state));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Ranked results table with the row count in the title.
pub fn render_papers(frame: &mut Frame, area: Rect, table: &PapersTable) {
    let title_width = area.width.saturating_sub(50).max(12) as usize;

    let header = Row::new(vec!["#", "Title", "Topic", "Year", "Citations", "Growth"])
        .style(Theme::heading());
    let rows = table.rows.iter().map(|row| {
        Row::new(vec![
            row.rank.to_string(),
            truncate_string(&row.title, title_width),
            row.topic.clone(),
            row.year.to_string(),
            row.citations_display(),
            row.growth_display(),
        ])
        .style(Theme::text())
    });

    let widget = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(17),
            Constraint::Length(6),
            Constraint::Length(11),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!(" {} ", table.footer()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    frame.render_widget(widget, area);
}
