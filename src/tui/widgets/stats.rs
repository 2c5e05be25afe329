use crate::tui::theme::Theme;
use crate::utils::format_thousands;
use crate::view::{CitedTopicRow, StatCard, TopicShareRow, YearRow};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Summary cards side by side.
pub fn render_cards(frame: &mut Frame, area: Rect, cards: &[StatCard]) {
    if cards.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(card.value.clone(), Theme::title())),
            Line::from(Span::styled(card.label, Theme::text_secondary())),
        ];
        let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title(format!(" {} ", card.icon))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
        frame.render_widget(widget, *column);
    }
}

fn table_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Theme::border())
}

pub fn render_topic_table(frame: &mut Frame, area: Rect, rows: &[TopicShareRow]) {
    let body = rows.iter().map(|r| {
        Row::new(vec![
            r.topic.clone(),
            format_thousands(r.count),
            r.percentage_display(),
        ])
        .style(Theme::text())
    });
    let table = Table::new(
        body,
        [
            Constraint::Min(12),
            Constraint::Length(10),
            Constraint::Length(7),
        ],
    )
    .header(Row::new(vec!["Topic", "Papers", "Share"]).style(Theme::heading()))
    .block(table_block(" Topic Distribution "));
    frame.render_widget(table, area);
}

pub fn render_cited_table(frame: &mut Frame, area: Rect, rows: &[CitedTopicRow]) {
    let body = rows.iter().map(|r| {
        Row::new(vec![r.topic.clone(), format_thousands(r.citation_count)]).style(Theme::text())
    });
    let table = Table::new(body, [Constraint::Min(12), Constraint::Length(12)])
        .header(Row::new(vec!["Topic", "Citations"]).style(Theme::heading()))
        .block(table_block(" Most Cited Topics "));
    frame.render_widget(table, area);
}

pub fn render_year_table(frame: &mut Frame, area: Rect, rows: &[YearRow]) {
    let body = rows
        .iter()
        .map(|r| Row::new(vec![r.year.to_string(), format_thousands(r.count)]).style(Theme::text()));
    let table = Table::new(body, [Constraint::Length(6), Constraint::Min(8)])
        .header(Row::new(vec!["Year", "Papers"]).style(Theme::heading()))
        .block(table_block(" Papers by Year "));
    frame.render_widget(table, area);
}
