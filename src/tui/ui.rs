//! UI Rendering
//!
//! Main layout for the terminal dashboard. Everything shown here is read
//! back from the page; the renderer never talks to the backend.

use crate::dom::{Dom, Element, ElementId, Tab};
use crate::tui::app::{App, View};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets;
use crate::view::{Content, StatsPanel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Active panel
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.active_tab() {
        Tab::Generate => render_generate(frame, chunks[2], app),
        Tab::TopPapers => render_top_papers(frame, chunks[2], app),
        Tab::Stats => render_stats(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    if let Some(Content::Toasts(toasts)) = app.dashboard.dom.content(ElementId::ToastContainer) {
        widgets::render_toasts(frame, frame.area(), &toasts);
    }

    if app.view == View::Help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = Paragraph::new(Line::from(vec![
        Span::raw("📚 "),
        Span::styled("Citation Analytics", Theme::title()),
        Span::styled(" Dashboard  ", Theme::text_secondary()),
        Span::styled(app.api_url.clone(), Theme::text_dim()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    frame.render_widget(title, area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let dom = &app.dashboard.dom;
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let label = dom
                .element(ElementId::TabButton(*tab))
                .and_then(|el| el.label)
                .unwrap_or_else(|| tab.title().to_string());
            Line::from(format!(" {} ", label))
        })
        .collect();
    let selected = Tab::ALL
        .iter()
        .position(|t| *t == app.active_tab())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Theme::text_secondary())
        .highlight_style(Theme::selected())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
    frame.render_widget(tabs, area);
}

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Theme::border_focused())
}

fn element(app: &App, id: ElementId) -> Element {
    app.dashboard.dom.element(id).unwrap_or_else(Element::hidden)
}

fn render_generate(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block(" Generate Sample Data ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Description
            Constraint::Length(1), // Button
            Constraint::Length(1),
            Constraint::Length(3), // Progress
            Constraint::Min(2),    // Status
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(
            "Creates synthetic papers and citations in the backend. This can take a while.",
        )
        .style(Theme::text_secondary()),
        rows[0],
    );

    let button = element(app, ElementId::GenerateButton);
    let style = if button.enabled {
        Theme::button()
    } else {
        Theme::button_disabled()
    };
    let label = button.label.unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("  {}  ", label), style),
            Span::styled("  [g / Enter]", Theme::text_dim()),
        ])),
        rows[1],
    );

    let progress = element(app, ElementId::GenerateProgress);
    if progress.visible {
        if let Content::Progress(percent) = progress.content {
            widgets::render_progress(frame, rows[3], percent);
        }
    }

    let status = element(app, ElementId::GenerateStatus);
    if status.visible {
        widgets::render_message(frame, rows[4], &status.content);
    }
}

fn render_top_papers(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block(" Most Cited Papers ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner = element(app, ElementId::CacheIndicator);
    let banner_height = match (&banner.content, banner.visible) {
        (Content::Banner(b), true) if b.ttl_hint_secs.is_some() || !b.cache_key.is_empty() => 6,
        (Content::Banner(_), true) => 5,
        _ => 0,
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Controls
            Constraint::Length(banner_height),
            Constraint::Min(3), // Results
        ])
        .split(inner);

    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Length(12), Constraint::Min(0)])
        .split(rows[0]);

    let topic = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", Icons::ARROW_LEFT), Theme::text_dim()),
        Span::styled(app.topic(), Theme::selected()),
        Span::styled(format!(" {}", Icons::ARROW_RIGHT), Theme::text_dim()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Topic ")
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    frame.render_widget(topic, controls[0]);

    let limit_block = Block::default()
        .title(" Limit ")
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());
    let limit_inner = limit_block.inner(controls[1]);
    frame.render_widget(limit_block, controls[1]);
    frame.render_widget(&app.limit_input, limit_inner);

    if let (Content::Banner(b), true) = (&banner.content, banner.visible) {
        widgets::render_banner(frame, rows[1], b);
    }

    match element(app, ElementId::TopPapersResult).content {
        Content::Papers(table) => widgets::render_papers(frame, rows[2], &table),
        Content::Empty => frame.render_widget(
            Paragraph::new("Pick a topic and press Enter (cached) or b (database).")
                .style(Theme::text_dim()),
            rows[2],
        ),
        other => widgets::render_message(frame, rows[2], &other),
    }
}

fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block(" Statistics ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let panel: StatsPanel = match element(app, ElementId::StatsResult).content {
        Content::Stats(panel) => panel,
        other => {
            widgets::render_message(frame, inner, &other);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(inner);
    widgets::render_cards(frame, rows[0], &panel.cards);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[0]);
    if panel.has_topic_section() {
        widgets::render_topic_table(frame, left[0], &panel.topic_distribution);
        if let Some(Content::Chart(spec)) = app.dashboard.dom.content(ElementId::TopicChart) {
            widgets::render_doughnut(frame, left[1], &spec);
        }
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);
    if panel.has_citations_section() {
        if let Some(Content::Chart(spec)) = app.dashboard.dom.content(ElementId::CitationsChart) {
            widgets::render_bar_chart(frame, right[0], &spec);
        }
    }
    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(right[1]);
    if panel.has_citations_section() {
        widgets::render_cited_table(frame, lower[0], &panel.most_cited);
    }
    if panel.has_year_section() {
        widgets::render_year_table(frame, lower[1], &panel.years);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let tab_keys: &[(&str, &str)] = match app.active_tab() {
        Tab::Generate => &[("[Enter]", " Generate ")],
        Tab::TopPapers => &[
            ("[Enter]", " Cached "),
            ("[b]", " Database "),
            ("[←/→]", " Topic "),
            ("[x]", " Clear cache "),
        ],
        Tab::Stats => &[("[r]", " Reload "), ("[D]", " Clear DB ")],
    };
    let common = [
        ("[Tab]", " Switch "),
        ("[h]", " Health "),
        ("[F1]", " Help "),
        ("[q]", " Quit"),
    ];

    let spans: Vec<Span> = tab_keys
        .iter()
        .chain(common.iter())
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, Theme::shortcut_key()),
                Span::styled(*desc, Theme::shortcut_desc()),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let entries = [
        ("Tab / Shift+Tab", "Next / previous tab"),
        ("Enter", "Run the tab's main action"),
        ("g", "Generate sample data"),
        ("b", "Query the database, skipping the cache"),
        ("← / →", "Change topic"),
        ("0-9, Backspace", "Edit the result limit"),
        ("x", "Clear the cache entry for topic + limit"),
        ("r", "Reload statistics"),
        ("D", "Clear the database"),
        ("h", "Check backend health"),
        ("d", "Dismiss notifications"),
        ("Ctrl+Q / q", "Quit"),
        ("Ctrl+C", "Force quit"),
    ];

    let mut lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
    ];
    lines.extend(entries.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("{:<17}", key), Theme::shortcut_key()),
            Span::styled(*desc, Theme::text()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Theme::text_dim(),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::StubApi;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[tokio::test]
    async fn test_generate_tab_renders_button() {
        let app = App::new(&Config::default(), Arc::new(StubApi::default()));
        let text = screen(&app);
        assert!(text.contains("Generate Data"));
        assert!(text.contains("Citation Analytics"));
    }

    #[tokio::test]
    async fn test_stats_tab_renders_cards() {
        let mut app = App::new(&Config::default(), Arc::new(StubApi::default()));
        app.dashboard.stats.load_stats().await.unwrap();
        app.handle_action(crate::tui::AppAction::PrevTab);

        let text = screen(&app);
        assert!(text.contains("10,000"));
        assert!(text.contains("Total Papers"));
    }

    #[tokio::test]
    async fn test_help_overlay() {
        let mut app = App::new(&Config::default(), Arc::new(StubApi::default()));
        app.handle_action(crate::tui::AppAction::ToggleHelp);
        assert!(screen(&app).contains("Keyboard Shortcuts"));
    }
}
