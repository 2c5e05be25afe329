use crate::config::TOPICS;
use crate::dom::{Dom, Element, ElementId, Tab};
use crate::view::{
    CacheBanner, ChartSpec, Content, PapersTable, StatsPanel, StatusMessage, TickFormat, Toast,
};
use chrono::{DateTime, Utc};
use std::fmt::Write;

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

const STYLE: &str = r#"
    * { box-sizing: border-box; }
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; color: #1d1d1f; }
    .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
    header { color: #fff; text-align: center; margin-bottom: 2rem; }
    .tabs { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
    .tab-btn { flex: 1; padding: 0.8rem; border: none; border-radius: 8px; background: rgba(255,255,255,0.2); color: #fff; font-weight: 600; }
    .tab-btn.active { background: #fff; color: #667eea; }
    .tab-content { display: none; background: #fff; border-radius: 12px; padding: 1.5rem; }
    .tab-content.active { display: block; }
    .hidden { display: none; }
    button[disabled] { opacity: 0.6; }
    .progress { height: 12px; background: #eee; border-radius: 6px; overflow: hidden; margin-top: 1rem; }
    .progress-fill { height: 100%; background: #667eea; }
    .status { padding: 0.8rem; border-radius: 8px; margin-top: 1rem; }
    .status.info { background: #e3f2fd; } .status.success { background: #e8f5e9; }
    .status.warning { background: #fff8e1; } .status.error { background: #ffebee; }
    .cache-indicator { padding: 1rem; border-radius: 8px; margin: 1rem 0; }
    .cache-indicator.hit { background: #e8f5e9; border-left: 4px solid #4caf50; }
    .cache-indicator.miss { background: #fff3e0; border-left: 4px solid #ff9800; }
    .badge { font-weight: 700; padding: 0.2rem 0.5rem; border-radius: 4px; background: #333; color: #fff; }
    table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
    th, td { padding: 0.6rem; border-bottom: 1px solid #eee; text-align: left; }
    .stat-cards { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }
    .stat-card { background: #f6f8fa; border-radius: 8px; padding: 1rem; text-align: center; }
    .stat-value { font-size: 1.8rem; font-weight: 700; color: #667eea; }
    .chart-container { position: relative; height: 320px; margin-top: 1rem; }
    #toast-container { position: fixed; top: 1rem; right: 1rem; display: flex; flex-direction: column; gap: 0.5rem; }
    .toast { padding: 0.8rem 1rem; border-radius: 8px; background: #fff; box-shadow: 0 4px 12px rgba(0,0,0,0.15); }
    .toast.leaving { opacity: 0.4; }
"#;

/// Escape text for use in HTML bodies and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for the content of a single element.
pub fn render_content(content: &Content) -> String {
    match content {
        Content::Empty => String::new(),
        Content::Loading(text) => format!(r#"<div class="loading">{}</div>"#, escape(text)),
        Content::Status(status) => render_status(status),
        Content::Progress(percent) => format!(
            r#"<div class="progress"><div class="progress-fill" style="width: {}%"></div></div><div class="progress-text">{}%</div>"#,
            percent, percent
        ),
        Content::Banner(banner) => render_banner(banner),
        Content::Papers(table) => render_papers(table),
        Content::Stats(panel) => render_stats(panel),
        Content::Toasts(toasts) => toasts.iter().map(render_toast).collect(),
        // Charts are drawn by the page script onto their canvas
        Content::Chart(_) => String::new(),
    }
}

fn render_status(status: &StatusMessage) -> String {
    let headline = status
        .headline
        .as_deref()
        .map(|h| format!("<strong>{}</strong> ", escape(h)))
        .unwrap_or_default();
    format!(
        r#"<div class="status {}">{}{}</div>"#,
        status.severity.css_class(),
        headline,
        escape(&status.text)
    )
}

fn render_banner(banner: &CacheBanner) -> String {
    let mut html = format!(
        r#"<div class="cache-indicator {}"><strong>{}</strong> <span class="badge">{}</span> <span class="elapsed">{} ms</span><p>{}</p><p>Status: {} | Source: {}"#,
        banner.css_class(),
        banner.headline(),
        banner.badge(),
        escape(&banner.elapsed_ms),
        banner.description(),
        escape(&banner.cache_status),
        escape(&banner.source),
    );
    if !banner.cache_key.is_empty() {
        let _ = write!(html, " | Key: <code>{}</code>", escape(&banner.cache_key));
    }
    html.push_str("</p>");
    if let Some(hint) = banner.ttl_hint() {
        let _ = write!(html, "<p><em>{}</em></p>", escape(&hint));
    }
    html.push_str("</div>");
    html
}

fn render_papers(table: &PapersTable) -> String {
    let mut html = String::from(
        "<table><thead><tr><th>Rank</th><th>Title</th><th>Topic</th><th>Year</th><th>Citations</th><th>Growth Rate</th></tr></thead><tbody>",
    );
    for row in &table.rows {
        let _ = write!(
            html,
            "<tr><td>#{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.rank,
            escape(&row.title),
            escape(&row.topic),
            row.year,
            row.citations_display(),
            row.growth_display(),
        );
    }
    let _ = write!(
        html,
        r#"</tbody></table><p class="footer">{}</p>"#,
        escape(&table.footer())
    );
    html
}

fn render_stats(panel: &StatsPanel) -> String {
    let mut html = String::from(r#"<div class="stat-cards">"#);
    for card in &panel.cards {
        let _ = write!(
            html,
            r#"<div class="stat-card"><div class="stat-icon">{}</div><div class="stat-value">{}</div><div class="stat-label">{}</div></div>"#,
            card.icon,
            escape(&card.value),
            card.label
        );
    }
    html.push_str("</div>");

    if panel.has_topic_section() {
        html.push_str("<h3>Topic Distribution</h3><table><thead><tr><th>Topic</th><th>Papers</th><th>Share</th></tr></thead><tbody>");
        for row in &panel.topic_distribution {
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&row.topic),
                crate::utils::format_thousands(row.count),
                row.percentage_display()
            );
        }
        let _ = write!(
            html,
            r#"</tbody></table><div class="chart-container"><canvas id="{}"></canvas></div>"#,
            ElementId::TopicChart.html_id()
        );
    }

    if panel.has_citations_section() {
        html.push_str("<h3>Most Cited Topics</h3><table><thead><tr><th>Topic</th><th>Citations</th></tr></thead><tbody>");
        for row in &panel.most_cited {
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(&row.topic),
                crate::utils::format_thousands(row.citation_count)
            );
        }
        let _ = write!(
            html,
            r#"</tbody></table><div class="chart-container"><canvas id="{}"></canvas></div>"#,
            ElementId::CitationsChart.html_id()
        );
    }

    if panel.has_year_section() {
        html.push_str("<h3>Papers by Year</h3><table><thead><tr><th>Year</th><th>Papers</th></tr></thead><tbody>");
        for row in &panel.years {
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td></tr>",
                row.year,
                crate::utils::format_thousands(row.count)
            );
        }
        html.push_str("</tbody></table>");
    }
    html
}

fn render_toast(toast: &Toast) -> String {
    format!(
        r#"<div class="toast {}{}" data-id="{}">{}</div>"#,
        toast.severity.css_class(),
        if toast.leaving { " leaving" } else { "" },
        toast.id,
        escape(&toast.message)
    )
}

/// `class` attribute suffixes derived from element flags.
fn state_classes(element: &Element) -> String {
    let mut classes = String::new();
    if element.active {
        classes.push_str(" active");
    }
    if !element.visible {
        classes.push_str(" hidden");
    }
    classes
}

fn element_div(dom: &dyn Dom, id: ElementId, class: &str) -> String {
    let element = dom.element(id).unwrap_or_else(Element::hidden);
    format!(
        r#"<div id="{}" class="{}{}">{}</div>"#,
        id.html_id(),
        class,
        state_classes(&element),
        render_content(&element.content)
    )
}

/// JSON for a `<script>` block; `</` must not close the tag early.
fn chart_script(id: ElementId, spec: &ChartSpec) -> serde_json::Result<String> {
    let config = spec.to_json()?.replace("</", "<\\/");
    let mut script = format!(
        "  (function() {{\n    const canvas = document.getElementById('{}');\n    if (!canvas) return;\n    const config = {};\n",
        id.html_id(),
        config
    );
    if spec.y_tick_format() == TickFormat::Thousands {
        script.push_str(
            "    config.options.scales.y.ticks.callback = (value) => value.toLocaleString('en-US');\n",
        );
    }
    script.push_str("    new Chart(canvas, config);\n  })();\n");
    Ok(script)
}

/// Render the whole dashboard page as it currently stands.
pub fn render_page(dom: &dyn Dom, generated_at: DateTime<Utc>) -> serde_json::Result<String> {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Citation Analytics Dashboard</title>
  <script src="{}"></script>
  <style>{}</style>
</head>
<body>
<div class="container">
  <header>
    <h1>Citation Analytics Dashboard</h1>
    <p>Redis-cached research paper analytics</p>
    <p class="generated">Snapshot taken {}</p>
  </header>
"#,
        CHART_JS_CDN,
        STYLE,
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    html.push_str(r#"  <nav class="tabs">"#);
    for tab in Tab::ALL {
        let id = ElementId::TabButton(tab);
        let button = dom.element(id).unwrap_or_default();
        let _ = write!(
            html,
            r#"<button id="{}" class="tab-btn{}" data-tab="{}">{}</button>"#,
            id.html_id(),
            state_classes(&button),
            tab.id(),
            escape(button.label.as_deref().unwrap_or(tab.title()))
        );
    }
    html.push_str("</nav>\n");

    for tab in Tab::ALL {
        let panel_id = ElementId::TabPanel(tab);
        let panel = dom.element(panel_id).unwrap_or_else(Element::hidden);
        let _ = write!(
            html,
            r#"  <section id="{}" class="tab-content{}">"#,
            panel_id.html_id(),
            state_classes(&panel)
        );
        html.push_str(&render_panel_body(dom, tab));
        html.push_str("</section>\n");
    }

    let _ = writeln!(
        html,
        "  {}",
        element_div(dom, ElementId::ToastContainer, "toasts")
    );
    html.push_str("</div>\n<script>\n");
    for id in [ElementId::TopicChart, ElementId::CitationsChart] {
        if let Some(Content::Chart(spec)) = dom.content(id) {
            html.push_str(&chart_script(id, &spec)?);
        }
    }
    html.push_str("</script>\n</body>\n</html>\n");
    Ok(html)
}

fn render_panel_body(dom: &dyn Dom, tab: Tab) -> String {
    match tab {
        Tab::Generate => {
            let button = dom.element(ElementId::GenerateButton).unwrap_or_default();
            format!(
                r#"<h2>Generate Sample Data</h2><p>Creates synthetic papers and citations in the backend.</p><button id="{}"{}>{}</button>{}{}"#,
                ElementId::GenerateButton.html_id(),
                if button.enabled { "" } else { " disabled" },
                escape(button.label.as_deref().unwrap_or_default()),
                element_div(dom, ElementId::GenerateProgress, "progress-wrapper"),
                element_div(dom, ElementId::GenerateStatus, "status-wrapper"),
            )
        }
        Tab::TopPapers => {
            let selected = dom.value(ElementId::TopicSelect).unwrap_or_default();
            let limit = dom.value(ElementId::LimitInput).unwrap_or_default();
            let options: String = TOPICS
                .iter()
                .map(|topic| {
                    format!(
                        r#"<option value="{0}"{1}>{0}</option>"#,
                        escape(topic),
                        if *topic == selected { " selected" } else { "" }
                    )
                })
                .collect();
            format!(
                r#"<h2>Most Cited Papers</h2><div class="controls"><select id="{}">{}</select><input id="{}" type="number" min="1" max="100" value="{}" /></div>{}{}"#,
                ElementId::TopicSelect.html_id(),
                options,
                ElementId::LimitInput.html_id(),
                escape(&limit),
                element_div(dom, ElementId::CacheIndicator, "cache-wrapper"),
                element_div(dom, ElementId::TopPapersResult, "result"),
            )
        }
        Tab::Stats => format!(
            "<h2>Statistics</h2>{}",
            element_div(dom, ElementId::StatsResult, "result")
        ),
    }
}
