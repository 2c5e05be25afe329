//! TUI Widgets
//!
//! Renderers for the view models the components place on the page.

mod charts;
mod papers;
mod progress;
mod stats;
mod toasts;

pub use charts::{render_bar_chart, render_doughnut};
pub use papers::{render_banner, render_papers};
pub use progress::{render_message, render_progress, status_line};
pub use stats::{render_cards, render_cited_table, render_topic_table, render_year_table};
pub use toasts::render_toasts;
