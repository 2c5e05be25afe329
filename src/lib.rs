// Citation Dashboard - terminal and HTML client for a citation analytics backend

pub mod api;
pub mod components;
pub mod config;
pub mod dom;
pub mod render;
pub mod scheduler;
pub mod tui; // Terminal User Interface
pub mod types;
pub mod utils;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use api::{DashboardApi, HttpApi};
pub use components::Dashboard;
pub use config::Config;
