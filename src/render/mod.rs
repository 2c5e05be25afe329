//! Static Rendering
//!
//! Turns the state of a [`crate::dom::Dom`] into a standalone HTML page with
//! the charts embedded as Chart.js configurations.

pub mod html;
pub mod snapshot;

pub use html::{escape, render_content, render_page};
pub use snapshot::{capture, write_snapshot, SnapshotQuery};
