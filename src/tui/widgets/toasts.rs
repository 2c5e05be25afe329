use crate::tui::theme::{Icons, Theme};
use crate::utils::truncate_string;
use crate::view::Toast;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

/// Stack toasts in the top right corner, oldest on top.
pub fn render_toasts(frame: &mut Frame, area: Rect, toasts: &[Toast]) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);

    for (i, toast) in toasts.iter().enumerate() {
        let y = area.y + 1 + i as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);

        let mut style = Theme::severity(toast.severity);
        if toast.leaving {
            style = style.add_modifier(Modifier::DIM);
        }
        let text = truncate_string(&toast.message, width.saturating_sub(6) as usize);
        let line = Line::from(vec![
            Span::styled(format!("{} ", Icons::severity(toast.severity)), style),
            Span::styled(text, style),
        ]);

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).border_style(style)),
            rect,
        );
    }
}
