use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};

use crate::app::Notification;
use crate::nav::TransitionOverlay;

use super::layout::centered_rect;
use super::theme;

const RADAR_FRAMES: [&str; 4] = ["◴", "◷", "◶", "◵"];

pub fn draw_transition_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    overlay: &TransitionOverlay,
    now: Instant,
) {
    if !overlay.is_visible() || area.width == 0 || area.height == 0 {
        return;
    }

    let popup_width = area.width.min(52);
    let popup_height = area.height.min(8);
    let popup = centered_rect(area, popup_width, popup_height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" A.T.L.A.S ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let progress = overlay.progress(now);
    let radar = RADAR_FRAMES[((progress * 16.0) as usize) % RADAR_FRAMES.len()];
    let title = Line::from(vec![
        Span::styled(format!("{radar} "), Style::default().fg(theme::ACCENT)),
        Span::styled(
            overlay.title().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[0]);
    frame.render_widget(
        Paragraph::new(overlay.subtitle().to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme::MUTED)),
        chunks[1],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme::ACCENT).bg(Color::Black))
        .ratio(progress)
        .label(format!("SCANNING {:>3}%", (progress * 100.0).round() as u32));
    frame.render_widget(gauge, chunks[3]);
}

/// Toast in the top-right corner of `area`.
pub fn draw_notification(
    frame: &mut Frame<'_>,
    area: Rect,
    notification: &Notification,
    now: Instant,
) {
    if !notification.is_visible(now) || area.width < 4 || area.height < 3 {
        return;
    }

    let text = format!("✓ {}", notification.message);
    let width = (text.chars().count() as u16 + 4).min(area.width);
    let popup = Rect::new(area.right().saturating_sub(width), area.y, width, 3);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SUCCESS));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::White)),
        inner,
    );
}
