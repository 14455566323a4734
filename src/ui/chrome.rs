use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::StatusState;
use crate::nav::{NavigationMode, TransitionPhase};

use super::theme;

pub struct ChromeView<'a> {
    pub page_label: &'a str,
    pub mode: NavigationMode,
    pub phase: TransitionPhase,
    pub status: &'a StatusState,
    pub shortcut_modifier: &'a str,
}

pub fn draw_chrome(frame: &mut Frame<'_>, area: Rect, view: ChromeView<'_>) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mode = match view.mode {
        NavigationMode::Full => "full",
        NavigationMode::InPlace => "in-place",
    };
    let phase_style = if view.phase == TransitionPhase::Idle {
        Style::default().fg(theme::MUTED)
    } else {
        Style::default()
            .fg(theme::WARNING)
            .add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::styled(
            " A.T.L.A.S ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("| {} | {mode} | ", view.page_label)),
        Span::styled(view.phase.as_str(), phase_style),
    ];
    if !view.status.message.is_empty() {
        spans.push(Span::raw(format!(" | {}", view.status.message)));
    }
    if let Some(id) = view.status.last_action_id {
        spans.push(Span::styled(
            format!(" [{}]", id.as_str()),
            Style::default().fg(theme::MUTED),
        ));
    }
    spans.push(Span::styled(
        format!(
            " | {}+1..9 jump  Enter open  Tab menu  q quit",
            view.shortcut_modifier
        ),
        Style::default().fg(theme::MUTED),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
