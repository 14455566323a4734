use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::site::{Document, LineKind};
use crate::telemetry::{
    ConfidenceBand, PROTOCOL_STEPS, StepState, TelemetrySnapshot, confidence_band,
};

use super::theme;

const TELEMETRY_PANEL_HEIGHT: u16 = 13;
const CONFIDENCE_BAR_WIDTH: usize = 10;

pub struct ContentView<'a> {
    pub document: &'a Document,
    pub scroll: u16,
    pub telemetry: Option<&'a TelemetrySnapshot>,
    /// Dims the page while a transition or page load is in flight.
    pub dimmed: bool,
}

pub fn draw_content(frame: &mut Frame<'_>, area: Rect, view: ContentView<'_>) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let (document_area, telemetry_area) = match view.telemetry {
        Some(_) if area.height > TELEMETRY_PANEL_HEIGHT + 3 => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(3),
                    Constraint::Length(TELEMETRY_PANEL_HEIGHT),
                ])
                .split(area);
            (chunks[0], Some(chunks[1]))
        }
        _ => (area, None),
    };

    let base = if view.dimmed {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(format!(" {} ", view.document.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT_DIM));
    let lines = view
        .document
        .lines
        .iter()
        .map(|line| match line.kind {
            LineKind::Heading => Line::from(Span::styled(
                line.text.clone(),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            LineKind::Bullet => Line::from(vec![
                Span::styled("  • ", Style::default().fg(theme::ACCENT)),
                Span::raw(line.text.clone()),
            ]),
            LineKind::Text => Line::from(line.text.clone()),
        })
        .collect::<Vec<_>>();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(base)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    frame.render_widget(paragraph, document_area);

    if let (Some(snapshot), Some(panel)) = (view.telemetry, telemetry_area) {
        draw_telemetry_panel(frame, panel, snapshot, base);
    }
}

fn draw_telemetry_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &TelemetrySnapshot,
    base: Style,
) {
    let block = Block::default()
        .title(" LIVE SIMULATION ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT_DIM));
    let label = Style::default().fg(theme::MUTED);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("● ACTIVE  ", Style::default().fg(theme::SUCCESS)),
            Span::styled("FPS ", label),
            Span::raw(format!("{:<4}", snapshot.fps)),
            Span::styled("Targets ", label),
            Span::raw(format!("{:<4}", snapshot.targets)),
            Span::styled("Range ", label),
            Span::raw(format!("{:.1}m", snapshot.range_m)),
        ]),
        confidence_line(snapshot.confidence),
        Line::from(vec![
            Span::styled("Latency ", label),
            Span::raw(format!("{:.0}ms  ", snapshot.latency_ms)),
            Span::styled("Range ", label),
            Span::raw(format!("{:.1}m  ", snapshot.telemetry_range_m)),
            Span::styled("Servo ", label),
            Span::raw(format!("{}  ", snapshot.servo_label())),
            Span::styled("Power ", label),
            Span::raw(format!("{:.1}W", snapshot.power_w)),
        ]),
        Line::from(Span::styled("Engagement protocol", label)),
    ];
    lines.extend(PROTOCOL_STEPS.iter().enumerate().map(|(index, step)| {
        let (mark, style) = match snapshot.step_state(index) {
            StepState::Completed => ("✓", Style::default().fg(theme::SUCCESS)),
            StepState::Active => (
                "▶",
                Style::default()
                    .fg(theme::WARNING)
                    .add_modifier(Modifier::BOLD),
            ),
            StepState::Pending => ("·", Style::default().fg(theme::MUTED)),
        };
        Line::from(Span::styled(format!("  {mark} {step}"), style))
    }));

    frame.render_widget(Paragraph::new(lines).block(block).style(base), area);
}

fn confidence_line(confidence: [u8; 2]) -> Line<'static> {
    let mut spans = vec![Span::styled("Confidence ", Style::default().fg(theme::MUTED))];
    for (index, value) in confidence.into_iter().enumerate() {
        let color = match confidence_band(value) {
            ConfidenceBand::High => theme::SUCCESS,
            ConfidenceBand::Medium => theme::WARNING,
            ConfidenceBand::Low => Color::Red,
        };
        spans.push(Span::raw(format!("T{} ", index + 1)));
        spans.push(Span::styled(
            confidence_bar(value, CONFIDENCE_BAR_WIDTH),
            Style::default().fg(color),
        ));
        spans.push(Span::raw(format!(" {value:>2}%  ")));
    }
    Line::from(spans)
}

fn confidence_bar(value: u8, width: usize) -> String {
    let filled = (usize::from(value.min(100)) * width).div_ceil(100);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
