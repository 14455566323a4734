use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::nav::{MenuEntry, NavigationMenu};

use super::layout::{UiLayout, menu_block};
use super::theme;

pub fn draw_menu(frame: &mut Frame<'_>, layout: UiLayout, menu: &NavigationMenu, modifier: &str) {
    if layout.menu.width == 0 || layout.menu.height == 0 {
        return;
    }

    let block = menu_block()
        .title(if menu.is_expanded() { " NAV " } else { "" })
        .border_style(Style::default().fg(theme::ACCENT_DIM));
    frame.render_widget(block, layout.menu);

    let rows = layout.menu_rows;
    let lines = menu
        .entries()
        .iter()
        .enumerate()
        .take(rows.height as usize)
        .map(|(index, entry)| {
            let selected = index == menu.selected();
            if menu.is_expanded() {
                entry_line(entry, selected, modifier, rows.width as usize)
            } else {
                icon_line(entry, selected)
            }
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), rows);
}

fn entry_style(entry: &MenuEntry, selected: bool) -> Style {
    let mut style = if entry.loading {
        Style::default()
            .fg(theme::WARNING)
            .add_modifier(Modifier::SLOW_BLINK)
    } else if entry.active {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    if selected {
        style = style.bg(theme::SELECTION);
    }
    style
}

fn entry_line(entry: &MenuEntry, selected: bool, modifier: &str, width: usize) -> Line<'static> {
    let style = entry_style(entry, selected);
    let marker = if entry.active { "▌" } else { " " };
    let hint = entry
        .shortcut
        .map(|digit| format!(" {modifier}+{digit}"))
        .unwrap_or_default();
    let suffix = if entry.loading { " …" } else { "" };

    let head_budget = width.saturating_sub(hint.width());
    let head = truncate_to_width(
        &format!("{marker}{} {}{suffix}", entry.icon, entry.label),
        head_budget,
    );
    let padding = width.saturating_sub(head.width() + hint.width());

    Line::from(vec![
        Span::styled(head, style),
        Span::styled(" ".repeat(padding), style),
        Span::styled(hint, style.fg(Color::DarkGray)),
    ])
}

fn icon_line(entry: &MenuEntry, selected: bool) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", entry.icon),
        entry_style(entry, selected),
    ))
}

/// Cuts `text` to at most `max` terminal columns; emoji count as two.
pub(crate) fn truncate_to_width(text: &str, max: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::nav::{NavigationMenu, NavigationState};
    use crate::registry::PageRegistry;
    use crate::ui::split_layout;

    use super::{draw_menu, truncate_to_width};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn truncate_counts_wide_glyphs() {
        assert_eq!(truncate_to_width("🏠 Home", 4), "🏠 H");
        assert_eq!(truncate_to_width("🏠 Home", 1), "");
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn expanded_menu_lists_labels_and_shortcuts() {
        let registry = PageRegistry::builtin();
        let state = NavigationState::new("index.html");
        let menu = NavigationMenu::render(&registry, &state);

        let mut terminal =
            Terminal::new(TestBackend::new(60, 8)).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                let layout = split_layout(frame.area(), menu.is_expanded());
                draw_menu(frame, layout, &menu, "Alt");
            })
            .expect("draw should pass");

        let text = buffer_text(&terminal);
        assert!(text.contains("Home"));
        assert!(text.contains("Gallery"));
        assert!(text.contains("Alt+3"));
    }
}
