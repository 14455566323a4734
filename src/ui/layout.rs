use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

pub(crate) const MENU_WIDTH_EXPANDED: u16 = 28;
pub(crate) const MENU_WIDTH_COLLAPSED: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub content: Rect,
    pub menu: Rect,
    /// One row per menu entry, inside the menu border.
    pub menu_rows: Rect,
    pub status: Rect,
}

pub fn split_layout(area: Rect, menu_expanded: bool) -> UiLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let menu_width = if menu_expanded {
        MENU_WIDTH_EXPANDED
    } else {
        MENU_WIDTH_COLLAPSED
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(menu_width)])
        .split(rows[0]);

    let menu = columns[1];
    UiLayout {
        content: columns[0],
        menu,
        menu_rows: menu_block().inner(menu),
        status: rows[1],
    }
}

pub(crate) fn menu_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{MENU_WIDTH_COLLAPSED, MENU_WIDTH_EXPANDED, split_layout};

    #[test]
    fn split_layout_reserves_status_bar_and_menu_column() {
        let area = Rect::new(0, 0, 120, 40);

        let layout = split_layout(area, true);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.content.height, 39);
        assert_eq!(layout.menu.width, MENU_WIDTH_EXPANDED);
        assert_eq!(layout.content.width, 120 - MENU_WIDTH_EXPANDED);
        assert_eq!(layout.menu_rows.x, layout.menu.x + 1);
        assert_eq!(layout.menu_rows.y, 1);
    }

    #[test]
    fn collapsed_menu_leaves_room_for_icons() {
        let layout = split_layout(Rect::new(0, 0, 80, 24), false);
        assert_eq!(layout.menu.width, MENU_WIDTH_COLLAPSED);
        assert_eq!(layout.menu_rows.width, MENU_WIDTH_COLLAPSED - 2);
    }

    #[test]
    fn centered_rect_stays_within_area() {
        let area = Rect::new(10, 5, 20, 8);
        let centered = super::centered_rect(area, 99, 99);
        assert_eq!(centered.x, 10);
        assert_eq!(centered.y, 5);
        assert_eq!(centered.width, 20);
        assert_eq!(centered.height, 8);
    }
}
