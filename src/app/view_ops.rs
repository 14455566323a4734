use std::time::Instant;

use crate::error::AppResult;
use crate::ui::{self, ChromeView, ContentView};

use super::core::App;
use super::terminal_session::TerminalSurface;

impl App {
    pub(super) fn render_frame(
        &self,
        session: &mut impl TerminalSurface,
        now: Instant,
    ) -> AppResult<()> {
        let page_label = self.page_label();
        let telemetry = self.host.telemetry();
        let dimmed = self.controller.state().transition_in_progress || self.host.is_loading();

        session.draw(|frame| {
            let area = frame.area();
            let layout = ui::split_layout(area, self.menu().is_expanded());

            ui::draw_content(
                frame,
                layout.content,
                ContentView {
                    document: self.host.document(),
                    scroll: self.host.scroll(),
                    telemetry: telemetry.is_running().then(|| telemetry.snapshot()),
                    dimmed,
                },
            );
            ui::draw_menu(frame, layout, self.menu(), self.shortcut_modifier.label());
            ui::draw_chrome(
                frame,
                layout.status,
                ChromeView {
                    page_label: &page_label,
                    mode: self.controller.settings().mode,
                    phase: self.controller.phase(),
                    status: &self.status,
                    shortcut_modifier: self.shortcut_modifier.label(),
                },
            );
            ui::draw_transition_overlay(frame, area, self.controller.overlay(), now);
            if let Some(notification) = &self.notification {
                ui::draw_notification(frame, layout.content, notification, now);
            }
        })?;
        Ok(())
    }
}
