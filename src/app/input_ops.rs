use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::command::{Command, CommandOutcome};
use crate::error::AppResult;
use crate::event::{AppEvent, DomainEvent};
use crate::input::{map_key_to_command, map_mouse_to_command};
use crate::nav::TransitionRequest;
use crate::ui::split_layout;

use super::actors::UiActor;
use super::core::App;
use super::event_bus::spawn_transition_delay;
use super::terminal_session::TerminalSurface;

pub(crate) struct CommandDispatch {
    pub(crate) outcome: CommandOutcome,
    pub(crate) emitted_events: Vec<AppEvent>,
}

impl App {
    pub(crate) fn handle_input_event(
        &self,
        event: Event,
        session: &impl TerminalSurface,
        ui_actor: &mut UiActor,
    ) -> AppResult<Option<Command>> {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                Ok(map_key_to_command(key, self.shortcut_modifier))
            }
            Event::Mouse(mouse) => {
                let size = session.size()?;
                let layout = split_layout(
                    Rect::new(0, 0, size.width, size.height),
                    self.menu().is_expanded(),
                );
                Ok(map_mouse_to_command(
                    mouse,
                    layout.menu_rows,
                    self.menu().entries().len(),
                ))
            }
            Event::Resize(_, _) => {
                ui_actor.mark_redraw();
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    pub(crate) fn dispatch_command(
        &mut self,
        command: Command,
        tx: &UnboundedSender<DomainEvent>,
    ) -> CommandDispatch {
        let id = command.action_id();
        let mut emitted_events = Vec::new();

        let outcome = match command {
            Command::Shortcut { digit } => {
                let request = self
                    .controller
                    .menu()
                    .intent_for_shortcut(digit, self.controller.state());
                self.begin_transition(request, tx, &mut emitted_events)
            }
            Command::ActivateEntry { index } => {
                let request = self
                    .controller
                    .menu()
                    .intent_for_entry(index, self.controller.state());
                self.begin_transition(request, tx, &mut emitted_events)
            }
            Command::ActivateSelected => {
                let menu = self.controller.menu();
                let request = menu.intent_for_entry(menu.selected(), self.controller.state());
                self.begin_transition(request, tx, &mut emitted_events)
            }
            Command::SelectNext => {
                self.controller.menu_mut().select_next();
                CommandOutcome::Applied
            }
            Command::SelectPrev => {
                self.controller.menu_mut().select_prev();
                CommandOutcome::Applied
            }
            Command::ToggleMenu => {
                self.controller.menu_mut().toggle_expanded();
                CommandOutcome::Applied
            }
            Command::Scroll { dy } => {
                if self.host.scroll_by(dy) {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::Noop
                }
            }
            Command::Quit => CommandOutcome::QuitRequested,
        };

        emitted_events.insert(0, AppEvent::CommandExecuted { id, outcome });
        CommandDispatch {
            outcome,
            emitted_events,
        }
    }

    fn begin_transition(
        &mut self,
        request: Option<TransitionRequest>,
        tx: &UnboundedSender<DomainEvent>,
        emitted_events: &mut Vec<AppEvent>,
    ) -> CommandOutcome {
        let Some(request) = request else {
            debug!("navigation intent dropped: transition in progress");
            return CommandOutcome::Noop;
        };

        match self.controller.request(request, &mut self.host) {
            Ok(pending) => {
                spawn_transition_delay(tx.clone(), pending.generation, pending.delay);
                emitted_events.push(AppEvent::TransitionStarted {
                    generation: pending.generation,
                    to: pending.target.id,
                });
                CommandOutcome::Applied
            }
            Err(rejection) => {
                emitted_events.push(AppEvent::TransitionRejected(rejection));
                CommandOutcome::Noop
            }
        }
    }
}
