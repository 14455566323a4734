use crossterm::event::Event;

use crate::command::{ActionId, CommandOutcome};
use crate::error::AppResult;
use crate::nav::{PageChangeMethod, Rejection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    CommandExecuted {
        id: ActionId,
        outcome: CommandOutcome,
    },
    TransitionStarted {
        generation: u64,
        to: String,
    },
    TransitionRejected(Rejection),
    PageChanged {
        from: String,
        to: String,
        method: PageChangeMethod,
    },
}

#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    App(AppEvent),
    /// The randomized wait for `generation` elapsed.
    TransitionDelayElapsed {
        generation: u64,
    },
    MarkupFetched {
        generation: u64,
        result: AppResult<String>,
    },
    DocumentLoaded {
        page_id: String,
        result: AppResult<String>,
    },
    TelemetryTick,
    RedrawTick,
}
