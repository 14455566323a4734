use std::future::Future;
use std::time::Duration;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::event::DomainEvent;
use crate::error::AppResult;

pub(crate) struct EventBusRuntime {
    tasks: Vec<JoinHandle<()>>,
}

impl EventBusRuntime {
    pub(crate) fn spawn() -> (
        UnboundedSender<DomainEvent>,
        UnboundedReceiver<DomainEvent>,
        Self,
    ) {
        let (tx, rx) = unbounded_channel();
        let tasks = vec![spawn_input_task(tx.clone())];
        (tx, rx, Self { tasks })
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

fn spawn_input_task(tx: UnboundedSender<DomainEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let loop_event = match event {
                Ok(event) => DomainEvent::Input(event),
                Err(err) => DomainEvent::InputError(err.to_string()),
            };
            if tx.send(loop_event).is_err() {
                return;
            }
        }
    })
}

/// The randomized wait runs off the loop so input keeps flowing meanwhile.
pub(crate) fn spawn_transition_delay(
    tx: UnboundedSender<DomainEvent>,
    generation: u64,
    delay: Duration,
) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(DomainEvent::TransitionDelayElapsed { generation });
    });
}

pub(crate) fn spawn_markup_fetch(
    tx: UnboundedSender<DomainEvent>,
    fetch: impl Future<Output = AppResult<String>> + Send + 'static,
    generation: u64,
) {
    tokio::spawn(async move {
        let result = fetch.await;
        let _ = tx.send(DomainEvent::MarkupFetched { generation, result });
    });
}

pub(crate) fn spawn_document_load(
    tx: UnboundedSender<DomainEvent>,
    load: impl Future<Output = AppResult<String>> + Send + 'static,
    page_id: String,
) {
    tokio::spawn(async move {
        let result = load.await;
        let _ = tx.send(DomainEvent::DocumentLoaded { page_id, result });
    });
}
