use std::time::{Duration, Instant};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::command::{ActionId, CommandOutcome};
use crate::error::AppResult;
use crate::event::{AppEvent, DomainEvent};
use crate::nav::{Environment, NavigationStep};

use super::actors::UiActor;
use super::core::App;
use super::event_bus::{EventBusRuntime, spawn_markup_fetch};
use super::state::Notification;
use super::terminal_session::{TerminalSession, TerminalSurface};

struct LoopRuntime {
    ui_actor: UiActor,
    session: TerminalSession,
    redraw_tick: time::Interval,
    telemetry_tick: time::Interval,
    loop_event_tx: UnboundedSender<DomainEvent>,
    loop_event_rx: UnboundedReceiver<DomainEvent>,
    loop_event_runtime: EventBusRuntime,
}

enum WaitEvent {
    Event(DomainEvent),
    Closed,
}

pub(crate) enum LoopControl {
    Continue,
    Break,
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut runtime = self.initialize_loop_runtime()?;

        let result = loop {
            if runtime.ui_actor.needs_redraw() {
                if let Err(err) = self.render_frame(&mut runtime.session, Instant::now()) {
                    break Err(err);
                }
                runtime.ui_actor.clear_redraw();
            }

            let event = match wait_next_event(
                &mut runtime.loop_event_rx,
                &mut runtime.redraw_tick,
                &mut runtime.telemetry_tick,
            )
            .await
            {
                WaitEvent::Event(event) => event,
                WaitEvent::Closed => break Ok(()),
            };
            match self.handle_domain_event(
                event,
                &runtime.loop_event_tx,
                &mut runtime.session,
                &mut runtime.ui_actor,
            ) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Break) => break Ok(()),
                Err(err) => break Err(err),
            }
        };

        runtime.loop_event_runtime.shutdown();
        runtime.session.restore()?;
        info!("terminal session closed");
        result
    }

    fn initialize_loop_runtime(&mut self) -> AppResult<LoopRuntime> {
        let session = TerminalSession::enter()?;
        let (loop_event_tx, loop_event_rx, loop_event_runtime) = EventBusRuntime::spawn();

        let ui = &self.config.ui;
        let mut redraw_tick = time::interval(Duration::from_millis(ui.redraw_interval_ms));
        redraw_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut telemetry_tick = time::interval(Duration::from_millis(ui.telemetry_tick_ms));
        telemetry_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.notification = Some(Notification::system_online(
            Instant::now(),
            Duration::from_millis(ui.notification_delay_ms),
            Duration::from_millis(ui.notification_duration_ms),
        ));

        self.host.attach_loader(loop_event_tx.clone());
        let initial = self.host.location().to_string();
        self.host.navigate(&initial);
        info!(
            page = %initial,
            location = %self.host.source().location_of(&initial),
            "terminal session started"
        );

        Ok(LoopRuntime {
            ui_actor: UiActor::new(),
            session,
            redraw_tick,
            telemetry_tick,
            loop_event_tx,
            loop_event_rx,
            loop_event_runtime,
        })
    }

    pub(crate) fn handle_domain_event(
        &mut self,
        event: DomainEvent,
        tx: &UnboundedSender<DomainEvent>,
        session: &mut impl TerminalSurface,
        ui_actor: &mut UiActor,
    ) -> AppResult<LoopControl> {
        match event {
            DomainEvent::Input(event) => {
                let Some(command) = self.handle_input_event(event, session, ui_actor)? else {
                    return Ok(LoopControl::Continue);
                };
                let dispatch = self.dispatch_command(command, tx);
                for event in dispatch.emitted_events {
                    let _ = tx.send(DomainEvent::App(event));
                }
                match dispatch.outcome {
                    CommandOutcome::QuitRequested => return Ok(LoopControl::Break),
                    CommandOutcome::Applied => ui_actor.mark_redraw(),
                    CommandOutcome::Noop => {}
                }
            }
            DomainEvent::InputError(message) => {
                self.status.last_action_id = Some(ActionId::Input);
                self.status.message = format!("input error: {message}");
                ui_actor.mark_redraw();
            }
            DomainEvent::App(event) => {
                if self.handle_app_event(&event) {
                    ui_actor.mark_redraw();
                }
            }
            DomainEvent::TransitionDelayElapsed { generation } => {
                self.advance_transition(generation, tx);
                ui_actor.mark_redraw();
            }
            DomainEvent::MarkupFetched { generation, result } => {
                if self.controller.active_generation() != Some(generation) {
                    debug!(generation, "dropping markup for a settled transition");
                    return Ok(LoopControl::Continue);
                }
                self.controller.settle_fetch(&mut self.host, result);
                self.finish_transition(tx);
                ui_actor.mark_redraw();
            }
            DomainEvent::DocumentLoaded { page_id, result } => {
                if self.host.apply_loaded(&page_id, result) {
                    self.status.last_action_id = Some(ActionId::DocumentLoad);
                    ui_actor.mark_redraw();
                }
            }
            DomainEvent::TelemetryTick => {
                if self.host.telemetry_mut().tick(&mut self.rng) {
                    ui_actor.mark_redraw();
                }
            }
            DomainEvent::RedrawTick => {
                let now = Instant::now();
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|toast| toast.is_expired(now))
                {
                    self.notification = None;
                }
                ui_actor.on_redraw_tick(
                    self.controller.overlay().is_visible(),
                    self.notification_visible(now),
                );
            }
        }
        Ok(LoopControl::Continue)
    }

    fn advance_transition(&mut self, generation: u64, tx: &UnboundedSender<DomainEvent>) {
        match self.controller.enter_navigating(generation) {
            Some(NavigationStep::Navigate(_)) => {
                self.controller.navigate_full(&mut self.host);
                self.finish_transition(tx);
            }
            Some(NavigationStep::Fetch(page_id)) => {
                spawn_markup_fetch(tx.clone(), self.host.markup_request(&page_id), generation);
            }
            None => debug!(generation, "dropping stale transition timer"),
        }
    }

    fn finish_transition(&mut self, tx: &UnboundedSender<DomainEvent>) {
        if let Some(report) = self.controller.complete(&mut self.host) {
            let _ = tx.send(DomainEvent::App(AppEvent::PageChanged {
                from: report.from,
                to: report.to,
                method: report.method,
            }));
        }
    }

    /// Returns whether the status bar changed.
    fn handle_app_event(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::CommandExecuted { id, outcome } => {
                if *outcome != CommandOutcome::Noop {
                    self.status.last_action_id = Some(*id);
                }
                false
            }
            AppEvent::TransitionStarted { to, .. } => {
                self.status.last_action_id = Some(ActionId::Transition);
                let name = self
                    .controller
                    .registry()
                    .lookup(to)
                    .map(|page| page.display_name.as_str())
                    .unwrap_or(to.as_str());
                self.status.message = format!("opening {name}");
                true
            }
            AppEvent::TransitionRejected(rejection) => {
                debug!(reason = rejection.reason(), "navigation request ignored");
                false
            }
            AppEvent::PageChanged { to, method, .. } => {
                self.status.last_action_id = Some(ActionId::Transition);
                self.status.message = format!("{to} ({})", method.as_str());
                true
            }
        }
    }
}

async fn wait_next_event(
    loop_event_rx: &mut UnboundedReceiver<DomainEvent>,
    redraw_tick: &mut time::Interval,
    telemetry_tick: &mut time::Interval,
) -> WaitEvent {
    tokio::select! {
        biased;
        maybe_loop = loop_event_rx.recv() => {
            match maybe_loop {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            }
        },
        _ = redraw_tick.tick() => {
            WaitEvent::Event(DomainEvent::RedrawTick)
        },
        _ = telemetry_tick.tick() => {
            WaitEvent::Event(DomainEvent::TelemetryTick)
        },
    }
}
