use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::app::App;
use crate::command::{Command, CommandOutcome};
use crate::config::Config;
use crate::event::{AppEvent, DomainEvent};
use crate::nav::{NavigationMode, PageChangeMethod, TransitionPhase};

use super::super::actors::UiActor;
use super::super::event_loop::LoopControl;
use super::TestTerminalSurface;

const MAX_EVENTS: usize = 16;

fn unique_site_dir(suffix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("atlas_loop_{suffix}_{}_{}", process::id(), nanos));
    fs::create_dir_all(&path).expect("site dir should be created");
    fs::write(
        path.join("index.html"),
        "<title>A.T.L.A.S Home</title><body><h1>Home</h1></body>",
    )
    .expect("home page should be written");
    fs::write(
        path.join("gallery.html"),
        "<title>System Gallery</title><body><h1>Gallery</h1><li>Radar demo</li></body>",
    )
    .expect("gallery page should be written");
    path
}

struct Harness {
    app: App,
    tx: UnboundedSender<DomainEvent>,
    rx: UnboundedReceiver<DomainEvent>,
    session: TestTerminalSurface,
    ui_actor: UiActor,
    changes: Vec<(String, PageChangeMethod)>,
}

impl Harness {
    fn new(root: &Path, mode: NavigationMode) -> Self {
        let mut config = Config::default();
        config.site.root = root.to_path_buf();
        config.transition.mode = mode;
        config.transition.min_delay_ms = 50;
        config.transition.max_delay_ms = 80;

        let mut app = App::new_with_config(config, "index.html").expect("app init");
        let (tx, rx) = unbounded_channel();
        app.host.attach_loader(tx.clone());
        Self {
            app,
            tx,
            rx,
            session: TestTerminalSurface::new(100, 30).expect("test terminal should initialize"),
            ui_actor: UiActor::new(),
            changes: Vec::new(),
        }
    }

    fn dispatch(&mut self, command: Command) -> CommandOutcome {
        let dispatch = self.app.dispatch_command(command, &self.tx);
        for event in dispatch.emitted_events {
            self.tx
                .send(DomainEvent::App(event))
                .expect("loop channel should be open");
        }
        dispatch.outcome
    }

    /// Pumps loop events until the transition settles and no page load is pending.
    async fn settle(&mut self) {
        for _ in 0..MAX_EVENTS {
            let event = self.rx.recv().await.expect("loop channel should be open");
            if let DomainEvent::App(AppEvent::PageChanged { to, method, .. }) = &event {
                self.changes.push((to.clone(), *method));
            }
            let control = self
                .app
                .handle_domain_event(event, &self.tx, &mut self.session, &mut self.ui_actor)
                .expect("event should be handled");
            assert!(matches!(control, LoopControl::Continue));

            let idle = self.app.controller.phase() == TransitionPhase::Idle;
            if idle && !self.app.host.is_loading() && !self.changes.is_empty() {
                return;
            }
        }
        panic!("transition did not settle");
    }
}

#[tokio::test(start_paused = true)]
async fn in_place_shortcut_splices_target_content() {
    let root = unique_site_dir("in_place");
    let mut harness = Harness::new(&root, NavigationMode::InPlace);

    assert_eq!(
        harness.dispatch(Command::Shortcut { digit: 2 }),
        CommandOutcome::Applied
    );
    assert_eq!(harness.app.controller.phase(), TransitionPhase::OverlayShown);
    assert!(harness.app.controller.overlay().is_visible());
    assert_eq!(
        harness.app.controller.overlay().title(),
        "Loading System Gallery"
    );

    harness.settle().await;

    let app = &harness.app;
    assert_eq!(app.controller.state().current_page_id, "gallery.html");
    assert!(!app.controller.state().transition_in_progress);
    assert!(!app.controller.overlay().is_visible());
    assert_eq!(app.menu().active_id(), Some("gallery.html"));
    assert_eq!(app.host.document().title, "System Gallery");
    assert_eq!(
        harness.changes,
        vec![("gallery.html".to_string(), PageChangeMethod::InPlace)]
    );

    fs::remove_dir_all(&root).expect("site dir should be removed");
}

#[tokio::test(start_paused = true)]
async fn full_navigation_loads_the_new_document() {
    let root = unique_site_dir("full");
    let mut harness = Harness::new(&root, NavigationMode::Full);

    assert_eq!(
        harness.dispatch(Command::ActivateEntry { index: 1 }),
        CommandOutcome::Applied
    );
    harness.settle().await;

    let app = &harness.app;
    assert_eq!(app.controller.state().current_page_id, "gallery.html");
    assert_eq!(app.host.location(), "gallery.html");
    assert_eq!(app.host.document().title, "System Gallery");
    assert!(!app.host.telemetry().is_running());
    assert_eq!(
        harness.changes,
        vec![("gallery.html".to_string(), PageChangeMethod::Full)]
    );

    fs::remove_dir_all(&root).expect("site dir should be removed");
}

#[tokio::test(start_paused = true)]
async fn missing_page_falls_back_to_full_navigation() {
    let root = unique_site_dir("fallback");
    let mut harness = Harness::new(&root, NavigationMode::InPlace);

    assert_eq!(
        harness.dispatch(Command::Shortcut { digit: 3 }),
        CommandOutcome::Applied
    );
    harness.settle().await;

    let app = &harness.app;
    assert_eq!(app.controller.state().current_page_id, "documentation.html");
    assert_eq!(app.host.document().title, "documentation.html unavailable");
    assert_eq!(
        harness.changes,
        vec![("documentation.html".to_string(), PageChangeMethod::Fallback)]
    );

    fs::remove_dir_all(&root).expect("site dir should be removed");
}

#[tokio::test(start_paused = true)]
async fn requests_during_a_transition_are_dropped() {
    let root = unique_site_dir("busy");
    let mut harness = Harness::new(&root, NavigationMode::Full);

    assert_eq!(
        harness.dispatch(Command::Shortcut { digit: 2 }),
        CommandOutcome::Applied
    );
    assert_eq!(
        harness.dispatch(Command::Shortcut { digit: 3 }),
        CommandOutcome::Noop
    );
    assert_eq!(
        harness.dispatch(Command::ActivateEntry { index: 0 }),
        CommandOutcome::Noop
    );
    harness.settle().await;

    assert_eq!(
        harness.app.controller.state().current_page_id,
        "gallery.html"
    );
    assert_eq!(harness.changes.len(), 1);

    fs::remove_dir_all(&root).expect("site dir should be removed");
}

#[tokio::test(start_paused = true)]
async fn redundant_shortcut_changes_nothing() {
    let root = unique_site_dir("redundant");
    let mut harness = Harness::new(&root, NavigationMode::Full);

    assert_eq!(
        harness.dispatch(Command::Shortcut { digit: 1 }),
        CommandOutcome::Noop
    );
    assert_eq!(harness.app.controller.phase(), TransitionPhase::Idle);
    assert!(!harness.app.controller.overlay().is_visible());
    assert_eq!(harness.app.status.message, "");

    fs::remove_dir_all(&root).expect("site dir should be removed");
}

#[test]
fn quit_and_menu_commands_do_not_request_transitions() {
    let mut app = App::new_with_config(Config::default(), "index.html").expect("app init");
    let (tx, _rx) = unbounded_channel();

    assert_eq!(
        app.dispatch_command(Command::Quit, &tx).outcome,
        CommandOutcome::QuitRequested
    );
    app.dispatch_command(Command::SelectNext, &tx);
    assert_eq!(app.menu().selected(), 1);
    app.dispatch_command(Command::ToggleMenu, &tx);
    assert!(!app.menu().is_expanded());
    assert!(!app.controller.state().transition_in_progress);
}
