use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::error::AppResult;
use crate::input::ShortcutModifier;
use crate::nav::{NavigationMenu, NavigationState, TransitionController};
use crate::site::SiteSource;

use super::host::DocumentHost;
use super::state::{Notification, StatusState};

pub struct App {
    pub controller: TransitionController,
    pub host: DocumentHost,
    pub status: StatusState,
    pub notification: Option<Notification>,
    pub config: Config,
    pub(crate) shortcut_modifier: ShortcutModifier,
    pub(crate) rng: StdRng,
}

impl App {
    pub fn new(location: &str) -> AppResult<Self> {
        let config = Config::load()?;
        Self::new_with_config(config, location)
    }

    /// `location` is the path the terminal was opened at; its basename picks the page.
    pub fn new_with_config(config: Config, location: &str) -> AppResult<Self> {
        let registry = config.registry()?;
        let state = NavigationState::from_location(location, &registry);
        let source = match config.site.base_url.as_deref() {
            Some(base_url) => SiteSource::http(base_url)?,
            None => SiteSource::directory(&config.site.root),
        };
        let host = DocumentHost::new(
            source,
            registry.default_id(),
            state.current_page_id.clone(),
        );
        let controller =
            TransitionController::new(registry, state, config.transition_settings());

        Ok(Self {
            controller,
            host,
            status: StatusState::default(),
            notification: None,
            shortcut_modifier: ShortcutModifier::parse(&config.keymap.shortcut_modifier),
            rng: StdRng::from_entropy(),
            config,
        })
    }

    pub fn menu(&self) -> &NavigationMenu {
        self.controller.menu()
    }

    pub(crate) fn notification_visible(&self, now: Instant) -> bool {
        self.notification
            .as_ref()
            .is_some_and(|toast| toast.is_visible(now))
    }

    /// "🏠 Home", or the bare id when the location is not a registered page.
    pub(crate) fn page_label(&self) -> String {
        match self.controller.current_descriptor() {
            Some(page) => format!("{} {}", page.icon, page.display_name),
            None => self.controller.state().current_page_id.clone(),
        }
    }
}
