use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::registry::{PageDescriptor, PageRegistry};

use super::env::{Environment, PageChangeMethod, PageLifecycle};
use super::menu::NavigationMenu;
use super::overlay::TransitionOverlay;
use super::state::NavigationState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    pub target_page_id: String,
}

impl TransitionRequest {
    pub fn new(target_page_id: impl Into<String>) -> Self {
        Self {
            target_page_id: target_page_id.into(),
        }
    }
}

/// Why a request was not accepted. None of these are user-visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    UnknownTarget(String),
    RedundantTarget(String),
    Busy,
}

impl Rejection {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownTarget(_) => "unknown-target",
            Self::RedundantTarget(_) => "redundant-target",
            Self::Busy => "busy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Requested,
    OverlayShown,
    Navigating,
}

impl TransitionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Requested => "REQUESTED",
            Self::OverlayShown => "LOADING",
            Self::Navigating => "NAVIGATING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationMode {
    #[default]
    Full,
    InPlace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionSettings {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub mode: NavigationMode,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(1200),
            max_delay: Duration::from_millis(2200),
            mode: NavigationMode::Full,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransition {
    pub generation: u64,
    pub target: PageDescriptor,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationStep {
    Fetch(String),
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReport {
    pub generation: u64,
    pub from: String,
    pub to: String,
    pub method: PageChangeMethod,
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    generation: u64,
    from: String,
    target: PageDescriptor,
    method: Option<PageChangeMethod>,
}

/// Sequences `Idle -> Requested -> OverlayShown -> Navigating -> Idle`.
///
/// Single source of truth for "is a transition in progress": at most one
/// transition is in flight and requests arriving meanwhile are dropped.
pub struct TransitionController {
    registry: PageRegistry,
    state: NavigationState,
    phase: TransitionPhase,
    overlay: TransitionOverlay,
    menu: NavigationMenu,
    settings: TransitionSettings,
    rng: StdRng,
    generation: u64,
    active: Option<ActiveTransition>,
}

impl TransitionController {
    pub fn new(registry: PageRegistry, state: NavigationState, settings: TransitionSettings) -> Self {
        Self::with_rng(registry, state, settings, StdRng::from_entropy())
    }

    pub fn with_rng(
        registry: PageRegistry,
        state: NavigationState,
        settings: TransitionSettings,
        rng: StdRng,
    ) -> Self {
        let menu = NavigationMenu::render(&registry, &state);
        Self {
            registry,
            state,
            phase: TransitionPhase::Idle,
            overlay: TransitionOverlay::default(),
            menu,
            settings,
            rng,
            generation: 0,
            active: None,
        }
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn overlay(&self) -> &TransitionOverlay {
        &self.overlay
    }

    pub fn menu(&self) -> &NavigationMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut NavigationMenu {
        &mut self.menu
    }

    pub fn settings(&self) -> TransitionSettings {
        self.settings
    }

    pub fn current_descriptor(&self) -> Option<&PageDescriptor> {
        self.registry.lookup(&self.state.current_page_id)
    }

    /// Generation of the in-flight transition, if any.
    pub fn active_generation(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.generation)
    }

    /// Steps 1-3: guard, resolve, show overlay.
    pub fn request(
        &mut self,
        request: TransitionRequest,
        hooks: &mut impl PageLifecycle,
    ) -> Result<PendingTransition, Rejection> {
        let target_id = request.target_page_id;
        if target_id == self.state.current_page_id {
            debug!(page = %target_id, "transition rejected: already current");
            return Err(Rejection::RedundantTarget(target_id));
        }
        if self.state.transition_in_progress || self.phase != TransitionPhase::Idle {
            debug!(page = %target_id, "transition rejected: busy");
            return Err(Rejection::Busy);
        }

        self.state.transition_in_progress = true;
        self.phase = TransitionPhase::Requested;

        let Some(target) = self.registry.lookup(&target_id).cloned() else {
            self.state.transition_in_progress = false;
            self.phase = TransitionPhase::Idle;
            debug!(page = %target_id, "transition rejected: unknown page");
            return Err(Rejection::UnknownTarget(target_id));
        };

        self.generation = self.generation.saturating_add(1);
        let delay = self.draw_delay();
        self.overlay.set_expected(delay);
        self.overlay.show(&target);
        self.menu.mark_loading(&target.id);
        self.phase = TransitionPhase::OverlayShown;
        hooks.on_transition_start(&target);

        info!(
            generation = self.generation,
            from = %self.state.current_page_id,
            to = %target.id,
            delay_ms = delay.as_millis() as u64,
            "transition accepted"
        );
        self.active = Some(ActiveTransition {
            generation: self.generation,
            from: self.state.current_page_id.clone(),
            target: target.clone(),
            method: None,
        });

        Ok(PendingTransition {
            generation: self.generation,
            target,
            delay,
        })
    }

    /// Step 4 -> 5: the wait for `generation` elapsed.
    pub fn enter_navigating(&mut self, generation: u64) -> Option<NavigationStep> {
        let active = self.active.as_ref()?;
        if active.generation != generation || self.phase != TransitionPhase::OverlayShown {
            return None;
        }
        let id = active.target.id.clone();
        self.phase = TransitionPhase::Navigating;
        Some(match self.settings.mode {
            NavigationMode::Full => NavigationStep::Navigate(id),
            NavigationMode::InPlace => NavigationStep::Fetch(id),
        })
    }

    pub fn navigate_full(&mut self, env: &mut impl Environment) -> Option<PageChangeMethod> {
        let active = self.navigating_mut()?;
        let id = active.target.id.clone();
        active.method = Some(PageChangeMethod::Full);
        env.navigate(&id);
        Some(PageChangeMethod::Full)
    }

    /// Splices fetched markup, or falls back to full navigation on any failure.
    pub fn settle_fetch(
        &mut self,
        env: &mut impl Environment,
        fetched: AppResult<String>,
    ) -> Option<PageChangeMethod> {
        let active = self.navigating_mut()?;
        let target = active.target.clone();
        let spliced = fetched.and_then(|markup| env.replace_content(&target.id, &markup));
        let method = match spliced {
            Ok(()) => {
                env.on_content_replaced(&target);
                PageChangeMethod::InPlace
            }
            Err(err) => {
                warn!(page = %target.id, error = %err, "in-place load failed, using full navigation");
                env.navigate(&target.id);
                PageChangeMethod::Fallback
            }
        };
        active.method = Some(method);
        Some(method)
    }

    /// Step 6: hide overlay, commit the new page, release the guard.
    pub fn complete(&mut self, hooks: &mut impl PageLifecycle) -> Option<TransitionReport> {
        if self.phase != TransitionPhase::Navigating {
            return None;
        }
        let method = self.active.as_ref()?.method?;
        let active = self.active.take()?;

        self.overlay.hide();
        self.state.current_page_id = active.target.id.clone();
        self.menu.clear_loading();
        self.menu.set_active(&active.target.id);
        self.state.transition_in_progress = false;
        self.phase = TransitionPhase::Idle;
        hooks.on_transition_complete(&active.target);

        info!(
            generation = active.generation,
            from = %active.from,
            to = %active.target.id,
            method = method.as_str(),
            "transition complete"
        );
        Some(TransitionReport {
            generation: active.generation,
            from: active.from,
            to: active.target.id,
            method,
        })
    }

    /// Runs the whole sequence, awaiting the randomized wait and the optional fetch.
    pub async fn run<E: Environment>(
        &mut self,
        request: TransitionRequest,
        env: &mut E,
    ) -> Result<TransitionReport, Rejection> {
        let pending = self.request(request, env)?;
        tokio::time::sleep(pending.delay).await;

        match self.enter_navigating(pending.generation) {
            Some(NavigationStep::Fetch(id)) => {
                let fetched = env.fetch_markup(&id).await;
                self.settle_fetch(env, fetched);
            }
            Some(NavigationStep::Navigate(_)) => {
                self.navigate_full(env);
            }
            None => {}
        }

        // `run` holds the controller for the whole sequence, so nothing else can
        // have consumed the active transition.
        self.complete(env).ok_or(Rejection::Busy)
    }

    fn navigating_mut(&mut self) -> Option<&mut ActiveTransition> {
        if self.phase != TransitionPhase::Navigating {
            return None;
        }
        self.active.as_mut().filter(|active| active.method.is_none())
    }

    fn draw_delay(&mut self) -> Duration {
        let min = self.settings.min_delay;
        let max = self.settings.max_delay;
        if max <= min {
            return min;
        }
        let millis = self
            .rng
            .gen_range(min.as_millis() as u64..=max.as_millis() as u64);
        Duration::from_millis(millis)
    }
}

impl PageLifecycle for () {}
