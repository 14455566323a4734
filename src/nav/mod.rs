pub mod controller;
pub mod env;
pub mod menu;
pub mod overlay;
pub mod state;


pub use controller::{
    NavigationMode, NavigationStep, PendingTransition, Rejection, TransitionController,
    TransitionPhase, TransitionReport, TransitionRequest, TransitionSettings,
};
pub use env::{Environment, PageChangeMethod, PageLifecycle};
pub use menu::{MenuEntry, NavigationMenu};
pub use overlay::TransitionOverlay;
pub use state::NavigationState;
