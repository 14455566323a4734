mod actors;
mod core;
mod event_bus;
mod event_loop;
mod host;
mod input_ops;
mod state;
pub(crate) mod terminal_session;
mod view_ops;

#[cfg(test)]
mod tests;

pub use core::App;
pub use host::DocumentHost;
pub use state::{Notification, StatusState, SYSTEM_ONLINE_MESSAGE};
