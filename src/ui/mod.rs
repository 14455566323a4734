mod chrome;
mod content;
mod layout;
mod menu;
mod overlay;
mod theme;

pub use chrome::{ChromeView, draw_chrome};
pub use content::{ContentView, draw_content};
pub use layout::{UiLayout, split_layout};
pub use menu::draw_menu;
pub use overlay::{draw_notification, draw_transition_overlay};
