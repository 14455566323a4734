pub mod keymap;

pub use keymap::{ShortcutModifier, map_key_to_command, map_mouse_to_command};
