#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Modifier+digit page shortcut, 1-based.
    Shortcut {
        digit: u8,
    },
    /// Pointer activation of the menu row at `index`.
    ActivateEntry {
        index: usize,
    },
    ActivateSelected,
    SelectNext,
    SelectPrev,
    ToggleMenu,
    Scroll {
        dy: i32,
    },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    Shortcut,
    ActivateEntry,
    ActivateSelected,
    SelectNext,
    SelectPrev,
    ToggleMenu,
    Scroll,
    Quit,
    Input,
    Transition,
    DocumentLoad,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shortcut => "shortcut",
            Self::ActivateEntry => "activate-entry",
            Self::ActivateSelected => "activate-selected",
            Self::SelectNext => "select-next",
            Self::SelectPrev => "select-prev",
            Self::ToggleMenu => "toggle-menu",
            Self::Scroll => "scroll",
            Self::Quit => "quit",
            Self::Input => "input",
            Self::Transition => "transition",
            Self::DocumentLoad => "document-load",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::Shortcut { .. } => ActionId::Shortcut,
            Self::ActivateEntry { .. } => ActionId::ActivateEntry,
            Self::ActivateSelected => ActionId::ActivateSelected,
            Self::SelectNext => ActionId::SelectNext,
            Self::SelectPrev => ActionId::SelectPrev,
            Self::ToggleMenu => ActionId::ToggleMenu,
            Self::Scroll { .. } => ActionId::Scroll,
            Self::Quit => ActionId::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}

#[cfg(test)]
mod tests {
    use super::{ActionId, Command};

    #[test]
    fn command_action_id_maps_navigation_variants() {
        assert_eq!(Command::Shortcut { digit: 2 }.action_id(), ActionId::Shortcut);
        assert_eq!(
            Command::ActivateEntry { index: 0 }.action_id(),
            ActionId::ActivateEntry
        );
        assert_eq!(Command::Scroll { dy: -3 }.action_id().as_str(), "scroll");
    }
}
