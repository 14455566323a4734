use crate::registry::PageRegistry;

use super::controller::TransitionRequest;
use super::state::NavigationState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub shortcut: Option<u8>,
    pub active: bool,
    pub loading: bool,
}

/// Clickable page entries. At most one entry carries the active marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationMenu {
    entries: Vec<MenuEntry>,
    selected: usize,
    expanded: bool,
}

impl NavigationMenu {
    pub fn render(registry: &PageRegistry, state: &NavigationState) -> Self {
        let entries = registry
            .iter()
            .map(|page| MenuEntry {
                id: page.id.clone(),
                label: page.display_name.clone(),
                icon: page.icon.clone(),
                shortcut: registry.shortcut_digit(&page.id),
                active: page.id == state.current_page_id,
                loading: false,
            })
            .collect::<Vec<_>>();
        let selected = entries.iter().position(|entry| entry.active).unwrap_or(0);

        Self {
            entries,
            selected,
            expanded: true,
        }
    }

    pub fn set_active(&mut self, id: &str) {
        for entry in &mut self.entries {
            entry.active = entry.id == id;
        }
        if let Some(index) = self.entries.iter().position(|entry| entry.active) {
            self.selected = index;
        }
    }

    pub fn mark_loading(&mut self, id: &str) {
        for entry in &mut self.entries {
            entry.loading = entry.id == id;
        }
    }

    pub fn clear_loading(&mut self) {
        for entry in &mut self.entries {
            entry.loading = false;
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn active_id(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.active)
            .map(|entry| entry.id.as_str())
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entries.len();
    }

    pub fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.entries.len() - 1);
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Click (or Enter on the cursor) on entry `index`.
    pub fn intent_for_entry(
        &self,
        index: usize,
        state: &NavigationState,
    ) -> Option<TransitionRequest> {
        if state.transition_in_progress {
            return None;
        }
        let entry = self.entries.get(index)?;
        Some(TransitionRequest::new(entry.id.clone()))
    }

    pub fn intent_for_shortcut(
        &self,
        digit: u8,
        state: &NavigationState,
    ) -> Option<TransitionRequest> {
        if state.transition_in_progress {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.shortcut == Some(digit))
            .map(|entry| TransitionRequest::new(entry.id.clone()))
    }
}
