use crate::registry::PageRegistry;

/// One per loaded document. `transition_in_progress` is owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub current_page_id: String,
    pub transition_in_progress: bool,
}

impl NavigationState {
    pub fn new(current_page_id: impl Into<String>) -> Self {
        Self {
            current_page_id: current_page_id.into(),
            transition_in_progress: false,
        }
    }

    /// Seeds the current page from a location path (`/site/gallery.html`).
    pub fn from_location(path: &str, registry: &PageRegistry) -> Self {
        Self::new(page_id_from_location(path, registry))
    }
}

pub fn page_id_from_location(path: &str, registry: &PageRegistry) -> String {
    let basename = path.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if basename.is_empty() {
        registry.default_id().to_string()
    } else {
        basename.to_string()
    }
}
