use std::future::Future;

use crate::error::AppResult;
use crate::registry::PageDescriptor;

/// Named lifecycle callbacks a host page may supply. Every hook is optional.
pub trait PageLifecycle {
    fn on_transition_start(&mut self, target: &PageDescriptor) {
        let _ = target;
    }

    /// Content was spliced in place; page-specific widgets should re-initialize.
    fn on_content_replaced(&mut self, page: &PageDescriptor) {
        let _ = page;
    }

    fn on_transition_complete(&mut self, page: &PageDescriptor) {
        let _ = page;
    }
}

/// What the transition controller may do to the surrounding environment.
pub trait Environment: PageLifecycle {
    /// Full navigation (location assignment). Cannot fail from the caller's view.
    fn navigate(&mut self, page_id: &str);

    /// GET the target page's markup as HTML text.
    fn fetch_markup(&self, page_id: &str) -> impl Future<Output = AppResult<String>>;

    /// Splice fetched markup into the current document.
    fn replace_content(&mut self, page_id: &str, markup: &str) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChangeMethod {
    Full,
    InPlace,
    /// In-place replacement failed and full navigation was used instead.
    Fallback,
}

impl PageChangeMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::InPlace => "in-place",
            Self::Fallback => "fallback",
        }
    }
}
