use std::collections::HashSet;

use crate::error::{AppError, AppResult};

pub const FALLBACK_LOADING_SUBTITLE: &str = "Processing Request...";

/// Static display metadata for one navigable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    /// Filename-like key, e.g. `gallery.html`.
    pub id: String,
    pub display_name: String,
    pub icon: String,
    pub page_title: String,
    pub loading_subtitle: String,
}

impl PageDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        icon: impl Into<String>,
        page_title: impl Into<String>,
        loading_subtitle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            icon: icon.into(),
            page_title: page_title.into(),
            loading_subtitle: loading_subtitle.into(),
        }
    }
}

/// Fixed, ordered set of pages. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRegistry {
    pages: Vec<PageDescriptor>,
}

impl PageRegistry {
    pub fn new(pages: Vec<PageDescriptor>) -> AppResult<Self> {
        if pages.is_empty() {
            return Err(AppError::invalid_argument(
                "page registry needs at least one page",
            ));
        }

        let mut seen = HashSet::with_capacity(pages.len());
        for page in &pages {
            if page.id.trim().is_empty() {
                return Err(AppError::invalid_argument("page id must not be empty"));
            }
            if !seen.insert(page.id.as_str()) {
                return Err(AppError::invalid_argument(format!(
                    "duplicate page id: {}",
                    page.id
                )));
            }
        }

        Ok(Self { pages })
    }

    pub fn builtin() -> Self {
        Self {
            pages: vec![
                PageDescriptor::new(
                    "index.html",
                    "Home",
                    "🏠",
                    "A.T.L.A.S Home",
                    "Initializing Defense Systems...",
                ),
                PageDescriptor::new(
                    "gallery.html",
                    "Gallery",
                    "🎨",
                    "System Gallery",
                    "Loading Demonstration Modules...",
                ),
                PageDescriptor::new(
                    "documentation.html",
                    "Documentation",
                    "📚",
                    "Technical Documentation",
                    "Accessing Technical Database...",
                ),
            ],
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&PageDescriptor> {
        self.pages.iter().find(|page| page.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The home page: first registry entry.
    pub fn default_id(&self) -> &str {
        &self.pages[0].id
    }

    /// modifier+`digit` shortcut table: `1` is the first entry, `2` the second, ...
    pub fn shortcut_target(&self, digit: u8) -> Option<&str> {
        if !(1..=9).contains(&digit) {
            return None;
        }
        self.pages
            .get(usize::from(digit - 1))
            .map(|page| page.id.as_str())
    }

    pub fn shortcut_digit(&self, id: &str) -> Option<u8> {
        let index = self.position(id)?;
        u8::try_from(index + 1).ok().filter(|digit| *digit <= 9)
    }
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
