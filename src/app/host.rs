use std::future::Future;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::nav::{Environment, PageLifecycle};
use crate::registry::PageDescriptor;
use crate::site::{Document, SiteSource};
use crate::telemetry::TelemetrySimulation;

use super::event_bus::spawn_document_load;

/// The terminal's stand-in for a browser window: one location, one document.
pub struct DocumentHost {
    source: SiteSource,
    home_id: String,
    location: String,
    document: Document,
    scroll: u16,
    telemetry: TelemetrySimulation,
    loading: Option<String>,
    loads: Option<UnboundedSender<DomainEvent>>,
}

impl DocumentHost {
    pub fn new(source: SiteSource, home_id: impl Into<String>, location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            source,
            home_id: home_id.into(),
            document: Document {
                page_id: location.clone(),
                title: location.clone(),
                lines: Vec::new(),
            },
            location,
            scroll: 0,
            telemetry: TelemetrySimulation::default(),
            loading: None,
            loads: None,
        }
    }

    pub(crate) fn attach_loader(&mut self, tx: UnboundedSender<DomainEvent>) {
        self.loads = Some(tx);
    }

    pub fn source(&self) -> &SiteSource {
        &self.source
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns whether the offset moved.
    pub fn scroll_by(&mut self, dy: i32) -> bool {
        let max = self.document.lines.len().saturating_sub(1) as i64;
        let next = (i64::from(self.scroll) + i64::from(dy)).clamp(0, max.min(i64::from(u16::MAX)));
        let next = next as u16;
        let moved = next != self.scroll;
        self.scroll = next;
        moved
    }

    pub fn telemetry(&self) -> &TelemetrySimulation {
        &self.telemetry
    }

    pub fn telemetry_mut(&mut self) -> &mut TelemetrySimulation {
        &mut self.telemetry
    }

    /// Owned markup request, detached from the host so the loop can spawn it.
    pub(crate) fn markup_request(
        &self,
        page_id: &str,
    ) -> impl Future<Output = AppResult<String>> + Send + use<> {
        let source = self.source.clone();
        let page_id = page_id.to_string();
        async move { source.load(&page_id).await }
    }

    /// A full page load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Installs a loaded document; results for a location already left are dropped.
    pub fn apply_loaded(&mut self, page_id: &str, result: AppResult<String>) -> bool {
        if self.loading.as_deref() != Some(page_id) {
            debug!(page = page_id, "dropping stale document load");
            return false;
        }
        self.loading = None;
        let document = match result {
            Ok(markup) => Document::parse_or_whole(page_id, &markup),
            Err(err) => {
                warn!(page = page_id, error = %err, "page load failed");
                Document::unavailable(page_id, &err.to_string())
            }
        };
        self.show_document(document);
        true
    }

    fn show_document(&mut self, document: Document) {
        self.document = document;
        self.scroll = 0;
        self.sync_page_widgets();
    }

    /// Home carries the live telemetry panel; every other page stops it.
    fn sync_page_widgets(&mut self) {
        if self.document.page_id == self.home_id {
            self.telemetry.start();
        } else {
            self.telemetry.stop();
        }
    }
}

impl PageLifecycle for DocumentHost {
    fn on_content_replaced(&mut self, _page: &PageDescriptor) {
        self.scroll = 0;
        self.sync_page_widgets();
    }
}

impl Environment for DocumentHost {
    fn navigate(&mut self, page_id: &str) {
        self.location = page_id.to_string();
        self.loading = Some(page_id.to_string());
        match &self.loads {
            Some(tx) => {
                spawn_document_load(tx.clone(), self.markup_request(page_id), page_id.to_string())
            }
            None => debug!(page = page_id, "no loader attached; location recorded only"),
        }
    }

    fn fetch_markup(&self, page_id: &str) -> impl Future<Output = AppResult<String>> {
        self.markup_request(page_id)
    }

    fn replace_content(&mut self, page_id: &str, markup: &str) -> AppResult<()> {
        let fetched = Document::parse(page_id, markup)?;
        self.document.splice(fetched);
        self.location = page_id.to_string();
        self.loading = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use tokio::sync::mpsc::unbounded_channel;

    use crate::error::AppError;
    use crate::event::DomainEvent;
    use crate::nav::{Environment, PageLifecycle};
    use crate::registry::PageRegistry;
    use crate::site::SiteSource;

    use super::DocumentHost;

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("atlas_host_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    fn host() -> DocumentHost {
        DocumentHost::new(
            SiteSource::directory(std::env::temp_dir()),
            "index.html",
            "index.html",
        )
    }

    #[test]
    fn replace_content_requires_a_body() {
        let mut host = host();
        let err = host
            .replace_content("gallery.html", "<p>no body here</p>")
            .expect_err("bodiless markup should be rejected");
        assert!(matches!(err, AppError::ContentLoad(_)));
        assert_eq!(host.location(), "index.html");

        host.replace_content(
            "gallery.html",
            "<title>System Gallery</title><body><h1>Demos</h1></body>",
        )
        .expect("markup with body should splice");
        assert_eq!(host.location(), "gallery.html");
        assert_eq!(host.document().title, "System Gallery");
    }

    #[test]
    fn content_replaced_hook_restarts_telemetry_only_on_home() {
        let registry = PageRegistry::builtin();
        let mut host = host();

        host.replace_content("index.html", "<body>home</body>")
            .expect("home should splice");
        host.on_content_replaced(registry.lookup("index.html").expect("home exists"));
        assert!(host.telemetry().is_running());

        host.replace_content("gallery.html", "<body>gallery</body>")
            .expect("gallery should splice");
        host.on_content_replaced(registry.lookup("gallery.html").expect("gallery exists"));
        assert!(!host.telemetry().is_running());
    }

    #[test]
    fn stale_loads_are_dropped() {
        let mut host = host();
        host.navigate("gallery.html");
        assert!(host.is_loading());

        assert!(!host.apply_loaded("documentation.html", Ok("<body>x</body>".to_string())));
        assert!(host.is_loading());

        assert!(host.apply_loaded("gallery.html", Err(AppError::content_load("offline"))));
        assert!(!host.is_loading());
        assert_eq!(host.document().title, "gallery.html unavailable");
    }

    #[test]
    fn in_place_swap_supersedes_pending_full_load() {
        let mut host = host();
        host.navigate("gallery.html");
        host.replace_content(
            "documentation.html",
            "<title>Technical Documentation</title><body><h2>Specs</h2></body>",
        )
        .expect("markup should splice");
        assert!(!host.is_loading());

        assert!(!host.apply_loaded(
            "gallery.html",
            Ok("<title>Gallery</title><body>demos</body>".to_string())
        ));
        assert_eq!(host.location(), "documentation.html");
        assert_eq!(host.document().page_id, "documentation.html");
        assert_eq!(host.document().title, "Technical Documentation");
    }

    #[test]
    fn scroll_is_clamped_to_document_length() {
        let mut host = host();
        host.replace_content("index.html", "<body><p>a</p><p>b</p><p>c</p></body>")
            .expect("markup should splice");
        assert!(host.scroll_by(10));
        assert_eq!(host.scroll(), 2);
        assert!(host.scroll_by(-5));
        assert_eq!(host.scroll(), 0);
        assert!(!host.scroll_by(-1));
    }

    #[tokio::test]
    async fn navigate_loads_the_document_through_the_attached_loader() {
        let root = unique_temp_dir("load");
        fs::create_dir_all(&root).expect("site dir should be created");
        fs::write(
            root.join("documentation.html"),
            "<title>Technical Documentation</title><body><h2>Specs</h2></body>",
        )
        .expect("page should be written");

        let (tx, mut rx) = unbounded_channel();
        let mut host = DocumentHost::new(SiteSource::directory(&root), "index.html", "index.html");
        host.attach_loader(tx);
        host.navigate("documentation.html");
        assert_eq!(host.location(), "documentation.html");

        let Some(DomainEvent::DocumentLoaded { page_id, result }) = rx.recv().await else {
            panic!("expected a document load event");
        };
        assert!(host.apply_loaded(&page_id, result));
        assert_eq!(host.document().title, "Technical Documentation");

        let fetched = host
            .fetch_markup("documentation.html")
            .await
            .expect("markup should be fetched");
        assert!(fetched.contains("<h2>Specs</h2>"));
        assert!(host.fetch_markup("missing.html").await.is_err());

        let detached = tokio::spawn(host.markup_request("documentation.html"));
        drop(host);
        let spawned = detached
            .await
            .expect("fetch task should join")
            .expect("markup should be fetched");
        assert_eq!(spawned, fetched);

        fs::remove_dir_all(&root).expect("site dir should be removed");
    }
}
