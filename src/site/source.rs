use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::{AppError, AppResult};

const USER_AGENT: &str = concat!("atlas/", env!("CARGO_PKG_VERSION"));

/// Where page markup comes from: a local site directory or an HTTP base URL.
#[derive(Debug, Clone)]
pub enum SiteSource {
    Directory(PathBuf),
    Http {
        base_url: String,
        client: reqwest::Client,
    },
}

impl SiteSource {
    pub fn directory(root: impl Into<PathBuf>) -> Self {
        Self::Directory(root.into())
    }

    pub fn http(base_url: &str) -> AppResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::unsupported(format!(
                "site base URL must be http(s): {base_url}"
            )));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| AppError::http(base_url.clone(), source))?;
        Ok(Self::Http { base_url, client })
    }

    /// The location string a page id resolves to (path or URL).
    pub fn location_of(&self, page_id: &str) -> String {
        match self {
            Self::Directory(root) => root.join(page_id).display().to_string(),
            Self::Http { base_url, .. } => format!("{base_url}/{page_id}"),
        }
    }

    /// GET the page's markup as HTML text.
    pub async fn load(&self, page_id: &str) -> AppResult<String> {
        validate_page_id(page_id)?;
        match self {
            Self::Directory(root) => load_from_directory(root, page_id).await,
            Self::Http { client, .. } => load_over_http(client, &self.location_of(page_id)).await,
        }
    }
}

fn validate_page_id(page_id: &str) -> AppResult<()> {
    let escapes = page_id.is_empty()
        || page_id.contains(['/', '\\'])
        || page_id == ".."
        || page_id == ".";
    if escapes {
        return Err(AppError::invalid_argument(format!(
            "page id is not a site file name: {page_id:?}"
        )));
    }
    Ok(())
}

async fn load_from_directory(root: &Path, page_id: &str) -> AppResult<String> {
    let path = root.join(page_id);
    debug!(path = %path.display(), "reading page markup");
    tokio::fs::read_to_string(&path).await.map_err(|source| {
        AppError::io_with_context(source, format!("failed to read page: {}", path.display()))
    })
}

async fn load_over_http(client: &reqwest::Client, url: &str) -> AppResult<String> {
    debug!(url, "fetching page markup");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| AppError::http(url, source))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::content_load(format!("{url} returned {status}")));
    }
    if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
        let content_type = content_type.to_str().unwrap_or_default();
        if !content_type.to_ascii_lowercase().contains("text/html") {
            return Err(AppError::content_load(format!(
                "{url} is not HTML ({content_type})"
            )));
        }
    }

    response
        .text()
        .await
        .map_err(|source| AppError::http(url, source))
}
