use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, AppResult};

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").expect("valid regex"));
static BODY_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body\b[^>]*>").expect("valid regex"));
static BODY_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</body\s*>").expect("valid regex"));
static HIDDEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->")
        .expect("valid regex")
});
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h[1-6]\b[^>]*>(.*?)</h[1-6]\s*>").expect("valid regex"));
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li\b[^>]*>").expect("valid regex"));
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(p|div|section|article|header|footer|nav|main|aside|ul|ol|li|table|tr|br|hr|form|button)\b[^>]*>",
    )
    .expect("valid regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

const HEADING_MARK: &str = "\u{1}";
const BULLET_MARK: &str = "\u{2}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Bullet,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLine {
    pub kind: LineKind,
    pub text: String,
}

/// The page currently shown by the terminal host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub page_id: String,
    pub title: String,
    pub lines: Vec<DocumentLine>,
}

impl Document {
    /// Markup must carry a `<body>` element; anything else is a parse failure.
    pub fn parse(page_id: &str, markup: &str) -> AppResult<Self> {
        let body = extract_body(markup).ok_or_else(|| {
            AppError::content_load(format!("{page_id}: markup has no <body> element"))
        })?;
        Ok(Self {
            page_id: page_id.to_string(),
            title: extract_title(markup).unwrap_or_else(|| page_id.to_string()),
            lines: text_lines(body),
        })
    }

    /// Full page loads are lenient: a bodiless document is rendered whole.
    pub fn parse_or_whole(page_id: &str, markup: &str) -> Self {
        Self::parse(page_id, markup).unwrap_or_else(|_| Self {
            page_id: page_id.to_string(),
            title: extract_title(markup).unwrap_or_else(|| page_id.to_string()),
            lines: text_lines(markup),
        })
    }

    pub fn unavailable(page_id: &str, reason: &str) -> Self {
        Self {
            page_id: page_id.to_string(),
            title: format!("{page_id} unavailable"),
            lines: vec![
                DocumentLine {
                    kind: LineKind::Heading,
                    text: "Page unavailable".to_string(),
                },
                DocumentLine {
                    kind: LineKind::Text,
                    text: reason.to_string(),
                },
            ],
        }
    }

    /// In-place replacement: content and title come from `fetched`, identity follows it.
    pub fn splice(&mut self, fetched: Document) {
        self.page_id = fetched.page_id;
        self.title = fetched.title;
        self.lines = fetched.lines;
    }
}

pub fn extract_title(markup: &str) -> Option<String> {
    let captures = TITLE_RE.captures(markup)?;
    let title = collapse_space(&decode_entities(captures.get(1)?.as_str()));
    (!title.is_empty()).then_some(title)
}

pub fn extract_body(markup: &str) -> Option<&str> {
    let open = BODY_OPEN_RE.find(markup)?;
    let rest = &markup[open.end()..];
    let end = BODY_CLOSE_RE
        .find(rest)
        .map(|close| close.start())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

pub fn text_lines(html: &str) -> Vec<DocumentLine> {
    let visible = HIDDEN_RE.replace_all(html, "");
    let marked = HEADING_RE.replace_all(&visible, format!("\n{HEADING_MARK}$1\n").as_str());
    let marked = LIST_ITEM_RE.replace_all(&marked, format!("\n{BULLET_MARK}").as_str());
    let blocks = BLOCK_RE.replace_all(&marked, "\n");
    let plain = TAG_RE.replace_all(&blocks, "");

    let mut lines = Vec::new();
    for raw in plain.split('\n') {
        let (kind, raw) = if let Some(rest) = raw.trim_start().strip_prefix(HEADING_MARK) {
            (LineKind::Heading, rest)
        } else if let Some(rest) = raw.trim_start().strip_prefix(BULLET_MARK) {
            (LineKind::Bullet, rest)
        } else {
            (LineKind::Text, raw)
        };
        let text = collapse_space(&decode_entities(raw));
        if text.is_empty() {
            continue;
        }
        lines.push(DocumentLine { kind, text });
    }
    lines
}

fn collapse_space(text: &str) -> String {
    SPACE_RE.replace_all(text, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&deg;", "°")
        .replace("&amp;", "&")
}
