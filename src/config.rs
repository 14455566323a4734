use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::nav::{NavigationMode, TransitionSettings};
use crate::registry::{FALLBACK_LOADING_SUBTITLE, PageDescriptor, PageRegistry};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub transition: TransitionConfig,
    pub site: SiteConfig,
    pub keymap: KeymapConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
    pub pages: Vec<PageConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransitionConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub mode: NavigationMode,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1200,
            max_delay_ms: 2200,
            mode: NavigationMode::Full,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    pub root: PathBuf,
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("site"),
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub shortcut_modifier: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            shortcut_modifier: "alt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    pub redraw_interval_ms: u64,
    pub telemetry_tick_ms: u64,
    pub notification_delay_ms: u64,
    pub notification_duration_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redraw_interval_ms: 50,
            telemetry_tick_ms: 500,
            notification_delay_ms: 1500,
            notification_duration_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    pub fn file_path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("atlas.log"))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PageConfig {
    pub id: String,
    pub name: String,
    #[serde(default = "default_page_icon")]
    pub icon: String,
    pub title: String,
    pub subtitle: Option<String>,
}

fn default_page_icon() -> String {
    "•".to_string()
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.transition.max_delay_ms = self
            .transition
            .max_delay_ms
            .max(self.transition.min_delay_ms);
        self.ui.redraw_interval_ms = self.ui.redraw_interval_ms.max(1);
        self.ui.telemetry_tick_ms = self.ui.telemetry_tick_ms.max(1);
        self.ui.notification_duration_ms = self.ui.notification_duration_ms.max(1);
        if self.log.level.trim().is_empty() {
            self.log.level = LogConfig::default().level;
        }
        self
    }

    pub fn transition_settings(&self) -> TransitionSettings {
        TransitionSettings {
            min_delay: Duration::from_millis(self.transition.min_delay_ms),
            max_delay: Duration::from_millis(self.transition.max_delay_ms),
            mode: self.transition.mode,
        }
    }

    /// Built-in A.T.L.A.S pages unless `[[pages]]` overrides them.
    pub fn registry(&self) -> AppResult<PageRegistry> {
        if self.pages.is_empty() {
            return Ok(PageRegistry::builtin());
        }
        let pages = self
            .pages
            .iter()
            .map(|page| {
                PageDescriptor::new(
                    page.id.trim(),
                    page.name.as_str(),
                    page.icon.as_str(),
                    page.title.as_str(),
                    page.subtitle
                        .as_deref()
                        .unwrap_or(FALLBACK_LOADING_SUBTITLE),
                )
            })
            .collect();
        PageRegistry::new(pages)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("ATLAS_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("atlas").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("atlas")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("atlas").join("config.toml"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use crate::nav::NavigationMode;

    use super::Config;

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("atlas_config_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());

        let settings = config.transition_settings();
        assert_eq!(settings.min_delay, Duration::from_millis(1200));
        assert_eq!(settings.max_delay, Duration::from_millis(2200));
        assert_eq!(settings.mode, NavigationMode::Full);
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [transition]
            min_delay_ms = 900
            max_delay_ms = 300
            mode = "in-place"

            [ui]
            redraw_interval_ms = 0
            telemetry_tick_ms = 0

            [log]
            level = ""
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.transition.min_delay_ms, 900);
        assert_eq!(config.transition.max_delay_ms, 900);
        assert_eq!(config.transition.mode, NavigationMode::InPlace);
        assert_eq!(config.ui.redraw_interval_ms, 1);
        assert_eq!(config.ui.telemetry_tick_ms, 1);
        assert_eq!(config.ui.notification_delay_ms, 1500);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.keymap.shortcut_modifier, "alt");

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn pages_table_overrides_builtin_registry() {
        let config: Config = toml::from_str(
            r#"
            [[pages]]
            id = "home.html"
            name = "Home"
            title = "Atlas Home"
            subtitle = "Booting..."

            [[pages]]
            id = "specs.html"
            name = "Specs"
            icon = "📐"
            title = "Specifications"
            "#,
        )
        .expect("pages should parse");

        let registry = config.registry().expect("registry should build");
        assert_eq!(registry.default_id(), "home.html");
        let specs = registry.lookup("specs.html").expect("specs page exists");
        assert_eq!(specs.loading_subtitle, "Processing Request...");
        assert_eq!(specs.icon, "📐");
        assert_eq!(registry.lookup("home.html").map(|p| p.icon.as_str()), Some("•"));
    }

    #[test]
    fn duplicate_page_ids_are_rejected() {
        let config: Config = toml::from_str(
            r#"
            [[pages]]
            id = "a.html"
            name = "A"
            title = "A"

            [[pages]]
            id = "a.html"
            name = "B"
            title = "B"
            "#,
        )
        .expect("pages should parse");
        assert!(config.registry().is_err());
    }

    #[test]
    fn invalid_mode_is_a_parse_error() {
        let path = unique_temp_path("bad_mode.toml");
        fs::write(&path, "[transition]\nmode = \"teleport\"\n").expect("config file written");
        assert!(Config::load_from_path(&path).is_err());
        fs::remove_file(&path).expect("config file should be removed");
    }
}
