use std::path::PathBuf;

use atlas::app::App;
use atlas::config::Config;
use atlas::error::AppResult;
use atlas::logging::{init_logging, level_for_verbosity};
use atlas::nav::NavigationMode;
use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(name = "atlas", version, about = "Browse the A.T.L.A.S site in the terminal")]
struct Cli {
    /// Page location to open; only the basename is used (empty opens home).
    location: Option<String>,

    /// Directory holding the site's .html pages.
    #[arg(long, value_name = "DIR")]
    site: Option<PathBuf>,

    /// Load pages over HTTP from this base URL instead of a directory.
    #[arg(long, value_name = "URL", conflicts_with = "site")]
    base_url: Option<String>,

    /// Swap page content in place instead of loading whole documents.
    #[arg(long)]
    in_place: bool,

    /// Config file (defaults to $ATLAS_CONFIG_PATH or the platform config dir).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let config = apply_cli_overrides(config, &cli);

    init_logging(
        level_for_verbosity(&config.log.level, cli.verbose),
        &config.log.file_path(),
    )?;

    let location = cli.location.as_deref().unwrap_or_default();
    let mut app = App::new_with_config(config, location)?;
    app.run().await
}

fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(site) = &cli.site {
        config.site.root = site.clone();
        config.site.base_url = None;
    }
    if let Some(base_url) = &cli.base_url {
        config.site.base_url = Some(base_url.clone());
    }
    if cli.in_place {
        config.transition.mode = NavigationMode::InPlace;
    }
    config
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use atlas::config::Config;
    use atlas::nav::NavigationMode;
    use clap::Parser;

    use super::{Cli, apply_cli_overrides};

    #[test]
    fn cli_accepts_location_and_flags() {
        let cli = Cli::try_parse_from([
            "atlas",
            "site/gallery.html",
            "--site",
            "public",
            "--in-place",
            "-vv",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.location.as_deref(), Some("site/gallery.html"));
        assert_eq!(cli.site, Some(PathBuf::from("public")));
        assert!(cli.in_place);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_rejects_site_together_with_base_url() {
        let parsed = Cli::try_parse_from([
            "atlas",
            "--site",
            "public",
            "--base-url",
            "https://atlas.example",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn cli_values_override_the_config_file() {
        let mut config = Config::default();
        config.site.base_url = Some("https://old.example".to_string());

        let cli = Cli::try_parse_from(["atlas", "--site", "public", "--in-place"])
            .expect("arguments should parse");
        let config = apply_cli_overrides(config, &cli);
        assert_eq!(config.site.root, PathBuf::from("public"));
        assert_eq!(config.site.base_url, None);
        assert_eq!(config.transition.mode, NavigationMode::InPlace);

        let cli = Cli::try_parse_from(["atlas", "--base-url", "https://atlas.example"])
            .expect("arguments should parse");
        let config = apply_cli_overrides(Config::default(), &cli);
        assert_eq!(
            config.site.base_url.as_deref(),
            Some("https://atlas.example")
        );
        assert_eq!(config.transition.mode, NavigationMode::Full);
    }
}
