use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tray_core::geometry::Rect;
use tray_core::logging::LOG_ENV;
use tray_widgets::{Board, Container, ReorderConfig};

use crate::error::{DemoError, Result};
use crate::menu_builder::{MenuBuilder, sample_menu};
use crate::replay::{ReplayOptions, replay};
use crate::tape::demo_script;

#[derive(Debug, Parser)]
#[command(
    name = "tray-demo",
    about = "Replay a scripted drag-and-drop session on a restaurant menu",
    version
)]
pub struct Cli {
    /// Reorder config (TOML, or JSON when the extension is `.json`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Menu as a JSON array of categories. Defaults to a built-in menu.
    #[arg(long)]
    pub menu: Option<PathBuf>,

    /// Viewport width in cells.
    #[arg(long, default_value_t = 48)]
    pub width: u16,

    /// Viewport height in cells.
    #[arg(long, default_value_t = 24)]
    pub height: u16,

    /// Print only intent lines, no frames.
    #[arg(long)]
    pub quiet: bool,

    /// Emit logs as JSON on stderr.
    #[arg(long)]
    pub json_logs: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.json_logs)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ReorderConfig::default(),
    };
    let board = match &cli.menu {
        Some(path) => load_menu(path)?,
        None => sample_menu()?,
    };

    let mut builder = MenuBuilder::new(board, config, Rect::from_size(cli.width, cli.height));
    let options = ReplayOptions { frames: !cli.quiet };
    let stdout = std::io::stdout();
    let summary = replay(&mut builder, &demo_script(), options, &mut stdout.lock())?;
    tracing::info!(
        target: "tray::menu",
        steps = summary.steps,
        applied = summary.applied,
        skipped = summary.skipped,
        "replay finished"
    );
    Ok(())
}

fn init_logging(json: bool) -> Result<()> {
    if json {
        return tray_core::logging::init_json().map_err(|e| DemoError::Logging(e.to_string()));
    }
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| DemoError::Logging(e.to_string()))
}

/// Load a reorder config, picking the format from the file extension.
pub fn load_config(path: &Path) -> Result<ReorderConfig> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        ReorderConfig::from_json_file(path)?
    } else {
        ReorderConfig::from_toml_file(path)?
    };
    Ok(config)
}

/// Load a menu from a JSON array of categories.
pub fn load_menu(path: &Path) -> Result<Board> {
    let raw = std::fs::read_to_string(path)?;
    let containers: Vec<Container> = serde_json::from_str(&raw).map_err(DemoError::MenuJson)?;
    Ok(Board::new(containers)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["tray-demo"]);
        assert_eq!((cli.width, cli.height), (48, 24));
        assert!(cli.config.is_none() && cli.menu.is_none());
        assert!(!cli.quiet && !cli.json_logs);
    }

    #[test]
    fn cli_flags() {
        let cli = Cli::parse_from(["tray-demo", "--width", "60", "--quiet", "--menu", "menu.json"]);
        assert_eq!(cli.width, 60);
        assert!(cli.quiet);
        assert_eq!(cli.menu, Some(PathBuf::from("menu.json")));
    }

    #[test]
    fn config_format_follows_extension() {
        let toml = temp_file(".toml", "drag_threshold = 5\n");
        assert_eq!(load_config(toml.path()).unwrap().drag_threshold, 5);
        let json = temp_file(".json", r#"{"collapsed_min_height": 4}"#);
        assert_eq!(load_config(json.path()).unwrap().collapsed_min_height, 4);
    }

    #[test]
    fn menu_loads_from_json() {
        let file = temp_file(
            ".json",
            r#"[{"id":"brunch","name":"Brunch","items":[{"id":"eggs","label":"Eggs Benedict"}]}]"#,
        );
        let board = load_menu(file.path()).unwrap();
        assert_eq!(board.item("eggs").map(|i| i.label.as_str()), Some("Eggs Benedict"));
    }

    #[test]
    fn duplicate_dishes_are_rejected() {
        let file = temp_file(
            ".json",
            r#"[{"id":"a","name":"A","items":[{"id":"x","label":"X"}]},
                {"id":"b","name":"B","items":[{"id":"x","label":"X again"}]}]"#,
        );
        let err = load_menu(file.path()).unwrap_err();
        assert!(matches!(err, DemoError::Board(_)));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn malformed_menu_is_a_parse_error() {
        let file = temp_file(".json", "{not json");
        assert!(matches!(load_menu(file.path()), Err(DemoError::MenuJson(_))));
    }
}
