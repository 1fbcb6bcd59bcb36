//! Configuration paths for the checklist
//!
//! All state lives under one home directory, `~/.wcag_checklist/` unless
//! `--home` or `WCAG_CHECKLIST_HOME` says otherwise.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::context::AppContext;
use super::error::HelpfulError;

pub const CONFIG_FILE: &str = "config.toml";
const HOME_DIR_NAME: &str = ".wcag_checklist";

/// Home directory: explicit override, else `~/.wcag_checklist`, else
/// `./.wcag_checklist` when no user home is known.
pub fn resolve_home(override_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }
    dirs::home_dir()
        .map(|home| home.join(HOME_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(HOME_DIR_NAME))
}

/// Get logs directory: <home>/logs
pub fn logs_dir(home: &Path) -> PathBuf {
    home.join("logs")
}

/// Settings read from `<home>/config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Checklist document; the bundled WCAG 2.1 list when unset
    pub checklist: Option<PathBuf>,
    /// Distance of PageUp/PageDown in the search field
    pub page_size: usize,
    /// TUI poll timeout
    pub tick_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            checklist: None,
            page_size: wcag_core::session::DEFAULT_PAGE_SIZE,
            tick_rate_ms: 250,
        }
    }
}

impl AppConfig {
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&content)
            .map_err(|err| HelpfulError::invalid_config(path, &err.to_string()))?;
        config.page_size = config.page_size.max(1);
        config.tick_rate_ms = config.tick_rate_ms.max(10);
        Ok(config)
    }
}

/// Arguments for the config command
#[derive(Debug)]
pub struct ConfigArgs {
    pub json: bool,
}

fn exists_label(path: &Path) -> &'static str {
    if path.exists() {
        "exists"
    } else {
        "not found"
    }
}

/// Run the config command - shows current paths and settings
pub fn run(ctx: &AppContext, args: ConfigArgs) -> Result<()> {
    let config_path = ctx.config_path();
    let progress = ctx.progress_store();
    let preferences = ctx.preferences_store();
    let logs = logs_dir(&ctx.home);
    let checklist = ctx.checklist_path();

    if args.json {
        let value = serde_json::json!({
            "home": ctx.home.to_string_lossy(),
            "config": {
                "path": config_path.to_string_lossy(),
                "exists": config_path.exists(),
            },
            "checklist": checklist.as_ref().map(|p| p.to_string_lossy().to_string()),
            "progress": {
                "path": progress.path().to_string_lossy(),
                "exists": progress.path().exists(),
            },
            "preferences": {
                "path": preferences.path().to_string_lossy(),
                "exists": preferences.path().exists(),
            },
            "logs": logs.to_string_lossy(),
            "page_size": ctx.config.page_size,
            "tick_rate_ms": ctx.config.tick_rate_ms,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("WCAG CHECKLIST CONFIGURATION");
    println!("============================");
    println!();
    println!("Home:        {}", ctx.home.display());
    println!("Config:      {} ({})", config_path.display(), exists_label(&config_path));
    match &checklist {
        Some(path) => println!("Checklist:   {} ({})", path.display(), exists_label(path)),
        None => println!("Checklist:   bundled WCAG 2.1"),
    }
    println!("Progress:    {} ({})", progress.path().display(), exists_label(progress.path()));
    println!(
        "Preferences: {} ({})",
        preferences.path().display(),
        exists_label(preferences.path())
    );
    println!("Logs:        {}", logs.display());
    println!();
    println!("Page size:   {}", ctx.config.page_size);
    println!("Tick rate:   {} ms", ctx.config.tick_rate_ms);
    Ok(())
}
