//! WCAG checklist launcher
//!
//! Without a subcommand the interactive checklist opens. The other commands
//! share the same home directory, so progress checked in the terminal UI is
//! visible to `wcag report` and friends.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use wcag_core::Level;
use wcag_logging::{init_logging, LogConfig};

mod cli;

use cli::context::AppContext;

#[derive(Parser, Debug)]
#[command(name = "wcag", version, about = "Track WCAG success criteria from the terminal")]
struct Cli {
    /// Enable verbose logging on stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Checklist home directory (progress, preferences, logs)
    #[arg(long, global = true, env = "WCAG_CHECKLIST_HOME")]
    home: Option<PathBuf>,

    /// Checklist document (TOML). Defaults to the bundled WCAG 2.1 list
    #[arg(long, global = true, env = "WCAG_CHECKLIST")]
    checklist: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive checklist (default)
    Tui,

    /// Search criteria by text
    Search {
        /// Case-insensitive search term
        term: String,

        /// Only show these levels (repeatable)
        #[arg(short, long = "level")]
        levels: Vec<Level>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the checklist with its check state
    Report {
        /// Only show these levels (repeatable)
        #[arg(short, long = "level")]
        levels: Vec<Level>,

        /// Only show criteria matching this term
        #[arg(short, long)]
        term: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark criteria as done
    Check {
        /// Criterion ids (sc-1-4-3) or numbers (1.4.3)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Mark criteria as not done
    Uncheck {
        /// Criterion ids (sc-1-4-3) or numbers (1.4.3)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show, export, import or reset progress
    Progress {
        #[command(subcommand)]
        action: Option<cli::progress::ProgressAction>,
    },

    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: Option<cli::theme::ThemeAction>,
    },

    /// Show resolved paths and settings
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn command_wants_json(command: &Option<Commands>) -> bool {
    match command {
        Some(Commands::Search { json, .. }) => *json,
        Some(Commands::Report { json, .. }) => *json,
        Some(Commands::Config { json }) => *json,
        Some(Commands::Progress { action: Some(action) }) => action.wants_json(),
        _ => false,
    }
}

fn run_command(ctx: &AppContext, command: Option<Commands>) -> Result<()> {
    match command.unwrap_or(Commands::Tui) {
        Commands::Tui => cli::tui::run(ctx),
        Commands::Search { term, levels, json } => {
            cli::search::run(ctx, cli::search::SearchArgs { term, levels, json })
        }
        Commands::Report { levels, term, json } => {
            cli::report::run(ctx, cli::report::ReportArgs { levels, term, json })
        }
        Commands::Check { ids } => cli::check::run(ctx, &ids, true),
        Commands::Uncheck { ids } => cli::check::run(ctx, &ids, false),
        Commands::Progress { action } => cli::progress::run(ctx, action.unwrap_or_default()),
        Commands::Theme { action } => cli::theme::run(ctx, action.unwrap_or_default()),
        Commands::Config { json } => cli::config::run(ctx, cli::config::ConfigArgs { json }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let is_tui_mode = matches!(cli.command, None | Some(Commands::Tui));
    let json_mode = command_wants_json(&cli.command);
    let home = cli::config::resolve_home(cli.home.clone());

    // Logging stays off stdout so JSON output and the TUI are not corrupted
    let _log_guard = match init_logging(LogConfig {
        app_name: "wcag",
        verbose: cli.verbose,
        tui_mode: is_tui_mode,
        logs_dir: Some(cli::config::logs_dir(&home)),
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: {:#}", err);
            None
        }
    };

    let result = AppContext::resolve(home, cli.checklist.clone())
        .and_then(|ctx| run_command(&ctx, cli.command));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %format!("{:#}", err), "Command failed");
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{:?}", err);
            }
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_defaults_to_tui() {
        let cli = Cli::try_parse_from(["wcag"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!command_wants_json(&cli.command));
    }

    #[test]
    fn test_cli_parses_levels() {
        let cli = Cli::try_parse_from(["wcag", "search", "contrast", "-l", "aa", "--level", "AAA", "--json"])
            .unwrap();
        match cli.command {
            Some(Commands::Search { term, levels, json }) => {
                assert_eq!(term, "contrast");
                assert_eq!(levels, vec![Level::AA, Level::AAA]);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["wcag", "report", "--level", "B"]).is_err());
    }

    #[test]
    fn test_check_requires_ids() {
        assert!(Cli::try_parse_from(["wcag", "check"]).is_err());
    }
}
