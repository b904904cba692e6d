//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - --case-sensitive and --ignore-case conflict; either one overrides the config value.

use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::types::{Config, LogLevel};
use crate::sort_key::OrderingPolicy;

/// Sort FAT folders so devices that list entries in directory order show them alphabetically.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Sort FAT16/FAT32 folders alphabetically by recreating them"
)]
pub struct Args {
    /// Folders to sort, processed in the order given.
    #[arg(value_name = "FOLDER", value_hint = ValueHint::DirPath)]
    pub roots: Vec<PathBuf>,

    /// Where subfolders go: first, last or mixed (with files, by name).
    #[arg(long, value_name = "ORDER", help = "Subfolder placement: first, last, mixed")]
    pub order: Option<OrderingPolicy>,

    /// Strict Unicode order instead of grouping uppercase/lowercase variants.
    #[arg(short = 'c', long, conflicts_with = "ignore_case")]
    pub case_sensitive: bool,

    /// Ignore uppercase/lowercase (overrides a case-sensitive config).
    #[arg(long)]
    pub ignore_case: bool,

    /// Only sort the given folders; move their subfolders as-is.
    #[arg(long)]
    pub no_recurse: bool,

    /// Delay before creating a folder, in milliseconds (0 disables).
    #[arg(long, value_name = "MS")]
    pub wait_create_ms: Option<u64>,

    /// Delay before deleting a folder, in milliseconds (0 disables).
    #[arg(long, value_name = "MS")]
    pub wait_delete_ms: Option<u64>,

    /// Delay before each move, in milliseconds (0 disables).
    #[arg(long, value_name = "MS")]
    pub wait_move_ms: Option<u64>,

    /// Delay before the final rename of the sorted folder, in milliseconds (0 disables).
    #[arg(long, value_name = "MS")]
    pub wait_swap_ms: Option<u64>,

    /// Dry-run: report the resulting order but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where the config file is looked up (or SORT_FAT_FOLDER_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Write a commented template config at the config location, then exit.
    #[arg(long, help = "Create a template config file and exit")]
    pub init_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(order) = self.order {
            cfg.order = order;
        }
        if self.case_sensitive {
            cfg.case_sensitive = true;
        }
        if self.ignore_case {
            cfg.case_sensitive = false;
        }
        if self.no_recurse {
            cfg.recurse = false;
        }
        if let Some(ms) = self.wait_create_ms {
            cfg.throttle.create = Duration::from_millis(ms);
        }
        if let Some(ms) = self.wait_delete_ms {
            cfg.throttle.delete = Duration::from_millis(ms);
        }
        if let Some(ms) = self.wait_move_ms {
            cfg.throttle.relocate = Duration::from_millis(ms);
        }
        if let Some(ms) = self.wait_swap_ms {
            cfg.throttle.swap = Duration::from_millis(ms);
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
