//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::reorganize::ReorgOptions;
use crate::sort_key::OrderingPolicy;
use crate::throttle::OperationThrottle;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for a sorting run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Subfolders before files, after files, or mixed by name
    pub order: OrderingPolicy,
    /// Strict codepoint order instead of grouping case variants
    pub case_sensitive: bool,
    /// Sort subfolders too
    pub recurse: bool,
    /// Delays before create/delete/move/swap
    pub throttle: OperationThrottle,
    /// If true, report the order but do not modify the filesystem
    pub dry_run: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order: OrderingPolicy::SubfoldersFirst,
            case_sensitive: false,
            recurse: true,
            throttle: OperationThrottle::default(),
            dry_run: false,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Engine settings for one run.
    pub fn reorg_options(&self) -> ReorgOptions {
        ReorgOptions {
            order: self.order,
            case_sensitive: self.case_sensitive,
            recurse: self.recurse,
            throttle: self.throttle,
            dry_run: self.dry_run,
        }
    }
}
