//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! runs the reorganizer on its worker thread and maps the result to an exit code.

use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tracing::debug;

use sort_fat_folder::cli::Args;
use sort_fat_folder::config::CONFIG_ENV;
use sort_fat_folder::output as out;
use sort_fat_folder::{
    CancellationToken, ConsoleSink, Outcome, config_path, create_template_config,
    default_config_path, load_config, spawn_run,
};

use crate::logging::init_tracing;

/// Run the CLI application; returns the process exit code.
pub fn run(args: Args) -> Result<i32> {
    // Handle --print-config / --init-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(0);
    }
    if args.init_config {
        let path = config_path().context("Could not determine a config path")?;
        create_template_config(&path)?;
        out::print_success(&format!("A template config was written to: {}", path.display()));
        out::print_info(&format!(
            "Edit it to change defaults. To use a different location set {CONFIG_ENV}."
        ));
        return Ok(0);
    }

    // Built-in defaults < XML file < command-line flags.
    let (mut cfg, cfg_source) = load_config()?;
    args.apply_overrides(&mut cfg);

    // Hold the guard until exit so the file appender gets flushed.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;
    debug!(config = ?cfg_source, "effective config: {:?}", cfg);

    if args.roots.is_empty() {
        bail!("No folder given. Pass one or more folders to sort (see --help).");
    }

    let token = CancellationToken::new();
    {
        let token = token.clone();
        ctrlc::set_handler(move || {
            if !token.is_cancelled() {
                out::print_warn("Received interrupt; stopping after the current entry...");
            }
            token.cancel();
        })
        .context("failed to install Ctrl-C handler")?;
    }

    let handle = spawn_run(
        args.roots.clone(),
        cfg.reorg_options(),
        token,
        Arc::new(ConsoleSink),
    )
    .context("failed to start the reorganizer thread")?;
    let report = match handle.join() {
        Ok(r) => r,
        Err(_) => bail!("reorganizer thread panicked"),
    };

    match &report.outcome {
        Outcome::Success => {}
        Outcome::Cancelled => out::print_warn("Cancelled by user."),
        Outcome::Failed(e) => out::print_error(&e.to_string()),
    }
    Ok(report.completion().exit_code())
}

fn print_config_location() {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            cfg_env.to_string_lossy()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
}
