//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - A missing default file means "use defaults"; a missing or malformed file
//!   named through the environment is an error.
//! - Unknown XML fields are rejected to surface misconfigurations early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use super::CONFIG_ENV;
use super::paths::{default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};
use crate::sort_key::OrderingPolicy;
use crate::throttle::{
    WAIT_CREATE_DEFAULT, WAIT_DELETE_DEFAULT, WAIT_MOVE_DEFAULT, WAIT_SWAP_DEFAULT,
};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    order: Option<String>,
    case_sensitive: Option<bool>,
    recurse: Option<bool>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    wait_create_ms: Option<u64>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    wait_delete_ms: Option<u64>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    wait_move_ms: Option<u64>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    wait_swap_ms: Option<u64>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Custom deserializer that trims surrounding whitespace for optional u64
fn de_u64_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(serde::de::Error::custom),
    }
}

// Map XmlConfig -> Config; absent fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.order.as_deref() {
        cfg.order = OrderingPolicy::parse(s)
            .with_context(|| format!("invalid <order> value '{}'", s.trim()))?;
    }
    if let Some(b) = parsed.case_sensitive {
        cfg.case_sensitive = b;
    }
    if let Some(b) = parsed.recurse {
        cfg.recurse = b;
    }

    if let Some(ms) = parsed.wait_create_ms {
        cfg.throttle.create = Duration::from_millis(ms);
    }
    if let Some(ms) = parsed.wait_delete_ms {
        cfg.throttle.delete = Duration::from_millis(ms);
    }
    if let Some(ms) = parsed.wait_move_ms {
        cfg.throttle.relocate = Duration::from_millis(ms);
    }
    if let Some(ms) = parsed.wait_swap_ms {
        cfg.throttle.swap = Duration::from_millis(ms);
    }

    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s
            .trim()
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("config xml '{}'", path.display()))
}

/// Load the effective config.
///
/// Search order:
///  - $SORT_FAT_FOLDER_CONFIG (explicit; must exist)
///  - OS default config path (optional)
///
/// Returns the config and the file it came from, if any.
pub fn load_config() -> Result<(Config, Option<PathBuf>)> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(p);
        let cfg = load_config_from_xml_path(&path)
            .with_context(|| format!("{CONFIG_ENV} points at an unusable config"))?;
        return Ok((cfg, Some(path)));
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            let cfg = load_config_from_xml_path(&path)?;
            Ok((cfg, Some(path)))
        }
        _ => Ok((Config::default(), None)),
    }
}

/// Create default template config file and parent directory (best-effort permissions).
/// Refuses to overwrite an existing file or to write through a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let content = format!(
        "<!--\n  sort_fat_folder configuration (XML)\n\n  order           -> first | last | mixed (subfolders before files, after files, or by name only)\n  case_sensitive  -> true: strict Unicode order; false: ignore uppercase/lowercase\n  recurse         -> true: sort subfolders too; false: selected folders only\n  wait_*_ms       -> delay before each create/delete/move/swap; 0 disables\n  log_level       -> quiet | normal | info | debug\n  log_file        -> path to log file (optional)\n\n  CLI flags override XML values.\n-->\n<config>\n  <order>first</order>\n  <case_sensitive>false</case_sensitive>\n  <recurse>true</recurse>\n  <wait_create_ms>{}</wait_create_ms>\n  <wait_delete_ms>{}</wait_delete_ms>\n  <wait_move_ms>{}</wait_move_ms>\n  <wait_swap_ms>{}</wait_swap_ms>\n  <log_level>normal</log_level>\n</config>\n",
        WAIT_CREATE_DEFAULT.as_millis(),
        WAIT_DELETE_DEFAULT.as_millis(),
        WAIT_MOVE_DEFAULT.as_millis(),
        WAIT_SWAP_DEFAULT.as_millis(),
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}
