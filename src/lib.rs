//! Core library for `sort_fat_folder`.
//!
//! FAT16/FAT32 directories list entries in the order they were created. This
//! crate sorts a folder by recreating it beside itself and moving every entry
//! over in the requested order, then swapping the new folder into place.
//!
//! Layout:
//! - `reorganize`: the per-folder two-phase engine
//! - `runner`: multi-root runs, summary and worker thread
//! - `sort_key` / `snapshot`: ordering and directory listing
//! - `fs_ops`: rename, temp sibling and timestamp primitives
//! - `config` / `cli`: XML config and command-line overrides

pub mod cancel;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod progress;
pub mod reorganize;
pub mod runner;
pub mod snapshot;
pub mod sort_key;
pub mod throttle;

pub use cancel::CancellationToken;
pub use config::{
    Config, LogLevel, config_path, create_template_config, default_config_path, default_log_path,
    load_config, load_config_from_xml_path, path_has_symlink_ancestor,
};
pub use errors::ReorgError;
pub use progress::{ConsoleSink, MemorySink, ProgressSink, TracingSink};
pub use reorganize::{ReorgOptions, ReorganizationCounters, Reorganizer, RunState};
pub use runner::{Completion, Outcome, RunReport, run_roots, spawn_run};
pub use snapshot::{EntryKind, EntrySnapshot};
pub use sort_key::{OrderingPolicy, build_key, sort_snapshots};
pub use throttle::{OperationThrottle, ThrottleOp};
