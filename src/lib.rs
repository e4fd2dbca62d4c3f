//! Core implementation of the Slashbox command loader
//!
//! Slashbox discovers user-defined slash commands for Gemini-style CLIs. A
//! project opts in by carrying a `.gemini` directory; TOML files under its
//! `commands` subdirectory each define one command, and every valid file
//! becomes a descriptor the host CLI can register in its command palette.

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::commands::descriptor::SlashCommand;
use crate::commands::loader::FileCommandLoader;
use crate::project::Settings;

pub mod commands;
pub mod logger;
pub mod project;

/// Discover the project scope and load its commands in one call.
///
/// Convenience over [`FileCommandLoader`] for hosts that don't need to keep
/// the loader around: resolves the marker directory (from `start_dir`, or the
/// process working directory when `None`), loads settings with defaults on
/// failure, and returns the loaded commands. An absent project scope yields
/// an empty list.
pub async fn load_commands(start_dir: Option<&Path>) -> Vec<SlashCommand> {
    let marker_dir = match start_dir {
        Some(dir) => project::find_marker_dir_from(dir),
        None => project::find_marker_dir(),
    };
    let settings = marker_dir
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();

    let mut loader = FileCommandLoader::new(Arc::new(settings));
    if let Some(dir) = start_dir {
        loader = loader.with_start_dir(dir.to_path_buf());
    }
    loader.load_commands(&CancellationToken::new()).await
}
