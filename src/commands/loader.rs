//! Discovery of command files within the project scope

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error};
use tokio_util::sync::CancellationToken;

use crate::commands::descriptor::SlashCommand;
use crate::commands::file::{self, COMMAND_FILE_EXT, CommandFileError, Parsed};
use crate::project::{self, Settings};

/// Subdirectory of the marker directory holding command files.
pub const COMMANDS_DIR: &str = "commands";

/// Loads slash commands from `<marker>/commands/*.toml`.
pub struct FileCommandLoader {
    /// Application settings; not consulted by the current load logic.
    pub settings: Arc<Settings>,
    /// Explicit scan root; the process working directory when `None`.
    pub start_dir: Option<PathBuf>,
}

impl FileCommandLoader {
    #[must_use]
    pub fn new(settings: Arc<Settings>) -> Self {
        FileCommandLoader {
            settings,
            start_dir: None,
        }
    }

    /// Scan from an explicit directory instead of the process working directory.
    #[must_use]
    pub fn with_start_dir(mut self, dir: PathBuf) -> Self {
        self.start_dir = Some(dir);
        self
    }

    /// Load every valid command file, in directory-listing order.
    ///
    /// Never fails: a missing project scope or commands directory yields an
    /// empty list, broken files are logged and skipped, and a file without a
    /// usable `description` is skipped silently. The cancellation token is
    /// accepted per the loader contract but not consulted; a scan always runs
    /// to completion.
    pub async fn load_commands(&self, _cancel: &CancellationToken) -> Vec<SlashCommand> {
        let marker_dir = match &self.start_dir {
            Some(dir) => project::find_marker_dir_from(dir),
            None => project::find_marker_dir(),
        };
        let Some(marker_dir) = marker_dir else {
            debug!("No {} directory found, no commands to load", project::MARKER_DIR);
            return Vec::new();
        };
        load_dir(&marker_dir.join(COMMANDS_DIR)).await
    }
}

/// Load all command files in one directory, non-recursively.
///
/// A directory that cannot be listed yields whatever was collected before the
/// listing failed (usually nothing).
async fn load_dir(commands_dir: &Path) -> Vec<SlashCommand> {
    let mut commands = Vec::new();
    let Ok(mut entries) = tokio::fs::read_dir(commands_dir).await else {
        return commands;
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(_) => return commands,
        };
        let path = entry.path();
        if !entry.file_type().await.is_ok_and(|t| t.is_file()) {
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == COMMAND_FILE_EXT) {
            continue;
        }

        match load_file(&path).await {
            Ok(Parsed::Command(command)) => {
                debug!("Loaded command `{}` from {}", command.name, path.display());
                commands.push(command);
            }
            Ok(Parsed::MissingDescription) => {}
            Err(e) => error!("{e}"),
        }
    }

    commands
}

/// Read and parse a single command file.
///
/// # Errors
///
/// Returns `CommandFileError::Read` if the file cannot be read, plus whatever
/// [`file::parse_command_file`] reports.
pub async fn load_file(path: &Path) -> Result<Parsed, CommandFileError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CommandFileError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
    file::parse_command_file(path, &contents)
}
