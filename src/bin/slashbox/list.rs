use std::fmt::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use slashbox::commands::descriptor::SlashCommand;
use slashbox::commands::loader::{COMMANDS_DIR, FileCommandLoader};
use slashbox::project::{MARKER_DIR, Settings};

/// Run the list subcommand.
pub async fn run(marker_dir: Option<&Path>, start_dir: Option<&Path>) -> ExitCode {
    let Some(marker_dir) = marker_dir else {
        eprintln!("No project scope found (no {MARKER_DIR} directory here or in any parent)");
        return ExitCode::SUCCESS;
    };

    let settings = Arc::new(Settings::load_or_default(marker_dir));
    let mut loader = FileCommandLoader::new(settings);
    if let Some(dir) = start_dir {
        loader = loader.with_start_dir(dir.to_path_buf());
    }
    let commands = loader.load_commands(&CancellationToken::new()).await;

    if commands.is_empty() {
        eprintln!(
            "No commands found in {}",
            marker_dir.join(COMMANDS_DIR).display()
        );
        return ExitCode::SUCCESS;
    }

    print!("{}", render_table(&commands));
    ExitCode::SUCCESS
}

/// Render the command table: slash-prefixed names, padded, then descriptions.
fn render_table(commands: &[SlashCommand]) -> String {
    let width = commands.iter().map(|c| c.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for command in commands {
        let _ = writeln!(out, "/{:<width$}  {}", command.name, command.description);
    }
    out
}
