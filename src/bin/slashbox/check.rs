use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use slashbox::commands::file::{COMMAND_FILE_EXT, Parsed};
use slashbox::commands::loader::{self, COMMANDS_DIR};

/// ANSI color helpers, only emitting escape codes when stderr is a terminal.
struct Style {
    color: bool,
}

impl Style {
    fn new() -> Self {
        Self {
            color: std::io::stderr().is_terminal(),
        }
    }

    fn style(&self, code: &str, s: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }

    fn bold(&self, s: &str) -> String {
        self.style("1", s)
    }

    fn green(&self, s: &str) -> String {
        self.style("32", s)
    }

    fn red(&self, s: &str) -> String {
        self.style("31", s)
    }

    fn yellow(&self, s: &str) -> String {
        self.style("33", s)
    }

    fn dim(&self, s: &str) -> String {
        self.style("2", s)
    }
}

/// Run the check subcommand: lint every command file strictly.
///
/// Unlike the loader, nothing is skipped silently here: parse failures and
/// files without a usable `description` are both reported, and either makes
/// the check fail. Returns the process exit code.
pub async fn run(marker_dir: Option<&Path>) -> i32 {
    let sty = Style::new();
    let Some(marker_dir) = marker_dir else {
        eprintln!("{}", sty.dim("No project scope found, nothing to check."));
        return 0;
    };

    let commands_dir = marker_dir.join(COMMANDS_DIR);
    let Some(files) = command_files(&commands_dir) else {
        eprintln!(
            "{}",
            sty.dim(&format!(
                "No commands directory in {}, nothing to check.",
                marker_dir.display()
            ))
        );
        return 0;
    };

    if files.is_empty() {
        eprintln!("{}", sty.dim("No command files found."));
        return 0;
    }

    let total = files.len();
    let counter_width = total.to_string().len();
    let mut ok = 0usize;
    let mut broken = 0usize;
    let mut undescribed = 0usize;

    for (i, path) in files.iter().enumerate() {
        let idx = i + 1;
        let prefix = format!("[{idx:>counter_width$}/{total}]");
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match loader::load_file(path).await {
            Ok(Parsed::Command(command)) => {
                eprintln!(
                    "{} {} {} {}",
                    sty.bold(&prefix),
                    file_name,
                    sty.green("OK"),
                    sty.dim(&format!("(/{})", command.name))
                );
                ok += 1;
            }
            Ok(Parsed::MissingDescription) => {
                eprintln!(
                    "{} {} {}",
                    sty.bold(&prefix),
                    file_name,
                    sty.yellow("NO DESCRIPTION")
                );
                undescribed += 1;
            }
            Err(e) => {
                eprintln!("{} {} {}", sty.bold(&prefix), file_name, sty.red("BROKEN"));
                eprintln!("        {e}");
                broken += 1;
            }
        }
    }

    eprintln!();
    let mut parts = Vec::new();
    if ok > 0 {
        parts.push(sty.green(&format!("{ok} ok")));
    }
    if broken > 0 {
        parts.push(sty.red(&format!("{broken} broken")));
    }
    if undescribed > 0 {
        parts.push(sty.yellow(&format!("{undescribed} without description")));
    }
    eprintln!(
        "{} {}",
        sty.bold(&format!("{total} command files:")),
        parts.join(&sty.dim(", "))
    );

    i32::from(broken + undescribed > 0)
}

/// Collect the `.toml` files in the commands directory, sorted by name for
/// stable report order. `None` when the directory cannot be listed.
fn command_files(commands_dir: &Path) -> Option<Vec<PathBuf>> {
    let entries = std::fs::read_dir(commands_dir).ok()?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == COMMAND_FILE_EXT))
        .collect();
    files.sort();
    Some(files)
}
