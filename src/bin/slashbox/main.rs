mod check;
mod list;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use slashbox::project;

#[derive(Parser, Debug)]
#[command(
    name = "slashbox",
    about = "Inspect project-local slash commands for Gemini-style CLIs"
)]
struct Cli {
    /// Directory to start the project search from (defaults to the working directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Log file path (enables file logging in addition to stderr)
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the slash commands visible from here (default)
    List,
    /// Lint every command file and report the broken ones
    Check,
    /// Print the resolved marker directory
    Root,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli.log_file.as_ref().map(std::fs::File::create).transpose()?;
    slashbox::logger::init(log_file);

    let marker_dir = match cli.dir {
        Some(ref dir) => project::find_marker_dir_from(dir),
        None => project::find_marker_dir(),
    };

    match cli.command {
        Some(Commands::Check) => {
            let code = check::run(marker_dir.as_deref()).await;
            Ok(if code == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(Commands::Root) => Ok(match marker_dir {
            Some(dir) => {
                println!("{}", dir.display());
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("No {} directory found", project::MARKER_DIR);
                ExitCode::FAILURE
            }
        }),
        Some(Commands::List) | None => {
            Ok(list::run(marker_dir.as_deref(), cli.dir.as_deref()).await)
        }
    }
}
