//! Slash command loading and the descriptor contract
//!
//! Commands are defined one-per-file as TOML documents under the project's
//! `.gemini/commands` directory. The loader turns each valid file into a
//! [`descriptor::SlashCommand`] for the host registry; a broken file never
//! breaks the scan, it is logged and skipped.

pub mod descriptor;
pub mod file;
pub mod loader;
