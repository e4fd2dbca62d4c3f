//! Parsing of individual TOML command files

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::commands::descriptor::{
    CommandAction, CommandKind, Directive, ExecutionContext, SlashCommand,
};

/// Extension command files must carry.
pub const COMMAND_FILE_EXT: &str = "toml";

/// Errors scoped to a single command file
#[derive(Error, Debug)]
pub enum CommandFileError {
    #[error("Unable to read command file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse TOML command file {path}: {source}")]
    Toml {
        source: toml::de::Error,
        path: PathBuf,
    },
    #[error("Command file has an unusable name: {0}")]
    InvalidName(PathBuf),
}

/// Outcome of parsing a single command file.
#[derive(Debug)]
pub enum Parsed {
    /// A valid command definition.
    Command(SlashCommand),
    /// Valid TOML, but `description` is absent, not a string, or empty.
    MissingDescription,
}

/// Action for file-defined commands: echoes the command name back to the host
/// as the prompt to submit. Command files don't carry prompt bodies yet, so
/// the name is all there is to forward.
struct SubmitNameAction {
    name: String,
}

#[async_trait]
impl CommandAction for SubmitNameAction {
    async fn invoke(&self, _ctx: &ExecutionContext, _args: &str) -> Directive {
        Directive::SubmitPrompt {
            content: self.name.clone(),
        }
    }
}

/// Derive a command name from its file path (`foo.toml` becomes `foo`).
///
/// # Errors
///
/// Returns `CommandFileError::InvalidName` for paths without a UTF-8 stem.
pub fn command_name(path: &Path) -> Result<String, CommandFileError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| CommandFileError::InvalidName(path.to_path_buf()))
}

/// Parse the contents of one command file.
///
/// The file is a TOML table whose top-level `description` string is the only
/// key this crate reads; everything else is ignored. A `description` that is
/// absent, not a string, or empty makes the file invisible rather than
/// broken, so it is reported as `Parsed::MissingDescription` instead of an
/// error.
///
/// # Errors
///
/// Returns `CommandFileError::Toml` on syntax errors and
/// `CommandFileError::InvalidName` for paths without a UTF-8 stem.
pub fn parse_command_file(path: &Path, contents: &str) -> Result<Parsed, CommandFileError> {
    let name = command_name(path)?;
    let table: toml::Table = toml::from_str(contents).map_err(|e| CommandFileError::Toml {
        source: e,
        path: path.to_path_buf(),
    })?;

    let description = table.get("description").and_then(toml::Value::as_str);
    let Some(description) = description.filter(|d| !d.is_empty()) else {
        return Ok(Parsed::MissingDescription);
    };

    let action = SubmitNameAction { name: name.clone() };
    Ok(Parsed::Command(SlashCommand::new(
        name,
        description.to_string(),
        CommandKind::Custom,
        true,
        Arc::new(action),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Settings;

    fn parse(file_name: &str, contents: &str) -> Result<Parsed, CommandFileError> {
        parse_command_file(Path::new(file_name), contents)
    }

    fn test_context() -> ExecutionContext {
        ExecutionContext {
            cwd: PathBuf::from("."),
            settings: Arc::new(Settings::default()),
        }
    }

    #[test]
    fn test_valid_command_file() {
        let parsed = parse("foo.toml", r#"description = "Does foo""#).unwrap();
        match parsed {
            Parsed::Command(command) => {
                assert_eq!(command.name, "foo");
                assert_eq!(command.description, "Does foo");
                assert_eq!(command.kind, CommandKind::Custom);
                assert!(command.auto_execute);
            }
            other => panic!("Expected a command, got: {other:?}"),
        }
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let parsed = parse(
            "deploy.toml",
            r#"
description = "Deploy the thing"
timeout = 30

[env]
STAGE = "prod"
"#,
        )
        .unwrap();
        match parsed {
            Parsed::Command(command) => assert_eq!(command.name, "deploy"),
            other => panic!("Expected a command, got: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_toml() {
        let result = parse("bad.toml", "description = \"unterminated");
        match result {
            Err(CommandFileError::Toml { path, .. }) => {
                assert_eq!(path, Path::new("bad.toml"));
            }
            other => panic!("Expected CommandFileError::Toml, got: {other:?}"),
        }
    }

    #[test]
    fn test_missing_description() {
        let parsed = parse("noDesc.toml", r#"other = "value""#).unwrap();
        assert!(matches!(parsed, Parsed::MissingDescription));
    }

    #[test]
    fn test_non_string_description() {
        let parsed = parse("numeric.toml", "description = 3").unwrap();
        assert!(matches!(parsed, Parsed::MissingDescription));
    }

    #[test]
    fn test_empty_description() {
        let parsed = parse("empty.toml", r#"description = """#).unwrap();
        assert!(matches!(parsed, Parsed::MissingDescription));
    }

    #[tokio::test]
    async fn test_action_echoes_command_name() {
        let Parsed::Command(command) = parse("foo.toml", r#"description = "Does foo""#).unwrap()
        else {
            panic!("Expected a command");
        };

        // The directive carries the name, never the description or arguments.
        let directive = command.invoke(&test_context(), "some --args here").await;
        assert_eq!(
            directive,
            Directive::SubmitPrompt {
                content: "foo".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_completion_is_empty() {
        let Parsed::Command(command) = parse("foo.toml", r#"description = "Does foo""#).unwrap()
        else {
            panic!("Expected a command");
        };
        assert!(command.complete(&test_context(), "f").await.is_empty());
    }
}
