use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::project::Settings;

/// Where a command came from, as understood by the host registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Shipped with the host CLI.
    BuiltIn,
    /// Defined by the user in a project-local command file.
    Custom,
}

/// Instruction a command hands back to the host after running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Submit the given text to the model as a prompt.
    SubmitPrompt { content: String },
}

/// Context a command action is invoked with.
///
/// Owned by the host; the actions built by this crate accept it but do not
/// consult it.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub cwd: PathBuf,
    pub settings: Arc<Settings>,
}

/// Behavior of a slash command: what happens on invocation, and which
/// suggestions it offers while the user is still typing arguments.
#[async_trait]
pub trait CommandAction: Send + Sync {
    /// Run the command with the raw argument string as typed by the user.
    async fn invoke(&self, ctx: &ExecutionContext, args: &str) -> Directive;

    /// Suggest completions for a partially typed argument string.
    async fn complete(&self, _ctx: &ExecutionContext, _partial: &str) -> Vec<String> {
        Vec::new()
    }
}

/// A single loaded slash command, ready for registration in the host palette
#[derive(Clone)]
pub struct SlashCommand {
    pub name: String,
    pub description: String,
    pub kind: CommandKind,
    pub auto_execute: bool,
    action: Arc<dyn CommandAction>,
}

impl SlashCommand {
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        kind: CommandKind,
        auto_execute: bool,
        action: Arc<dyn CommandAction>,
    ) -> Self {
        SlashCommand {
            name,
            description,
            kind,
            auto_execute,
            action,
        }
    }

    /// Run this command's action.
    pub async fn invoke(&self, ctx: &ExecutionContext, args: &str) -> Directive {
        self.action.invoke(ctx, args).await
    }

    /// Completion suggestions for this command's arguments.
    pub async fn complete(&self, ctx: &ExecutionContext, partial: &str) -> Vec<String> {
        self.action.complete(ctx, partial).await
    }
}

impl fmt::Debug for SlashCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlashCommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("kind", &self.kind)
            .field("auto_execute", &self.auto_execute)
            .finish_non_exhaustive()
    }
}
