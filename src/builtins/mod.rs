//! Built-in commands: `echo`, `pwd`, `cd`, `type`, `history`.
//!
//! A `Command` trait plus `CommandContext`/`CommandResult` types, narrowed to
//! what a real-filesystem interactive shell needs: no `FileSystem` trait
//! indirection, no exec/fetch callbacks.

mod cd;
mod echo;
mod history_cmd;
mod pwd;
mod type_cmd;

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::history::HistoryStore;

/// Result of running a built-in: collected output plus an exit code.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(stdout: String) -> Self {
        Self { stdout, stderr: String::new(), exit_code: 0 }
    }

    pub fn error(stderr: String) -> Self {
        Self { stdout: String::new(), stderr, exit_code: 1 }
    }
}

/// Everything a built-in needs: its argv, the shell's current environment,
/// and (for `cd`/`history`) mutable access to process-wide shell state.
///
/// Only `history -r` and `cd` mutate shared state from within a
/// stage, and both run synchronously on the main loop — never inside a
/// concurrently-scheduled pipeline stage.
pub struct CommandContext<'a> {
    pub args: Vec<String>,
    pub cwd: &'a mut PathBuf,
    pub env: &'a HashMap<String, String>,
    pub history: &'a mut HistoryStore,
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult;
}

/// Maps a built-in name to its handler (the `BUILTIN_NAMES`
/// set realized as running code).
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut commands: HashMap<&'static str, Box<dyn Command>> = HashMap::new();
        let builtins: Vec<Box<dyn Command>> = vec![
            Box::new(echo::EchoCommand),
            Box::new(pwd::PwdCommand),
            Box::new(cd::CdCommand),
            Box::new(type_cmd::TypeCommand),
            Box::new(history_cmd::HistoryCommand),
        ];
        for cmd in builtins {
            commands.insert(cmd.name(), cmd);
        }
        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
