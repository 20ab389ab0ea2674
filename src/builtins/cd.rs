use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct CdCommand;

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let target = match ctx.args.first() {
            Some(dir) => dir.clone(),
            None => ctx.env.get("HOME").cloned().unwrap_or_else(|| "/".to_string()),
        };

        let candidate = std::path::Path::new(&target);
        let abspath = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            ctx.cwd.join(candidate)
        };

        match abspath.canonicalize() {
            Ok(resolved) if resolved.is_dir() => {
                *ctx.cwd = resolved;
                CommandResult::success(String::new())
            }
            _ => CommandResult::error(format!(
                "cd: {}: No such file or directory",
                abspath.display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[tokio::test]
    async fn changes_into_existing_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();

        let mut cwd = dir.path().to_path_buf();
        let env = HashMap::new();
        let mut history = HistoryStore::new();
        let ctx = CommandContext {
            args: vec!["sub".into()],
            cwd: &mut cwd,
            env: &env,
            history: &mut history,
        };
        let result = CdCommand.execute(ctx).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(cwd, sub.canonicalize().unwrap());
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cwd = dir.path().to_path_buf();
        let env = HashMap::new();
        let mut history = HistoryStore::new();
        let ctx = CommandContext {
            args: vec!["nope".into()],
            cwd: &mut cwd,
            env: &env,
            history: &mut history,
        };
        let result = CdCommand.execute(ctx).await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("No such file or directory"));
    }

    #[tokio::test]
    async fn no_arg_defaults_to_home() {
        let home = tempfile::tempdir().unwrap();
        let mut cwd = PathBuf::from("/");
        let mut env = HashMap::new();
        env.insert("HOME".to_string(), home.path().display().to_string());
        let mut history = HistoryStore::new();
        let ctx = CommandContext {
            args: vec![],
            cwd: &mut cwd,
            env: &env,
            history: &mut history,
        };
        let result = CdCommand.execute(ctx).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(cwd, home.path().canonicalize().unwrap());
    }
}
