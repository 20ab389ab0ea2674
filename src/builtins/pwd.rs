use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct PwdCommand;

#[async_trait]
impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        CommandResult::success(ctx.cwd.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[tokio::test]
    async fn writes_current_working_directory() {
        let mut cwd = PathBuf::from("/home/user/project");
        let env = HashMap::new();
        let mut history = HistoryStore::new();
        let ctx = CommandContext {
            args: vec![],
            cwd: &mut cwd,
            env: &env,
            history: &mut history,
        };
        let result = PwdCommand.execute(ctx).await;
        assert_eq!(result.stdout, "/home/user/project");
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn ignores_extra_args() {
        let mut cwd = PathBuf::from("/");
        let env = HashMap::new();
        let mut history = HistoryStore::new();
        let ctx = CommandContext {
            args: vec!["ignored".into()],
            cwd: &mut cwd,
            env: &env,
            history: &mut history,
        };
        let result = PwdCommand.execute(ctx).await;
        assert_eq!(result.stdout, "/");
    }
}
