use async_trait::async_trait;

use crate::parser::{resolve_in_path, split_path_env, BUILTIN_NAMES};

use super::{Command, CommandContext, CommandResult};

pub struct TypeCommand;

#[async_trait]
impl Command for TypeCommand {
    fn name(&self) -> &'static str {
        "type"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let name = match ctx.args.first() {
            Some(n) => n,
            None => return CommandResult::error("type: please include an argument".to_string()),
        };

        if BUILTIN_NAMES.contains(&name.as_str()) {
            return CommandResult::success(format!("{} is a shell builtin", name));
        }

        match ctx.env.get("PATH").filter(|p| !p.is_empty()) {
            None => CommandResult::success(format!("{}: please set PATH", name)),
            Some(path_env) => {
                let dirs = split_path_env(path_env);
                match resolve_in_path(name, &dirs) {
                    Some(full) => CommandResult::success(format!("{} is {}", name, full.display())),
                    None => CommandResult::success(format!("{}: not found", name)),
                }
            }
        }
    }
}
