use std::path::PathBuf;

use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct HistoryCommand;

#[async_trait]
impl Command for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        match ctx.args.first().map(|s| s.as_str()) {
            Some("-r") => match ctx.args.get(1) {
                Some(path) => match ctx.history.read_from(&PathBuf::from(path)) {
                    Ok(()) => CommandResult::success(String::new()),
                    Err(e) => CommandResult::error(format!("history: {}: {}", path, e)),
                },
                None => CommandResult::error("history: -r: missing file argument".to_string()),
            },
            Some("-w") => match ctx.args.get(1) {
                Some(path) => match ctx.history.write_to(&PathBuf::from(path)) {
                    Ok(()) => CommandResult::success(String::new()),
                    Err(e) => CommandResult::error(format!("history: {}: {}", path, e)),
                },
                None => CommandResult::error("history: -w: missing file argument".to_string()),
            },
            Some("-a") => match ctx.args.get(1) {
                Some(path) => match ctx.history.append_to(&PathBuf::from(path)) {
                    Ok(()) => CommandResult::success(String::new()),
                    Err(e) => CommandResult::error(format!("history: {}: {}", path, e)),
                },
                None => CommandResult::error("history: -a: missing file argument".to_string()),
            },
            Some(n) => match n.parse::<usize>() {
                Ok(count) => CommandResult::success(format_entries(ctx.history.last(count), ctx.history.len() - count.min(ctx.history.len()))),
                Err(_) => CommandResult::error(format!("history: {}: numeric argument required", n)),
            },
            None => CommandResult::success(format_entries(ctx.history.all(), 0)),
        }
    }
}

fn format_entries(entries: &[String], start_offset: usize) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!("{:5}  {}\n", start_offset + i + 1, entry));
    }
    out
}
