//! Pipeline executor: wires built-ins and external processes
//! together as uniform "stages" with buffered stdout/stderr.
//!
//! Streaming byte-for-byte between concurrent children is not implemented;
//! each stage's output is fully collected before the next stage runs. This
//! mirrors the `CommandResult` model used by built-ins (`stdout`/`stderr` fully
//! buffered `String`s) and is sufficient for the single-threaded, one-line-
//! at-a-time cooperative loop this shell runs — no observable behavior
//! depends on overlap between stages.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use crate::builtins::{CommandContext, CommandRegistry};
use crate::history::HistoryStore;
use crate::parser::{classify, split_path_env, CommandKind, Pipeline, PipeSourceFd, Stage};
use crate::redirection;

struct StageOutput {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    exit_code: i32,
}

/// Run a parsed pipeline to completion, printing/redirecting output along
/// the way, and return the final stage's exit code.
pub async fn run_pipeline(
    pipeline: &Pipeline,
    cwd: &mut PathBuf,
    env: &HashMap<String, String>,
    history: &mut HistoryStore,
    registry: &CommandRegistry,
) -> i32 {
    let path_dirs = env
        .get("PATH")
        .map(|p| split_path_env(p))
        .unwrap_or_default();

    let mut previous: Option<StageOutput> = None;
    let mut final_code = 0;
    let last_index = pipeline.stages.len() - 1;

    for (i, stage) in pipeline.stages.iter().enumerate() {
        let is_last = i == last_index;
        let stdin_bytes = previous
            .as_ref()
            .map(|prev| match pipeline.stages[i - 1].pipe_source_fd {
                PipeSourceFd::Stdout => prev.stdout.clone(),
                PipeSourceFd::Stderr => prev.stderr.clone(),
            })
            .unwrap_or_default();

        let head = &stage.argv[0];
        let kind = classify(head, &path_dirs);

        let output = run_stage(stage, &kind, stdin_bytes, cwd, env, history, registry, pipeline.stages.len()).await;

        if !is_last {
            // The stream this stage does *not* forward downstream still
            // reaches the terminal directly: child stderr is never
            // swallowed).
            let unforwarded = match stage.pipe_source_fd {
                PipeSourceFd::Stdout => &output.stderr,
                PipeSourceFd::Stderr => &output.stdout,
            };
            if !unforwarded.is_empty() {
                redirection::write(&String::from_utf8_lossy(unforwarded), true, None, cwd);
            }
        } else {
            final_code = output.exit_code;
            // Always call `write`, even on empty content: a redirection
            // target must be created (truncated/opened) as a side effect of
            // the redirection itself, independent of whether this stage
            // actually produced output on that stream.
            redirection::write(&String::from_utf8_lossy(&output.stdout), false, stage.redirection.as_ref(), cwd);
            redirection::write(&String::from_utf8_lossy(&output.stderr), true, stage.redirection.as_ref(), cwd);
        }

        previous = Some(output);
    }

    final_code
}

#[allow(clippy::too_many_arguments)]
async fn run_stage(
    stage: &Stage,
    kind: &CommandKind,
    stdin_bytes: Vec<u8>,
    cwd: &mut PathBuf,
    env: &HashMap<String, String>,
    history: &mut HistoryStore,
    registry: &CommandRegistry,
    stage_count: usize,
) -> StageOutput {
    match kind {
        CommandKind::Builtin(name) => {
            let ctx = CommandContext {
                args: stage.argv[1..].to_vec(),
                cwd,
                env,
                history,
            };
            let command = registry.get(name).expect("classified as builtin");
            let result = command.execute(ctx).await;
            StageOutput {
                stdout: result.stdout.into_bytes(),
                stderr: result.stderr.into_bytes(),
                exit_code: result.exit_code,
            }
        }
        CommandKind::External(path) => spawn_external(path, &stage.argv[1..], stdin_bytes, cwd).await,
        CommandKind::Escape | CommandKind::Unknown => {
            if stage_count == 1 {
                StageOutput {
                    stdout: Vec::new(),
                    stderr: format!("{}: command not found", stage.argv.join(" ")).into_bytes(),
                    exit_code: 127,
                }
            } else {
                // A mid-pipeline stage that doesn't resolve to a known
                // command is still attempted as an external process; any
                // spawn failure surfaces as this stage's error output.
                spawn_external(&PathBuf::from(&stage.argv[0]), &stage.argv[1..], stdin_bytes, cwd).await
            }
        }
    }
}

async fn spawn_external(path: &std::path::Path, args: &[String], stdin_bytes: Vec<u8>, cwd: &std::path::Path) -> StageOutput {
    let mut command = tokio::process::Command::new(path);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match command.spawn() {
        Ok(child) => {
            log::debug!("spawned {} (pid {:?})", path.display(), child.id());
            child
        }
        Err(e) => {
            return StageOutput {
                stdout: Vec::new(),
                stderr: format!("{}: {}", path.display(), e).into_bytes(),
                exit_code: 127,
            }
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        use tokio::io::AsyncWriteExt;
        let _ = stdin.write_all(&stdin_bytes).await;
    }

    match child.wait_with_output().await {
        Ok(output) => {
            log::trace!("{} exited with {:?}", path.display(), output.status.code());
            StageOutput {
                stdout: output.stdout,
                stderr: output.stderr,
                exit_code: output.status.code().unwrap_or(1),
            }
        }
        Err(e) => StageOutput {
            stdout: Vec::new(),
            stderr: format!("{}: {}", path.display(), e).into_bytes(),
            exit_code: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use crate::parser::parse_pipeline;

    fn pipeline(line: &str) -> Pipeline {
        parse_pipeline(tokenize(line, "/home/user")).unwrap()
    }

    #[tokio::test]
    async fn single_builtin_stage_runs_and_returns_exit_code() {
        let p = pipeline("pwd");
        let mut cwd = PathBuf::from("/tmp");
        let env = HashMap::new();
        let mut history = HistoryStore::new();
        let registry = CommandRegistry::new();
        let code = run_pipeline(&p, &mut cwd, &env, &mut history, &registry).await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn unknown_single_stage_reports_command_not_found() {
        let p = pipeline("nonexistent_xyz_cmd arg");
        let mut cwd = PathBuf::from("/tmp");
        let env = HashMap::new();
        let mut history = HistoryStore::new();
        let registry = CommandRegistry::new();
        let code = run_pipeline(&p, &mut cwd, &env, &mut history, &registry).await;
        assert_eq!(code, 127);
    }

    #[tokio::test]
    async fn pipeline_of_builtins_threads_stdout_into_next_stdin() {
        // echo has nothing to read stdin with, so this mostly checks that
        // the final stage's exit code is reported and the run completes.
        let p = pipeline("echo hi | echo bye");
        let mut cwd = PathBuf::from("/tmp");
        let env = HashMap::new();
        let mut history = HistoryStore::new();
        let registry = CommandRegistry::new();
        let code = run_pipeline(&p, &mut cwd, &env, &mut history, &registry).await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn stderr_redirect_writes_real_stderr_content_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline("cat missing_xyz_file 2> err.txt");
        let mut cwd = dir.path().to_path_buf();
        let mut env = HashMap::new();
        env.insert("PATH".to_string(), "/bin:/usr/bin".to_string());
        let mut history = HistoryStore::new();
        let registry = CommandRegistry::new();
        let code = run_pipeline(&p, &mut cwd, &env, &mut history, &registry).await;
        assert_ne!(code, 0);
        let target = dir.path().join("err.txt");
        let content = std::fs::read_to_string(&target).unwrap();
        assert!(!content.is_empty(), "cat's stderr should have been written to err.txt, not the terminal");
    }

    #[tokio::test]
    async fn stderr_redirect_creates_empty_file_when_stage_writes_no_errors() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline("echo hi 2> err.txt");
        let mut cwd = dir.path().to_path_buf();
        let env = HashMap::new();
        let mut history = HistoryStore::new();
        let registry = CommandRegistry::new();
        run_pipeline(&p, &mut cwd, &env, &mut history, &registry).await;
        let target = dir.path().join("err.txt");
        assert!(target.exists());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "");
    }
}
