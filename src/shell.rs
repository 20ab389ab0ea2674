//! The shell environment: ties together history, completion, environment,
//! and cwd state across the session.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::builtins::CommandRegistry;
use crate::completion::CompletionEngine;
use crate::history::HistoryStore;
use crate::parser::{parse_pipeline, split_path_env, ESCAPE_WORDS};
use crate::tokenizer::tokenize;
use crate::{executor, redirection};

const DEFAULT_HISTFILE: &str = "./log/history.txt";

/// Construction options, narrowed to
/// what a real-filesystem interactive shell needs.
#[derive(Default)]
pub struct ShellOptions {
    pub env: Option<HashMap<String, String>>,
    pub cwd: Option<PathBuf>,
}

pub struct Shell {
    cwd: PathBuf,
    env: HashMap<String, String>,
    history: HistoryStore,
    histfile: PathBuf,
    registry: CommandRegistry,
    pub completion: CompletionEngine,
}

impl Shell {
    pub fn new(options: ShellOptions) -> std::io::Result<Self> {
        let env = options.env.unwrap_or_else(|| std::env::vars().collect());
        let cwd = options
            .cwd
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        let histfile = env
            .get("HISTFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTFILE));
        let history = HistoryStore::load(&histfile)?;

        let mut completion = CompletionEngine::new();
        populate_trie(&mut completion, &env);

        Ok(Self {
            cwd,
            env,
            history,
            histfile,
            registry: CommandRegistry::new(),
            completion,
        })
    }

    pub fn cwd(&self) -> &std::path::Path {
        &self.cwd
    }

    fn home_dir(&self) -> String {
        self.env
            .get("HOME")
            .cloned()
            .or_else(|| dirs::home_dir().map(|p| p.display().to_string()))
            .unwrap_or_default()
    }

    /// Process one line read from the prompt: record it in history, then
    /// tokenize/parse/execute it. Returns `true` if the session should keep
    /// running, `false` on the exit group.
    pub async fn run_line(&mut self, line: &str) -> bool {
        self.history.push(line.to_string());

        if line.trim().is_empty() {
            return true;
        }

        let tokens = tokenize(line, &self.home_dir());
        let head = tokens.first().map(|t| t.text.as_str());

        if let Some(head) = head {
            if tokens.len() == 1 && ESCAPE_WORDS.contains(&head) {
                return false;
            }
        }

        let pipeline = match parse_pipeline(tokens) {
            Ok(p) => p,
            Err(e) => {
                redirection::write(&format!("{}: {}", line, e), true, None, &self.cwd);
                return true;
            }
        };

        // A single-stage pipeline whose head is an escape word (checked
        // above against the raw tokens) never reaches here; a multi-stage
        // pipeline with an escape word mid-chain is classified normally by
        // the executor and falls through like any other unresolvable head.
        executor::run_pipeline(&pipeline, &mut self.cwd, &self.env, &mut self.history, &self.registry).await;
        true
    }

    /// Flush the tail of this session's history to `HISTFILE` on the exit
    /// group. Returns the process exit code.
    pub fn shutdown(&self) -> i32 {
        match self.history.flush_tail(&self.histfile) {
            Ok(()) => 0,
            Err(e) => {
                redirection::write(&format!("history: {}: {}", self.histfile.display(), e), true, None, &self.cwd);
                1
            }
        }
    }
}

/// Seed the trie from built-in names and every executable file in each
/// `PATH` directory, silently skipping directories that can't be read
/// at startup.
fn populate_trie(completion: &mut CompletionEngine, env: &HashMap<String, String>) {
    for name in crate::parser::BUILTIN_NAMES {
        completion.insert(name);
    }

    let Some(path_env) = env.get("PATH") else {
        log::debug!("PATH unset, trie seeded with built-ins only");
        return;
    };
    let mut count = 0;
    for dir in split_path_env(path_env) {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            log::debug!("skipping unreadable PATH entry {}", dir.display());
            continue;
        };
        for entry in entries.flatten() {
            if let Ok(name) = entry.file_name().into_string() {
                if is_executable(&entry.path()) {
                    completion.insert(&name);
                    count += 1;
                }
            }
        }
    }
    log::debug!("trie seeded with {} executables from PATH", count);
}

#[cfg(unix)]
fn is_executable(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &std::path::Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
