//! Parser data types.

use std::path::PathBuf;

/// The file descriptor a redirection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectFd {
    Stdout,
    Stderr,
}

/// Truncate vs. append semantics for a redirection target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    Truncate,
    Append,
}

/// `{ fd: 1 | 2, mode: truncate | append, target_path: string }`.
/// Absence on a `Stage` means "inherit parent stdout/stderr".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectionSpec {
    pub fd: RedirectFd,
    pub mode: RedirectMode,
    pub target_path: PathBuf,
}

/// Which of *this* stage's own output streams is forwarded into the next
/// stage's stdin (`|` forwards stdout, `|&` forwards stderr). Meaningless on
/// the last stage of a pipeline, which has nothing downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeSourceFd {
    Stdout,
    Stderr,
}

impl Default for PipeSourceFd {
    fn default() -> Self {
        PipeSourceFd::Stdout
    }
}

/// One command in a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub argv: Vec<String>,
    pub redirection: Option<RedirectionSpec>,
    pub pipe_source_fd: PipeSourceFd,
}

/// An ordered, nonempty sequence of stages. A single-command line
/// is a length-1 pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

/// Tagged classification of a stage's head token, computed after tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Escape,
    Builtin(String),
    External(PathBuf),
    Unknown,
}
