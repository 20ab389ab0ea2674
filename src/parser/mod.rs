//! Parser & dispatcher.
//!
//! Turns a token stream into a `Pipeline` plan: splitting on pipe operators,
//! extracting per-stage redirections, and classifying each stage's head
//! token against the escape words, the built-in set, and the search path.

pub mod dispatch;
pub mod pipeline_parser;
pub mod types;

pub use dispatch::{classify, resolve_in_path, split_path_env, BUILTIN_NAMES, ESCAPE_WORDS};
pub use pipeline_parser::parse_pipeline;
pub use types::{CommandKind, PipeSourceFd, RedirectFd, RedirectMode, RedirectionSpec, Pipeline, Stage};
