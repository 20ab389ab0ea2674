//! Shell-level error types.
//!
//! Tokenizer and dispatch failures get their own variants via `thiserror`;
//! filesystem and process failures are surfaced as plain `std::io::Error`
//! and never propagate past the line that produced them.

use thiserror::Error;

/// Errors raised while turning a line into a `Pipeline`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error: duplicate redirection in command")]
    DuplicateRedirection,

    #[error("syntax error near unexpected token `|'")]
    EmptyPipelineSegment,

    #[error("syntax error: missing redirection target")]
    MissingRedirectionTarget,
}
