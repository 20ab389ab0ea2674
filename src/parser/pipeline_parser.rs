//! Pipeline split and redirection extraction.

use crate::error::ParseError;
use crate::tokenizer::Token;

use super::types::{Pipeline, PipeSourceFd, RedirectFd, RedirectMode, RedirectionSpec, Stage};

const REDIRECT_OPERATORS: &[(&str, RedirectFd, RedirectMode)] = &[
    (">", RedirectFd::Stdout, RedirectMode::Truncate),
    (">>", RedirectFd::Stdout, RedirectMode::Append),
    ("1>", RedirectFd::Stdout, RedirectMode::Truncate),
    ("1>>", RedirectFd::Stdout, RedirectMode::Append),
    ("2>", RedirectFd::Stderr, RedirectMode::Truncate),
    ("2>>", RedirectFd::Stderr, RedirectMode::Append),
];

/// Split tokens into pipeline segments on unquoted `|`/`|&`, extract each
/// stage's redirection, and return the assembled `Pipeline`.
pub fn parse_pipeline(tokens: Vec<Token>) -> Result<Pipeline, ParseError> {
    let mut stages: Vec<Stage> = Vec::new();
    let mut segment: Vec<Token> = Vec::new();

    for token in tokens {
        if token.is_operator("|") || token.is_operator("|&") {
            if segment.is_empty() {
                return Err(ParseError::EmptyPipelineSegment);
            }
            let outgoing = if token.is_operator("|&") {
                PipeSourceFd::Stderr
            } else {
                PipeSourceFd::Stdout
            };
            let mut stage = build_stage(std::mem::take(&mut segment))?;
            stage.pipe_source_fd = outgoing;
            stages.push(stage);
            continue;
        }
        segment.push(token);
    }

    if segment.is_empty() {
        return Err(ParseError::EmptyPipelineSegment);
    }
    stages.push(build_stage(segment)?);

    Ok(Pipeline { stages })
}

/// Extract the first redirection operator from a stage's tokens (if any)
/// and build the resulting `Stage` with the operator and its target removed
/// from argv.
fn build_stage(tokens: Vec<Token>) -> Result<Stage, ParseError> {
    let mut argv = Vec::with_capacity(tokens.len());
    let mut redirection: Option<RedirectionSpec> = None;
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        let matched = REDIRECT_OPERATORS
            .iter()
            .find(|(op, _, _)| token.is_operator(op));

        if let Some((_, fd, mode)) = matched {
            if redirection.is_some() {
                return Err(ParseError::DuplicateRedirection);
            }
            let target = iter.next().ok_or(ParseError::MissingRedirectionTarget)?;
            redirection = Some(RedirectionSpec {
                fd: *fd,
                mode: *mode,
                target_path: target.text.into(),
            });
            continue;
        }

        argv.push(token.text);
    }

    if argv.is_empty() {
        return Err(ParseError::EmptyPipelineSegment);
    }

    Ok(Stage {
        argv,
        redirection,
        pipe_source_fd: PipeSourceFd::default(),
    })
}
