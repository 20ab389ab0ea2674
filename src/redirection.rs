//! Redirection / output engine.
//!
//! Every piece of shell-internal output — built-in results, "command not
//! found" messages, parse errors — passes through `write`, which trims
//! trailing whitespace, NFC-normalizes, and ensures exactly one trailing
//! newline before routing to stdout, stderr, or a redirection target.

use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::parser::types::{RedirectFd, RedirectMode, RedirectionSpec};

/// Where a single `write` call's content ultimately lands.
#[derive(Debug, PartialEq, Eq)]
enum Destination {
    Stdout,
    Stderr,
    File(PathBuf, RedirectMode),
}

fn destination(is_error: bool, redir: Option<&RedirectionSpec>, cwd: &Path) -> Destination {
    let Some(r) = redir else {
        return if is_error { Destination::Stderr } else { Destination::Stdout };
    };
    match (r.fd, is_error) {
        (RedirectFd::Stdout, false) => Destination::File(resolve_target(cwd, &r.target_path), r.mode),
        (RedirectFd::Stderr, true) => Destination::File(resolve_target(cwd, &r.target_path), r.mode),
        (_, true) => Destination::Stderr,
        (_, false) => Destination::Stdout,
    }
}

fn resolve_target(cwd: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        cwd.join(target)
    }
}

/// Trim trailing whitespace, NFC-normalize, and ensure exactly one trailing
/// newline if the content is nonempty.
fn normalize(content: &str) -> String {
    let trimmed = content.trim_end();
    if trimmed.is_empty() {
        return String::new();
    }
    let normalized: String = trimmed.nfc().collect();
    format!("{}\n", normalized)
}

/// Write `content` to stdout/stderr or to a redirection target, following
/// the routing table below. Returns `true` if the write completed
/// without error.
pub fn write(content: &str, is_error: bool, redir: Option<&RedirectionSpec>, cwd: &Path) -> bool {
    let normalized = normalize(content);
    match destination(is_error, redir, cwd) {
        Destination::Stdout => {
            if !normalized.is_empty() {
                print!("{}", normalized);
            }
            true
        }
        Destination::Stderr => {
            if !normalized.is_empty() {
                eprint!("{}", normalized);
            }
            true
        }
        Destination::File(path, mode) => {
            log::debug!("routing output to {} (mode {:?})", path.display(), mode);
            match write_file(&path, &normalized, mode) {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("{}: {}", path.display(), e);
                    false
                }
            }
        }
    }
}

fn write_file(path: &Path, content: &str, mode: RedirectMode) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true);
    match mode {
        RedirectMode::Truncate => options.truncate(true),
        RedirectMode::Append => options.append(true),
    };
    use std::io::Write as _;
    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())
}
