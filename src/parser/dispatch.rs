//! Classification of a stage's head token into escape / built-in / external /
//! unknown.

use std::path::{Path, PathBuf};

use super::types::CommandKind;

/// Words that terminate the session (the exit group).
pub const ESCAPE_WORDS: &[&str] = &["exit", "quit", "q", "escape", "esc"];

/// Names handled internally rather than dispatched to an external process.
pub const BUILTIN_NAMES: &[&str] = &["echo", "type", "pwd", "cd", "history"];

/// Search `path_dirs` in order for an executable file named `name`.
pub fn resolve_in_path(name: &str, path_dirs: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_dirs {
        let candidate = dir.join(name);
        if is_executable_file(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    matches!(std::fs::metadata(path), Ok(meta) if meta.is_file())
}

/// Classify a stage's head token: escape word, built-in, resolvable
/// external, or unknown. First match wins in that order.
pub fn classify(head: &str, path_dirs: &[PathBuf]) -> CommandKind {
    if ESCAPE_WORDS.contains(&head) {
        return CommandKind::Escape;
    }
    if BUILTIN_NAMES.contains(&head) {
        return CommandKind::Builtin(head.to_string());
    }
    if let Some(path) = resolve_in_path(head, path_dirs) {
        return CommandKind::External(path);
    }
    CommandKind::Unknown
}

/// Split a `PATH`-style environment value into directories using the
/// platform delimiter.
pub fn split_path_env(path_env: &str) -> Vec<PathBuf> {
    std::env::split_paths(path_env).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_words_classify_first() {
        assert_eq!(classify("exit", &[]), CommandKind::Escape);
        assert_eq!(classify("q", &[]), CommandKind::Escape);
    }

    #[test]
    fn builtins_classify_before_path_search() {
        assert_eq!(classify("pwd", &[]), CommandKind::Builtin("pwd".to_string()));
    }

    #[test]
    fn unknown_when_not_found() {
        assert_eq!(classify("nonexistent_xyz_cmd", &[]), CommandKind::Unknown);
    }

    #[test]
    fn resolves_executable_in_path() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("mytool");
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let dirs = vec![dir.path().to_path_buf()];
        assert_eq!(classify("mytool", &dirs), CommandKind::External(exe));
    }

    #[test]
    fn split_path_env_uses_platform_delimiter() {
        let dirs = split_path_env("/usr/bin:/bin");
        assert_eq!(dirs, vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin")]);
    }
}
