//! Completion engine: trie + LCP with double-tab disambiguation.
//!
//! The raw terminal driver (reading keystrokes, raw mode, redraw) is an
//! external collaborator (`rustyline`, wired up in `main.rs`); this module is
//! the pure decision logic it calls into on every completion request.

mod trie;

pub use trie::Trie;

use std::time::{Duration, Instant};

use trie::longest_common_prefix;

const DOUBLE_TAB_THRESHOLD: Duration = Duration::from_secs(1);

/// What the terminal driver should do in response to a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// No entry in the trie has `line` as a prefix.
    NoMatch,
    /// Exactly one entry matches; the driver should insert it followed by a
    /// trailing space.
    Single(String),
    /// Multiple entries match and their LCP is longer than `line`; insert
    /// the LCP with no trailing space.
    ExtendToLcp(String),
    /// Multiple entries match, LCP equals `line`, and this is the first tab
    /// at this line (or more than the threshold since the last one): just
    /// ring the bell.
    AmbiguousFirstTab,
    /// Multiple entries match, LCP equals `line`, and this is a second tab
    /// within the threshold: display all matches.
    AmbiguousSecondTab(Vec<String>),
}

/// Holds the trie and the `(last_line, last_timestamp)` pair used to
/// distinguish a first tab from a disambiguating second tab.
pub struct CompletionEngine {
    trie: Trie,
    last_request: Option<(String, Instant)>,
}

impl CompletionEngine {
    pub fn new() -> Self {
        Self { trie: Trie::new(), last_request: None }
    }

    pub fn insert(&mut self, word: &str) {
        self.trie.insert(word);
    }

    /// Run the disambiguation algorithm against `line` at time `now`.
    pub fn complete(&mut self, line: &str, now: Instant) -> CompletionOutcome {
        let matches = self.trie.matches(line);

        if matches.is_empty() {
            self.last_request = None;
            return CompletionOutcome::NoMatch;
        }

        if matches.len() == 1 {
            self.last_request = None;
            return CompletionOutcome::Single(matches.into_iter().next().unwrap());
        }

        let lcp = longest_common_prefix(&matches);
        if lcp.len() > line.len() {
            self.last_request = None;
            return CompletionOutcome::ExtendToLcp(lcp);
        }

        let is_repeat_tab = match &self.last_request {
            Some((last_line, last_instant)) => {
                last_line == line && now.duration_since(*last_instant) <= DOUBLE_TAB_THRESHOLD
            }
            None => false,
        };

        if is_repeat_tab {
            self.last_request = None;
            CompletionOutcome::AmbiguousSecondTab(matches)
        } else {
            self.last_request = Some((line.to_string(), now));
            CompletionOutcome::AmbiguousFirstTab
        }
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay `matches` out in columns for display after a second ambiguous tab
/// column width is `max_match_length + 2`, column count is
/// `floor(terminal_width / column_width)` (minimum 1).
pub fn format_columns(matches: &[String], terminal_width: usize) -> String {
    if matches.is_empty() {
        return String::new();
    }
    let max_len = matches.iter().map(|m| m.len()).max().unwrap_or(0);
    let column_width = max_len + 2;
    let columns = (terminal_width / column_width).max(1);

    let mut out = String::new();
    for (i, word) in matches.iter().enumerate() {
        if i > 0 && i % columns == 0 {
            out.push('\n');
        }
        out.push_str(&format!("{:<width$}", word, width = column_width));
    }
    out.push('\n');
    out
}
