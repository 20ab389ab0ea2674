//! Line tokenizer.
//!
//! A deterministic character-by-character state machine over the NFC-
//! normalized input line. Produces a flat list of `Token`s: quote marks are
//! consumed, escapes are resolved, and a leading unquoted `~` is expanded to
//! the user's home directory. An unterminated quote at end-of-input is not
//! an error — the partial token is emitted as-is.

use unicode_normalization::UnicodeNormalization;

/// A single word extracted from the input line.
///
/// `quoted` records whether any part of the token passed through a quote or
/// an escape. The parser uses this to decide whether the token's literal
/// text may be interpreted as a redirection or pipe operator — an operator
/// character produced by quoting is never special, so `">"` stays a literal
/// word even though `>` unquoted would start a redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quoted: bool,
}

impl Token {
    fn new(text: String, quoted: bool) -> Self {
        Self { text, quoted }
    }

    /// True if this token's literal text equals `s` and it was not produced
    /// by quoting or escaping (so it may be treated as an operator).
    pub fn is_operator(&self, s: &str) -> bool {
        !self.quoted && self.text == s
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Neutral,
    InSingle,
    InDouble,
    EscapeNeutral,
    EscapeDouble,
}

/// Character-level tokenizer state machine.
struct Tokenizer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    state: State,
    prev_state: State,
    current: String,
    /// Whether any quote/escape has contributed to `current` so far.
    current_quoted: bool,
    tokens: Vec<Token>,
    home_dir: String,
}

impl<'a> Tokenizer<'a> {
    fn new(line: &'a str, home_dir: String) -> Self {
        Self {
            chars: line.chars().peekable(),
            state: State::Neutral,
            prev_state: State::Neutral,
            current: String::new(),
            current_quoted: false,
            tokens: Vec::new(),
            home_dir,
        }
    }

    fn flush(&mut self) {
        if self.current.is_empty() && !self.current_quoted {
            return;
        }
        let text = std::mem::take(&mut self.current);
        let quoted = std::mem::take(&mut self.current_quoted);
        self.tokens.push(Token::new(text, quoted));
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.chars.next() {
            log::trace!("tokenizer state {:?}, char {:?}", self.state, c);
            match self.state {
                State::Neutral => self.step_neutral(c),
                State::InSingle => self.step_single(c),
                State::InDouble => self.step_double(c),
                State::EscapeNeutral => {
                    self.current.push(c);
                    self.current_quoted = true;
                    self.state = self.prev_state;
                }
                State::EscapeDouble => {
                    if matches!(c, '"' | '\\' | '$' | '`') {
                        self.current.push(c);
                    } else {
                        self.current.push('\\');
                        self.current.push(c);
                    }
                    self.current_quoted = true;
                    self.state = self.prev_state;
                }
            }
        }
        self.flush();
        self.tokens
    }

    fn step_neutral(&mut self, c: char) {
        match c {
            '\'' => {
                self.state = State::InSingle;
                self.current_quoted = true;
            }
            '"' => {
                self.state = State::InDouble;
                self.current_quoted = true;
            }
            '\\' => {
                self.prev_state = State::Neutral;
                self.state = State::EscapeNeutral;
            }
            '~' => self.current.push_str(&self.home_dir),
            ' ' | '\t' => self.flush(),
            other => self.current.push(other),
        }
    }

    fn step_single(&mut self, c: char) {
        if c == '\'' {
            self.state = State::Neutral;
        } else {
            self.current.push(c);
        }
    }

    fn step_double(&mut self, c: char) {
        match c {
            '"' => self.state = State::Neutral,
            '\\' => {
                self.prev_state = State::InDouble;
                self.state = State::EscapeDouble;
            }
            other => self.current.push(other),
        }
    }
}

/// Tokenize a single input line. The line is NFC-normalized before the state
/// machine ever sees it, per spec: quoting/escaping/tilde-expansion all
/// operate on normalized text.
pub fn tokenize(line: &str, home_dir: &str) -> Vec<Token> {
    let normalized: String = line.nfc().collect();
    Tokenizer::new(&normalized, home_dir.to_string()).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        tokenize(line, "/home/user")
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(toks("echo hello   world"), vec!["echo", "hello", "world"]);
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(toks("echo 'a  b'"), vec!["echo", "a  b"]);
        assert_eq!(toks(r"echo 'a\nb'"), vec!["echo", r"a\nb"]);
    }

    #[test]
    fn double_quotes_honor_select_escapes() {
        let out = toks(r#"echo "c\"d""#);
        assert_eq!(out, vec!["echo", "c\"d"]);
        // Backslash before a non-special char inside double quotes is literal.
        assert_eq!(toks(r#"echo "a\qb""#), vec!["echo", r"a\qb"]);
    }

    #[test]
    fn unquoted_escape_is_literal_next_char() {
        assert_eq!(toks(r"echo a\ b"), vec!["echo", "a b"]);
    }

    #[test]
    fn tilde_expands_only_unquoted() {
        assert_eq!(toks("~"), vec!["/home/user"]);
        assert_eq!(toks("'~'"), vec!["~"]);
        assert_eq!(toks("\"~\""), vec!["~"]);
    }

    #[test]
    fn unterminated_quote_is_permissive() {
        assert_eq!(toks("echo 'a b"), vec!["echo", "a b"]);
    }

    #[test]
    fn empty_line_yields_no_tokens() {
        assert!(toks("   ").is_empty());
    }

    #[test]
    fn input_is_nfc_normalized_before_tokenizing() {
        // "e\u{0301}" (e + combining acute accent) and "\u{00e9}" (precomposed
        // é) are canonically equivalent; NFC normalization collapses the
        // decomposed form to the precomposed one before the state machine runs.
        let decomposed = "caf\u{0065}\u{0301}";
        let precomposed = "caf\u{00e9}";
        assert_eq!(toks(decomposed), vec![precomposed.to_string()]);
    }

    #[test]
    fn operator_tokens_are_not_quoted() {
        let tokens = tokenize("echo hi > out.txt", "/home/user");
        assert!(tokens[2].is_operator(">"));
        let quoted = tokenize(r#"echo ">" out.txt"#, "/home/user");
        assert!(!quoted[1].is_operator(">"));
    }
}
