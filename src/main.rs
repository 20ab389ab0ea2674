//! Entry point: wires the line editor to the shell's completion engine and
//! drives the read-tokenize-parse-execute loop.

use std::cell::RefCell;
use std::rc::Rc;

use rustyline::completion::{Completer, Pair};
use rustyline::config::{Config, CompletionType};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use tinysh::completion::{format_columns, CompletionOutcome};
use tinysh::shell::{Shell, ShellOptions};

const PROMPT: &str = "$ ";

struct ShellHelper {
    shell: Rc<RefCell<Shell>>,
}

impl Helper for ShellHelper {}

impl Hinter for ShellHelper {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        None
    }
}

impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos].rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
        let prefix = &line[start..pos];

        let mut shell = self.shell.borrow_mut();
        match shell.completion.complete(prefix, std::time::Instant::now()) {
            CompletionOutcome::NoMatch => {
                ring_bell();
                Ok((pos, vec![]))
            }
            CompletionOutcome::Single(word) => Ok((
                start,
                vec![Pair { display: word.clone(), replacement: format!("{} ", word) }],
            )),
            CompletionOutcome::ExtendToLcp(lcp) => {
                Ok((start, vec![Pair { display: lcp.clone(), replacement: lcp }]))
            }
            CompletionOutcome::AmbiguousFirstTab => {
                ring_bell();
                Ok((pos, vec![]))
            }
            CompletionOutcome::AmbiguousSecondTab(mut matches) => {
                matches.sort();
                print!("\n{}", format_columns(&matches, terminal_width()));
                Ok((pos, vec![]))
            }
        }
    }
}

/// Writing `\x07` to stderr is the portable fallback this shell uses
/// everywhere rather than special-casing per-platform sound APIs.
fn ring_bell() {
    use std::io::Write;
    let _ = std::io::stderr().write_all(b"\x07");
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(80)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let shell = match Shell::new(ShellOptions::default()) {
        Ok(shell) => Rc::new(RefCell::new(shell)),
        Err(e) => {
            eprintln!("tinysh: failed to start: {}", e);
            std::process::exit(1);
        }
    };

    let config = Config::builder().completion_type(CompletionType::List).build();
    let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::with_config(config).expect("terminal init");
    editor.set_helper(Some(ShellHelper { shell: Rc::clone(&shell) }));

    let exit_code = loop {
        let readline = editor.readline(PROMPT);
        match readline {
            Ok(line) => {
                log::trace!("read line: {:?}", line);
                let keep_going = shell.borrow_mut().run_line(&line).await;
                if !keep_going {
                    break shell.borrow().shutdown();
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break shell.borrow().shutdown(),
            Err(e) => {
                eprintln!("tinysh: readline error: {}", e);
                break shell.borrow().shutdown();
            }
        }
    };

    std::process::exit(exit_code);
}
