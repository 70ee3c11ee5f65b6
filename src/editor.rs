use std::borrow::Cow::{self, Borrowed, Owned};

use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::history::History;
use rustyline::{Context, Editor, Helper, Hinter, Validator};

use crate::prompt::{InputError, LineSource};

/// Shell prompt
pub(crate) const PROMPT: &str = "fintrack> ";

const COMMANDS: [&str; 7] = ["add", "view", "plot", "about", "help", "quit", "exit"];

/// Completes command names at the start of the line
pub(crate) struct CommandCompleter;

impl Completer for CommandCompleter {
    type Candidate = String;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<String>)> {
        let word_start = line[..pos].rfind(' ').map(|i| i + 1).unwrap_or(0);
        let word = &line[word_start..pos];
        // Only the first word is a command, except `plot` which ends a `view` line
        let candidates = COMMANDS.iter()
            .filter(|c| c.starts_with(&word.to_lowercase()))
            .filter(|c| (word_start == 0) != (**c == "plot"))
            .map(|c| c.to_string())
            .collect();
        Ok((word_start, candidates))
    }
}

#[derive(Helper, Hinter, Validator)]
pub(crate) struct FintrackHelper {
    pub(crate) completer: CommandCompleter,
    #[rustyline(Hinter)]
    pub(crate) hinter: HistoryHinter,
    pub(crate) colored_prompt: String,
}

impl FintrackHelper {
    pub(crate) fn new() -> FintrackHelper {
        FintrackHelper {
            completer: CommandCompleter,
            hinter: HistoryHinter {},
            colored_prompt: format!("\x1b[1;32m{PROMPT}\x1b[0m"),
        }
    }
}

impl Completer for FintrackHelper {
    type Candidate = String;

    fn complete(&self, line: &str, pos: usize, ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<String>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for FintrackHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        // Field prompts of the validator stay plain
        if default && prompt == PROMPT {
            Borrowed(&self.colored_prompt)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned("\x1b[2m".to_owned() + hint + "\x1b[m")
    }
}

impl<H: Helper, I: History> LineSource for Editor<H, I> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, InputError> {
        match self.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => Err(InputError::Interrupted),
            Err(err) => Err(InputError::Readline(err.to_string())),
        }
    }
}
