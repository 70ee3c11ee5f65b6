pub(crate) mod add;
pub(crate) mod about;
pub(crate) mod command;
pub(crate) mod view;

use crate::config::Config;
use crate::controller::command::Command;
use crate::prompt::LineSource;
use crate::store::RecordStore;

/// Whether the shell should keep reading commands
#[derive(Debug, PartialEq)]
pub(crate) enum Outcome {
    Continue,
    Quit,
}

const HELP: &str = "Commands:
  add                          add a transaction
  view [start] [end] [plot]    list transactions between two dd-mm-yyyy dates (inclusive) with totals,
                               `plot` also draws daily income and expenses. Missing dates are prompted for.
  about                        about this program
  help                         show this message
  quit                         leave (Ctrl-D works too)";

/// Run one shell line. Field values are read from `source` when a command needs them.
pub(crate) fn parse_and_run_command<S: LineSource>(store: &RecordStore, config: &Config, source: &mut S, line: &str) -> anyhow::Result<Outcome> {
    let command = match command::parse(line) {
        Ok((_, command)) => command,
        Err(_) => {
            println!("Unknown command '{}'. Type 'help' to list commands.", line.trim());
            return Ok(Outcome::Continue);
        }
    };

    match command {
        Command::Add => {
            add::execute_add(store, config, source, add::AddArgs::default())?;
        }
        Command::View { start, end, plot } => {
            view::execute_view(store, config, source, start.as_deref(), end.as_deref(), plot)?;
        }
        Command::About => println!("{}", about::about_text()),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(Outcome::Quit),
    }

    Ok(Outcome::Continue)
}
