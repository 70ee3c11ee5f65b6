use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::warn;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use crate::config::Config;
use crate::controller::{Outcome, parse_and_run_command};
use crate::controller::add::AddArgs;
use crate::editor::{FintrackHelper, PROMPT};
use crate::store::RecordStore;
use crate::transaction::Category;

mod chart;
mod config;
mod controller;
mod editor;
mod prompt;
mod report;
mod store;
mod transaction;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Data file path, overrides `data_file` from the config file
    #[clap(short, long)]
    file: Option<PathBuf>,

    /// Config file path, defaults to ~/.fintrack/config.toml
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Without a command an interactive shell is started
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a transaction, prompting for fields not given as options
    Add {
        /// dd-mm-yyyy
        #[clap(long)]
        date: Option<String>,
        #[clap(long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[clap(long, value_enum)]
        category: Option<Category>,
        #[clap(long)]
        description: Option<String>,
    },
    /// List transactions between two dd-mm-yyyy dates, both inclusive, with totals
    View {
        start: Option<String>,
        end: Option<String>,
        /// Draw daily income and expenses
        #[clap(long)]
        plot: bool,
    },
    /// Show what this program is and its version
    About,
}

type FintrackEditor = Editor<FintrackHelper, DefaultHistory>;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(file) = cli.file {
        config.data_file = file;
    }

    let store = RecordStore::new(config.data_file.clone());
    store.initialize_csv()
        .with_context(|| format!("Unable to initialise data file {}", store.path().display()))?;

    let mut rl: FintrackEditor = Editor::new()?;
    rl.set_helper(Some(FintrackHelper::new()));

    match cli.command {
        Some(Commands::Add { date, amount, category, description }) => {
            let args = AddArgs { date, amount, category, description };
            controller::add::execute_add(&store, &config, &mut rl, args)?;
        }
        Some(Commands::View { start, end, plot }) => {
            controller::view::execute_view(&store, &config, &mut rl, start.as_deref(), end.as_deref(), plot)?;
        }
        Some(Commands::About) => println!("{}", controller::about::about_text()),
        None => run_shell(&store, &config, &mut rl),
    }

    Ok(())
}

fn run_shell(store: &RecordStore, config: &Config, rl: &mut FintrackEditor) {
    let history_file = config.history_file();
    if rl.load_history(&history_file).is_err() {
        println!("No previous history.");
    }
    println!("Using {}. Type 'help' to list commands.", store.path().display());

    loop {
        let readline = rl.readline(PROMPT);
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(err) = rl.add_history_entry(line) {
                    warn!("Unable to record history: {}", err);
                }

                match parse_and_run_command(store, config, rl, line) {
                    Ok(Outcome::Quit) => break,
                    Ok(Outcome::Continue) => {}
                    Err(err) => println!("{:#}", err),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break
            }
        }
    }

    if let Err(err) = rl.save_history(&history_file) {
        warn!("Unable to save history to {}: {}", history_file.display(), err);
    }
}
