use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Context;
use log::debug;
use serde::Deserialize;

const APP_DIR: &str = ".fintrack";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "finance_data.csv";
const HISTORY_FILE: &str = ".fintrack_history";

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// CSV file holding all transactions
    pub(crate) data_file: PathBuf,
    /// How many invalid answers a prompt accepts before giving up
    pub(crate) max_attempts: usize,
    /// Symbol printed in front of totals
    pub(crate) currency: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_file = match app_dir() {
            Some(dir) => dir.join(DATA_FILE),
            None => PathBuf::from(DATA_FILE),
        };

        Config {
            data_file,
            max_attempts: 5,
            currency: "$".to_string(),
        }
    }
}

impl Config {
    /// Load from `file_path`, or from `~/.fintrack/config.toml` when no path is given.
    /// A missing file gives the defaults, a malformed one is an error.
    pub(crate) fn load(file_path: Option<&Path>) -> anyhow::Result<Config> {
        let path = match file_path {
            Some(p) => p.to_path_buf(),
            None => match app_dir() {
                Some(dir) => dir.join(CONFIG_FILE),
                None => return Ok(Config::default()),
            },
        };

        Config::load_from_file(&path)
    }

    pub(crate) fn load_from_file(path: &Path) -> anyhow::Result<Config> {
        if !path.is_file() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.data_file = expand_home(&config.data_file);
        Ok(config)
    }

    /// Command history lives next to the data file
    pub(crate) fn history_file(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(dir) => dir.join(HISTORY_FILE),
            None => PathBuf::from(HISTORY_FILE),
        }
    }
}

fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR))
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
