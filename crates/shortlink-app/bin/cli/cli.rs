use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const API_URL_ENV: &str = "SHORTLINK_API_URL";
pub const HISTORY_FILE_ENV: &str = "SHORTLINK_HISTORY_FILE";
pub const TIMEOUT_ENV: &str = "SHORTLINK_TIMEOUT_SECS";
pub const REFRESH_ENV: &str = "SHORTLINK_REFRESH_SECS";
pub const LOG_FORMAT_ENV: &str = "SHORTLINK_LOG_FORMAT";

pub const DEFAULT_TIMEOUT_SECS: &str = "30";
pub const DEFAULT_REFRESH_SECS: &str = "60";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a URL and remember it in the local history.
    Shorten { url: String },
    /// Print recently shortened URLs.
    History,
    /// Forget all recently shortened URLs.
    Clear,
    /// Print the history and keep its age labels up to date until Ctrl-C.
    Watch,
}

#[derive(Debug, Parser)]
#[command(name = "shortlink", about = "Simple URL shortener client")]
pub struct CLI {
    /// Base URL of the shortening service, also used for the printed links.
    #[arg(long, env = API_URL_ENV)]
    pub api_url: String,

    /// Where the history is kept. Defaults to the user's local data directory.
    #[arg(long, env = HISTORY_FILE_ENV)]
    pub history_file: Option<PathBuf>,

    /// Keep the history in memory only, ignoring `--history-file`.
    #[arg(long)]
    pub no_persist: bool,

    #[arg(long, env = TIMEOUT_ENV, default_value = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Seconds between age label refreshes in `watch`.
    #[arg(long, env = REFRESH_ENV, default_value = DEFAULT_REFRESH_SECS)]
    pub refresh_secs: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}
