use std::{path::PathBuf, str::FromStr};

use clap::{CommandFactory, Parser};

use owl_core::domain::ParseMode;

/// Name, version and author shown by `--version`.
///
/// Passed into [`command`] explicitly instead of patching clap's defaults.
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub long_version: &'static str,
}

pub const APP_INFO: AppInfo = AppInfo {
    name: "telegram-owl",
    version: env!("CARGO_PKG_VERSION"),
    long_version: concat!(
        env!("CARGO_PKG_VERSION"),
        "\n",
        "telegram-owl contributors"
    ),
};

const USAGE_EXAMPLES: &str = "Examples:
  telegram-owl --token=$TOKEN --chat=@mychannel --message \"Hello\"
  echo \"Hi there\" | telegram-owl -t $TOKEN -c 123456789 --stdin
  telegram-owl -t $TOKEN -c @group --attach file.jpg --spoiler";

/// Send messages and attachments to Telegram via the command line.
///
/// A simple CLI tool to send text messages and file attachments to Telegram chats and channels.
#[derive(Debug, Parser)]
#[command(after_help = USAGE_EXAMPLES)]
pub struct Cli {
    /// Telegram bot token (required)
    #[arg(short, long, env = "TELEGRAM_OWL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Chat ID (numeric) or channel username (@channelusername) (required)
    #[arg(short, long, env = "TELEGRAM_OWL_CHAT")]
    pub chat: Option<String>,

    /// Proxy URL for outgoing requests
    #[arg(long, env = "TELEGRAM_OWL_PROXY")]
    pub proxy: Option<String>,

    /// Text message content. Use --stdin to read from standard input.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Message format
    #[arg(short, long, value_name = "markdown|html", value_parser = ParseMode::from_str)]
    pub format: Option<ParseMode>,

    /// File paths of attachments. Can be specified multiple times or comma-separated.
    #[arg(short, long, value_delimiter = ',')]
    pub attach: Vec<PathBuf>,

    /// Send all attachments as documents (bypass media type detection).
    #[arg(short = 'd', long)]
    pub as_document: bool,

    /// Sends the message silently. Users will receive a notification with no sound.
    #[arg(short, long)]
    pub silent: bool,

    /// Cover media attachments with a spoiler animation.
    #[arg(long)]
    pub spoiler: bool,

    /// Protects the message content from forwarding and saving.
    #[arg(long)]
    pub protect: bool,

    /// Disable automatic link previews for messages.
    #[arg(long)]
    pub no_link_preview: bool,

    /// Message thread ID (forum supergroup topics only)
    #[arg(long, env = "TELEGRAM_OWL_THREAD")]
    pub thread: Option<String>,

    /// Read message content from stdin. Example: echo 'Hello, world!' | telegram-owl --stdin
    #[arg(long)]
    pub stdin: bool,
}

pub fn command(info: &AppInfo) -> clap::Command {
    Cli::command()
        .name(info.name)
        .bin_name(info.name)
        .version(info.version)
        .long_version(info.long_version)
}
