use super::app_config::{LogLevel, ThemeName};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "rcdiscuss",
    version,
    about = "Start a Rocket.Chat discussion from the terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Server base URL.
    #[arg(long, value_name = "URL", env = "RCDISCUSS_SERVER")]
    pub server: Option<String>,

    /// Id of the authenticated user.
    #[arg(long, env = "RCDISCUSS_USER_ID")]
    pub user_id: Option<String>,

    /// Auth token of the authenticated user.
    #[arg(long, env = "RCDISCUSS_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Parent channel to pre-select.
    #[arg(long, value_name = "RID")]
    pub channel: Option<String>,

    /// Title shown for the pre-selected channel.
    #[arg(long, value_name = "TITLE", requires = "channel")]
    pub channel_title: Option<String>,

    /// Message the discussion starts from.
    #[arg(long, value_name = "ID", requires = "message_text")]
    pub message_id: Option<String>,

    /// Text of that message, used as the default discussion name.
    #[arg(long, value_name = "TEXT", requires = "message_id")]
    pub message_text: Option<String>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Colour theme.
    #[arg(long, value_enum)]
    pub theme: Option<ThemeName>,
}
