use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rcdiscuss::domain::NavigationParams;
use rcdiscuss::domain::entities::{AuthToken, Credentials, SourceChannel, SourceMessage};
use rcdiscuss::infrastructure::{AppConfig, CliArgs, ConfigStore, RocketChatClient};
use rcdiscuss::presentation::i18n::Translator;
use rcdiscuss::presentation::theme::Theme;
use rcdiscuss::presentation::{App, AppOptions};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_translator(config: &AppConfig) -> Translator {
    let Some(path) = &config.translations else {
        return Translator::new();
    };

    Translator::from_file(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Falling back to built-in strings");
        Translator::new()
    })
}

fn navigation_params(args: &CliArgs) -> NavigationParams {
    let mut params = NavigationParams::default();
    if let Some(rid) = &args.channel {
        let mut channel = SourceChannel::new(rid.clone());
        if let Some(title) = &args.channel_title {
            channel = channel.with_title(title.clone());
        }
        params = params.with_channel(channel);
    }
    if let (Some(id), Some(text)) = (&args.message_id, &args.message_text) {
        params = params.with_message(SourceMessage::new(id.clone(), text.clone()));
    }
    params
}

fn create_app() -> Result<App> {
    let args = CliArgs::parse();

    let store = ConfigStore::new()?;
    let mut config = store.load(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;

    info!(version = rcdiscuss::VERSION, "Starting {}", rcdiscuss::NAME);

    let server = config
        .server
        .url
        .clone()
        .ok_or_else(|| eyre!("no server configured, pass --server or set server.url"))?;
    let user_id = config
        .server
        .user_id
        .clone()
        .ok_or_else(|| eyre!("no user id, pass --user-id or set RCDISCUSS_USER_ID"))?;
    let token = args
        .auth_token
        .as_deref()
        .ok_or_else(|| eyre!("no auth token, pass --auth-token or set RCDISCUSS_AUTH_TOKEN"))?;
    let token =
        AuthToken::new(token).ok_or_else(|| eyre!("auth token is malformed"))?;

    let client = Arc::new(RocketChatClient::new(
        server,
        Credentials::new(user_id, token),
        config.network.request_timeout(),
    )?);

    let options = AppOptions {
        title_settings: config.title_settings(),
        quiet_period: config.search.quiet_period(),
        translator: load_translator(&config),
        theme: Theme::new(config.theme),
    };

    Ok(App::new(
        &navigation_params(&args),
        client.clone(),
        client,
        options,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
