use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use community_bot::config::BotConfig;
use community_bot::github::{GithubAppClient, WebhookSecret};
use community_bot::owners::OwnersApiClient;
use community_bot::{create_app, create_bot_process, BotContext, ServerState};

#[derive(clap::Parser)]
struct Opts {
    /// Secret used to authenticate webhooks.
    #[arg(long, env = "WEBHOOK_SECRET")]
    webhook_secret: String,

    /// Github App ID.
    #[arg(long, env = "APP_ID")]
    app_id: u64,

    /// Private key used to authenticate as a Github App.
    #[arg(long, env = "PRIVATE_KEY")]
    private_key: String,

    /// Base URL of the service that resolves OWNERS files.
    #[arg(long, env = "OWNERS_URL")]
    owners_url: Url,

    /// Path to a TOML file that selects the repositories handled by the bot.
    #[arg(long, env = "BOT_CONFIG")]
    config: Option<PathBuf>,

    /// Port of the webhook server.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

async fn server(state: ServerState, port: u16) -> anyhow::Result<()> {
    let app = create_app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind to {addr}"))?;

    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let config = match &opts.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };
    tracing::info!("Loaded configuration: {config:?}");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    runtime.block_on(async move {
        // The GitHub client has to be created inside of the runtime
        let github = GithubAppClient::load(
            opts.app_id.into(),
            opts.private_key.into_bytes().into(),
        )?;
        let owners = OwnersApiClient::new(opts.owners_url);

        let (tx, bot_process) =
            create_bot_process(BotContext::new(Box::new(github), Box::new(owners)));
        let state = ServerState::new(tx, WebhookSecret::new(opts.webhook_secret), config);

        tokio::select! {
            () = bot_process => {
                tracing::warn!("Bot process has ended");
                Ok(())
            },
            res = server(state, opts.port) => {
                tracing::warn!("Server has ended: {res:?}");
                res
            }
        }
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
