use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use octocrab::models::InstallationId;
use tokio::sync::mpsc;
use tower::limit::ConcurrencyLimitLayer;
use tracing::Instrument;

use crate::community::{
    handle_pull_request, help_text, LabelOutcome, PullRequestEvent, RepositoryLoader,
};
use crate::config::BotConfig;
use crate::github::webhook::{GitHubWebhook, WebhookSecret};
use crate::owners::OwnersLoader;
use crate::utils::logging::LogError;

/// Shared server state for all axum handlers.
pub struct ServerState {
    event_queue: mpsc::Sender<PullRequestEvent>,
    webhook_secret: WebhookSecret,
    config: BotConfig,
}

impl ServerState {
    pub fn new(
        event_queue: mpsc::Sender<PullRequestEvent>,
        webhook_secret: WebhookSecret,
        config: BotConfig,
    ) -> Self {
        Self {
            event_queue,
            webhook_secret,
            config,
        }
    }

    pub fn get_webhook_secret(&self) -> &WebhookSecret {
        &self.webhook_secret
    }
}

pub type ServerStateRef = Arc<ServerState>;

pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/github", post(github_webhook_handler))
        .route("/health", get(health_handler))
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(Arc::new(state))
}

async fn index_handler() -> impl IntoResponse {
    (StatusCode::OK, help_text())
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "")
}

/// Axum handler that receives a webhook and sends it to a webhook channel.
pub async fn github_webhook_handler(
    State(state): State<ServerStateRef>,
    GitHubWebhook(event): GitHubWebhook,
) -> impl IntoResponse {
    if !state.config.is_enabled_for(&event.repository) {
        tracing::debug!(
            "Ignoring event from repository {}, which is not enabled",
            event.repository
        );
        return (StatusCode::OK, "");
    }

    match state.event_queue.send(event).await {
        Ok(_) => (StatusCode::OK, ""),
        Err(err) => {
            tracing::error!("Could not send webhook event: {err:?}");
            (StatusCode::INTERNAL_SERVER_ERROR, "")
        }
    }
}

/// External services needed to handle pull request events.
pub struct BotContext {
    repositories: Box<dyn RepositoryLoader>,
    owners: Box<dyn OwnersLoader>,
}

impl BotContext {
    pub fn new(repositories: Box<dyn RepositoryLoader>, owners: Box<dyn OwnersLoader>) -> Self {
        Self {
            repositories,
            owners,
        }
    }
}

/// Creates a future with a process that continuously receives webhook events and reacts to
/// them. The process ends once all senders are dropped.
pub fn create_bot_process(
    ctx: BotContext,
) -> (mpsc::Sender<PullRequestEvent>, impl Future<Output = ()>) {
    let (tx, mut rx) = mpsc::channel::<PullRequestEvent>(1024);

    let service = async move {
        while let Some(event) = rx.recv().await {
            let span = tracing::info_span!(
                "PullRequest",
                repo = event.repository.to_string(),
                pr = event.pr_number.0,
                action = event.action.to_string()
            );
            tracing::debug!("Received pull request event: {event:#?}");
            if let Err(error) = handle_event(&ctx, &event).instrument(span.clone()).await {
                span.log_error(error);
            }
        }
    };
    (tx, service)
}

async fn handle_event(ctx: &BotContext, event: &PullRequestEvent) -> anyhow::Result<LabelOutcome> {
    if !event.is_relevant() {
        tracing::trace!("Ignoring pull request action {}", event.action);
        return Ok(LabelOutcome::Ignored);
    }

    let client = ctx
        .repositories
        .load_repository(&event.repository, event.installation.map(InstallationId))?;
    let outcome = handle_pull_request(client.as_ref(), ctx.owners.as_ref(), event).await?;
    tracing::debug!("Pull request handled: {outcome:?}");
    Ok(outcome)
}
