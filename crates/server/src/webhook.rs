use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use tododo_db::{DbPool, SqlTaskRepository};
use tododo_slack::commands::{CommandRouter, SlashCommandPayload};

use crate::engine::TaskCommandEngine;

#[derive(Clone)]
pub struct WebhookState {
    router: Arc<CommandRouter<TaskCommandEngine<SqlTaskRepository>>>,
    verification_token: SecretString,
}

impl WebhookState {
    pub fn new(db_pool: DbPool, verification_token: SecretString) -> Self {
        let engine = TaskCommandEngine::new(SqlTaskRepository::new(db_pool));
        Self { router: Arc::new(CommandRouter::new(engine)), verification_token }
    }
}

/// The url-encoded body Slack posts for a slash command. Fields the bot does
/// not use (team/user names, response urls) are simply not captured.
#[derive(Debug, Deserialize)]
pub struct SlashCommandForm {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub user_id: String,
}

pub fn router(state: WebhookState) -> Router {
    Router::new().route("/tododo", post(handle_slash_command)).with_state(state)
}

pub async fn handle_slash_command(
    State(state): State<WebhookState>,
    Form(form): Form<SlashCommandForm>,
) -> Response {
    let request_id = Uuid::new_v4().to_string();

    if form.token != state.verification_token.expose_secret() {
        warn!(
            event_name = "webhook.token_rejected",
            correlation_id = %request_id,
            channel_id = %form.channel_id,
            "slash command verification token mismatch"
        );
        return StatusCode::UNAUTHORIZED.into_response();
    }

    info!(
        event_name = "webhook.command_received",
        correlation_id = %request_id,
        command = %form.command,
        channel_id = %form.channel_id,
        "slash command received"
    );

    let payload = SlashCommandPayload {
        command: form.command,
        text: form.text,
        channel_id: form.channel_id,
        user_id: form.user_id,
        request_id: request_id.clone(),
    };

    match state.router.route(payload).await {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(routing_error) => {
            error!(
                event_name = "webhook.command_failed",
                correlation_id = %request_id,
                error = %routing_error,
                "slash command handling failed"
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
