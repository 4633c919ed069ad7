//! Function endpoints invoked by the workflow engine.
//!
//! Each endpoint receives the function's inputs as a JSON object and answers
//! with `{"outputs": {}}` on success or `{"error": "..."}` on failure.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use tig_core::service::setup::SetupError;
use tig_types::error::RegistrationError;
use tig_types::function::{AlertInputs, FunctionResult, SetupInputs};
use tig_types::id::{ChannelId, UserId};

use crate::state::AppState;

type FunctionResponse = (StatusCode, Json<FunctionResult>);

fn failure(status: StatusCode, message: impl Into<String>) -> FunctionResponse {
    (status, Json(FunctionResult::error(message)))
}

fn success() -> FunctionResponse {
    (StatusCode::OK, Json(FunctionResult::empty()))
}

/// Status code for a failed setup run.
fn setup_status(err: &SetupError) -> StatusCode {
    match err {
        SetupError::Registration(RegistrationError::Persistence(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        SetupError::Registration(_) | SetupError::Confirmation(_) => StatusCode::BAD_GATEWAY,
    }
}

/// POST /api/v1/functions/setup_channel_listener - Register a channel listener.
pub async fn setup_channel_listener(
    State(state): State<AppState>,
    body: Result<Json<SetupInputs>, JsonRejection>,
) -> FunctionResponse {
    let Json(inputs) = match body {
        Ok(body) => body,
        Err(rejection) => return failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let channel = match inputs.channel.as_str().parse::<ChannelId>() {
        Ok(channel) => channel,
        Err(e) => return failure(StatusCode::BAD_REQUEST, e),
    };
    let user_to_alert = match inputs.user_to_alert.as_ref().map(|u| u.as_str().parse::<UserId>()) {
        Some(Ok(user)) => Some(user),
        Some(Err(e)) => return failure(StatusCode::BAD_REQUEST, e),
        None => None,
    };
    let inputs = SetupInputs {
        channel,
        user_to_alert,
    };

    match state.setup.run(&inputs).await {
        Ok(outcome) => {
            tracing::info!(
                channel = %inputs.channel,
                route_id = %outcome.route_id,
                watch_created = outcome.watch_created,
                "channel listener set up"
            );
            success()
        }
        Err(e) => {
            tracing::error!(channel = %inputs.channel, error = %e, "setup failed");
            failure(setup_status(&e), e.to_string())
        }
    }
}

/// POST /api/v1/functions/send_alert - Direct-message the alerted user.
pub async fn send_alert(
    State(state): State<AppState>,
    body: Result<Json<AlertInputs>, JsonRejection>,
) -> FunctionResponse {
    let Json(inputs) = match body {
        Ok(body) => body,
        Err(rejection) => return failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let parsed = inputs
        .channel
        .as_str()
        .parse::<ChannelId>()
        .and_then(|channel| Ok((channel, inputs.triggered_user.as_str().parse::<UserId>()?)));
    let (channel, triggered_user) = match parsed {
        Ok(pair) => pair,
        Err(e) => return failure(StatusCode::BAD_REQUEST, e),
    };

    match state.dispatch.dispatch(&channel, &triggered_user).await {
        Ok(()) => success(),
        Err(e) => {
            tracing::error!(channel = %channel, error = %e, "alert dispatch failed");
            failure(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}
