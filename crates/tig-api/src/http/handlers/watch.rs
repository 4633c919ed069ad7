//! Read-only views of alert watches and alert routes.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};

use tig_types::id::ChannelId;
use tig_types::route::AlertRoute;
use tig_types::watch::Watch;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/watches - Alert watches currently registered with the platform.
pub async fn list_watches(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Watch>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let watches = state.setup.registration().alert_watches().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(watches, request_id, elapsed)
        .with_link("self", "/api/v1/watches");

    Ok(Json(resp))
}

/// GET /api/v1/channels/{channel}/routes - Alert routes saved for a channel.
pub async fn list_routes(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Result<Json<ApiResponse<Vec<AlertRoute>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let channel: ChannelId = channel.parse().map_err(AppError::Validation)?;
    let routes = state.routes.list_by_channel(&channel).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let self_link = format!("/api/v1/channels/{channel}/routes");
    let resp = ApiResponse::success(routes, request_id, elapsed).with_link("self", &self_link);

    Ok(Json(resp))
}
