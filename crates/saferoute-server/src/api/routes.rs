//! Route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use saferoute_core::{PlanError, PlanResult};
use serde::Deserialize;
use serde_json::Value;

use super::request_id::RequestId;
use crate::state::AppState;

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new().route("/plan_route", post(plan_route))
}

/// Body of `POST /plan_route`. Fields are kept loose so a missing field and
/// a non-string one get different messages.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    pub start: Option<Value>,
    pub end: Option<Value>,
}

impl PlanRouteRequest {
    /// Missing fields are reported before non-string ones.
    fn into_locations(self) -> Result<(String, String), PlanError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(PlanError::InvalidInput);
        };
        match (start, end) {
            (Value::String(start), Value::String(end)) => Ok((start, end)),
            _ => Err(PlanError::InputNotText),
        }
    }
}

/// Maps planner failures to HTTP responses with a generic message.
#[derive(Debug)]
pub struct ApiError(pub PlanError);

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            PlanError::InvalidInput | PlanError::InputNotText => StatusCode::BAD_REQUEST,
            PlanError::UpstreamUnavailable(_) | PlanError::NoViableRoute => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            Json(serde_json::json!({"error": self.0.user_message()})),
        )
            .into_response()
    }
}

async fn plan_route(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<PlanRouteRequest>, JsonRejection>,
) -> Result<Json<PlanResult>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected plan_route body: {}", rejection.body_text());
            return Err(PlanError::InvalidInput.into());
        }
    };

    let (start, end) = request.into_locations().map_err(|err| {
        tracing::warn!("Rejected plan_route fields: {}", err);
        ApiError(err)
    })?;

    match state.planner().plan(&start, &end).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            match &err {
                PlanError::InvalidInput | PlanError::InputNotText => {
                    tracing::warn!("Invalid plan_route input: {}", err)
                }
                PlanError::UpstreamUnavailable(reason) => {
                    tracing::error!(%request_id, "Directions provider failed: {}", reason)
                }
                PlanError::NoViableRoute => {
                    tracing::error!(%request_id, "Every route candidate was dropped")
                }
            }
            Err(err.into())
        }
    }
}
