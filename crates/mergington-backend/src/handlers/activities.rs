use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use mergington::data::ErrorDetail;
use mergington::errors::ActivityError;
use mergington::{log, serde};

use crate::services::ActivityService;

/// Query string carried by the sign-up and removal routes.
#[derive(Debug, serde::Deserialize)]
#[serde(crate = "mergington::serde")]
pub struct EmailQuery {
    pub email: Option<String>,
}

fn rejection(err: ActivityError) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    log::debug!(%status, "Rejected: {err}");
    (status, Json(ErrorDetail::new(err.to_string()))).into_response()
}

fn malformed_request(status: StatusCode, body_text: String) -> Response {
    log::debug!(%status, "Malformed request: {body_text}");
    (status, Json(ErrorDetail::new(body_text))).into_response()
}

/// Unwraps the activity name and email, answering with a JSON detail when either is unusable.
fn signup_target(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<(String, String), Response> {
    let Path(activity_name) =
        path.map_err(|rejection| malformed_request(rejection.status(), rejection.body_text()))?;
    let Query(query) =
        query.map_err(|rejection| malformed_request(rejection.status(), rejection.body_text()))?;
    let email = query.email.ok_or_else(missing_email)?;
    Ok((activity_name, email))
}

fn missing_email() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorDetail::new("Missing required query parameter: email")),
    )
        .into_response()
}

/// Handler to list every activity with its participants
pub async fn list(State(state): State<Arc<crate::AppState>>) -> Response {
    match state.activities.list_activities().await {
        Ok(directory) => (StatusCode::OK, Json(directory)).into_response(),
        Err(err) => rejection(err),
    }
}

/// Handler to sign a participant up for an activity
pub async fn signup(
    State(state): State<Arc<crate::AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Response {
    let (activity_name, email) = match signup_target(path, query) {
        Ok(target) => target,
        Err(response) => return response,
    };

    match state.activities.enroll(&activity_name, &email).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => rejection(err),
    }
}

/// Handler to remove a participant from an activity
pub async fn remove_participant(
    State(state): State<Arc<crate::AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Response {
    let (activity_name, email) = match signup_target(path, query) {
        Ok(target) => target,
        Err(response) => return response,
    };

    match state.activities.unenroll(&activity_name, &email).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => rejection(err),
    }
}
