use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{ApiError, ErrorBody},
    models::{HelpRequest, NewHelpRequest},
    params::{FromParams, QueryParams},
};

/// list_help_requests
///
/// [USER] Every help request, solved or not.
#[utoipa::path(
    get,
    path = "/api/help_requests/all",
    tag = "HelpRequests",
    responses(
        (status = 200, description = "All help requests", body = [HelpRequest]),
        (status = 403, description = "Not logged in", body = ErrorBody)
    )
)]
pub async fn list_help_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<HelpRequest>>, ApiError> {
    super::list_all(state.help_requests.as_ref()).await
}

#[utoipa::path(
    get,
    path = "/api/help_requests",
    tag = "HelpRequests",
    params(("id" = i64, Query, description = "Help request id")),
    responses(
        (status = 200, description = "Found", body = HelpRequest),
        (status = 404, description = "No help request with that id", body = ErrorBody)
    )
)]
pub async fn get_help_request(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<HelpRequest>, ApiError> {
    super::find_one(state.help_requests.as_ref(), &params, "id").await
}

/// create_help_request
///
/// [ADMIN] `solved` must be `true` or `false`.
#[utoipa::path(
    post,
    path = "/api/help_requests/post",
    tag = "HelpRequests",
    params(
        ("requesterEmail" = String, Query, description = "Email of the student asking"),
        ("teamId" = String, Query, description = "Team identifier"),
        ("tableOrBreakoutRoom" = String, Query, description = "Where the team is sitting"),
        ("requestTime" = String, Query, description = "ISO date-time, e.g. 2022-01-03T00:00:00"),
        ("explanation" = String, Query, description = "What the team needs help with"),
        ("solved" = bool, Query, description = "Whether the request has been handled")
    ),
    responses(
        (status = 200, description = "Created", body = HelpRequest),
        (status = 400, description = "Missing or malformed parameter", body = ErrorBody),
        (status = 403, description = "Admins only", body = ErrorBody)
    )
)]
pub async fn create_help_request(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<HelpRequest>, ApiError> {
    let draft = NewHelpRequest::from_params(&params)?;
    tracing::info!("requestTime={}", draft.request_time);
    super::save(state.help_requests.as_ref(), draft).await
}
