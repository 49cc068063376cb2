use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{ApiError, ErrorBody},
    models::{NewRecommendationRequest, RecommendationRequest},
    params::{FromParams, QueryParams},
};

#[utoipa::path(
    get,
    path = "/api/recommendationrequest/all",
    tag = "RecommendationRequests",
    responses(
        (status = 200, description = "All recommendation requests", body = [RecommendationRequest]),
        (status = 403, description = "Not logged in", body = ErrorBody)
    )
)]
pub async fn list_recommendation_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecommendationRequest>>, ApiError> {
    super::list_all(state.recommendation_requests.as_ref()).await
}

#[utoipa::path(
    get,
    path = "/api/recommendationrequest",
    tag = "RecommendationRequests",
    params(("id" = i64, Query, description = "Recommendation request id")),
    responses(
        (status = 200, description = "Found", body = RecommendationRequest),
        (status = 404, description = "No recommendation request with that id", body = ErrorBody)
    )
)]
pub async fn get_recommendation_request(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<RecommendationRequest>, ApiError> {
    super::find_one(state.recommendation_requests.as_ref(), &params, "id").await
}

/// create_recommendation_request
///
/// [ADMIN] Parameter names are all lower-case to match the JSON field names.
#[utoipa::path(
    post,
    path = "/api/recommendationrequest/post",
    tag = "RecommendationRequests",
    params(
        ("requesteremail" = String, Query, description = "Email of the student"),
        ("professoremail" = String, Query, description = "Email of the professor"),
        ("explanation" = String, Query, description = "What the letter is for"),
        ("daterequested" = String, Query, description = "ISO date-time, e.g. 2022-01-03T00:00:00"),
        ("dateneeded" = String, Query, description = "ISO date-time, e.g. 2022-01-03T00:00:00"),
        ("done" = bool, Query, description = "Whether the letter has been sent")
    ),
    responses(
        (status = 200, description = "Created", body = RecommendationRequest),
        (status = 400, description = "Missing or malformed parameter", body = ErrorBody),
        (status = 403, description = "Admins only", body = ErrorBody)
    )
)]
pub async fn create_recommendation_request(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<RecommendationRequest>, ApiError> {
    let draft = NewRecommendationRequest::from_params(&params)?;
    tracing::info!(
        "daterequested={} dateneeded={}",
        draft.date_requested,
        draft.date_needed
    );
    super::save(state.recommendation_requests.as_ref(), draft).await
}
