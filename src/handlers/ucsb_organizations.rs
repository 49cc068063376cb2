use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{ApiError, ErrorBody},
    models::UCSBOrganization,
    params::{FromParams, QueryParams},
};

#[utoipa::path(
    get,
    path = "/api/ucsborganization/all",
    tag = "UCSBOrganization",
    responses(
        (status = 200, description = "All organizations", body = [UCSBOrganization]),
        (status = 403, description = "Not logged in", body = ErrorBody)
    )
)]
pub async fn list_organizations(
    State(state): State<AppState>,
) -> Result<Json<Vec<UCSBOrganization>>, ApiError> {
    super::list_all(state.ucsb_organizations.as_ref()).await
}

/// get_organization
///
/// [USER] Organizations are keyed by `orgCode`, not a numeric id.
#[utoipa::path(
    get,
    path = "/api/ucsborganization",
    tag = "UCSBOrganization",
    params(("orgCode" = String, Query, description = "Organization code, e.g. MTG")),
    responses(
        (status = 200, description = "Found", body = UCSBOrganization),
        (status = 404, description = "No organization with that code", body = ErrorBody)
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<UCSBOrganization>, ApiError> {
    super::find_one(state.ucsb_organizations.as_ref(), &params, "orgCode").await
}

/// create_organization
///
/// [ADMIN] Posting an existing `orgCode` replaces that organization.
#[utoipa::path(
    post,
    path = "/api/ucsborganization/post",
    tag = "UCSBOrganization",
    params(
        ("orgCode" = String, Query, description = "Organization code"),
        ("orgTranslationShort" = String, Query, description = "Short display name"),
        ("orgTranslation" = String, Query, description = "Full name"),
        ("inactive" = bool, Query, description = "Whether the organization is inactive")
    ),
    responses(
        (status = 200, description = "Created", body = UCSBOrganization),
        (status = 400, description = "Missing or malformed parameter", body = ErrorBody),
        (status = 403, description = "Admins only", body = ErrorBody)
    )
)]
pub async fn create_organization(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<UCSBOrganization>, ApiError> {
    let organization = UCSBOrganization::from_params(&params)?;
    super::save(state.ucsb_organizations.as_ref(), organization).await
}
