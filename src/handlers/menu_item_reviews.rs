use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{ApiError, ErrorBody},
    models::{MenuItemReview, NewMenuItemReview},
    params::{FromParams, QueryParams},
};

/// list_menu_item_reviews
///
/// [USER] Every stored review.
#[utoipa::path(
    get,
    path = "/api/menuitemreviews/all",
    tag = "MenuItemReviews",
    responses(
        (status = 200, description = "All reviews", body = [MenuItemReview]),
        (status = 403, description = "Not logged in", body = ErrorBody)
    )
)]
pub async fn list_menu_item_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuItemReview>>, ApiError> {
    super::list_all(state.menu_item_reviews.as_ref()).await
}

/// get_menu_item_review
///
/// [USER] A single review by `id`.
#[utoipa::path(
    get,
    path = "/api/menuitemreviews",
    tag = "MenuItemReviews",
    params(("id" = i64, Query, description = "Review id")),
    responses(
        (status = 200, description = "Found", body = MenuItemReview),
        (status = 404, description = "No review with that id", body = ErrorBody)
    )
)]
pub async fn get_menu_item_review(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<MenuItemReview>, ApiError> {
    super::find_one(state.menu_item_reviews.as_ref(), &params, "id").await
}

/// create_menu_item_review
///
/// [ADMIN] Stores a new review built from individual query parameters.
#[utoipa::path(
    post,
    path = "/api/menuitemreviews/post",
    tag = "MenuItemReviews",
    params(
        ("itemId" = i64, Query, description = "Id of the menu item being reviewed"),
        ("reviewerEmail" = String, Query, description = "Email of the reviewer"),
        ("stars" = i32, Query, description = "Star rating (0-5)"),
        ("dateReviewed" = String, Query, description = "ISO date-time, e.g. 2022-01-03T00:00:00"),
        ("comments" = String, Query, description = "Reviewer's comments")
    ),
    responses(
        (status = 200, description = "Created", body = MenuItemReview),
        (status = 400, description = "Missing or malformed parameter", body = ErrorBody),
        (status = 403, description = "Admins only", body = ErrorBody)
    )
)]
pub async fn create_menu_item_review(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<MenuItemReview>, ApiError> {
    let draft = NewMenuItemReview::from_params(&params)?;
    tracing::info!("dateReviewed={}", draft.date_reviewed);
    super::save(state.menu_item_reviews.as_ref(), draft).await
}
