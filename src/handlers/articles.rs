use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{ApiError, ErrorBody},
    models::{Articles, NewArticle},
    params::{FromParams, QueryParams},
};

#[utoipa::path(
    get,
    path = "/api/articles/all",
    tag = "Articles",
    responses(
        (status = 200, description = "All articles", body = [Articles]),
        (status = 403, description = "Not logged in", body = ErrorBody)
    )
)]
pub async fn list_articles(State(state): State<AppState>) -> Result<Json<Vec<Articles>>, ApiError> {
    super::list_all(state.articles.as_ref()).await
}

#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "Articles",
    params(("id" = i64, Query, description = "Article id")),
    responses(
        (status = 200, description = "Found", body = Articles),
        (status = 404, description = "No article with that id", body = ErrorBody)
    )
)]
pub async fn get_article(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<Articles>, ApiError> {
    super::find_one(state.articles.as_ref(), &params, "id").await
}

#[utoipa::path(
    post,
    path = "/api/articles/post",
    tag = "Articles",
    params(
        ("title" = String, Query, description = "Headline"),
        ("url" = String, Query, description = "Link to the article"),
        ("explanation" = String, Query, description = "Why the article is worth reading"),
        ("email" = String, Query, description = "Email of the submitter"),
        ("dateAdded" = String, Query, description = "ISO date-time, e.g. 2022-01-03T00:00:00")
    ),
    responses(
        (status = 200, description = "Created", body = Articles),
        (status = 400, description = "Missing or malformed parameter", body = ErrorBody),
        (status = 403, description = "Admins only", body = ErrorBody)
    )
)]
pub async fn create_article(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<Articles>, ApiError> {
    let draft = NewArticle::from_params(&params)?;
    tracing::info!("dateAdded={}", draft.date_added);
    super::save(state.articles.as_ref(), draft).await
}
