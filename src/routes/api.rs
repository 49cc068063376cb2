use crate::{
    AppState,
    handlers::{
        articles, help_requests, menu_item_reviews, recommendation_requests, ucsb_organizations,
    },
};
use axum::{
    Router,
    routing::{get, post},
};

/// API Router Module
///
/// Every entity exposes the same three routes:
/// - `GET  /api/<entity>/all`  list (USER)
/// - `GET  /api/<entity>`      fetch one by key (USER)
/// - `POST /api/<entity>/post` create from query parameters (ADMIN)
///
/// The required roles live in `policy::ROUTE_POLICY`; `create_router` wraps this
/// router in the role gate, so a route added here without a policy entry is denied.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(menu_item_review_routes())
        .merge(article_routes())
        .merge(help_request_routes())
        .merge(recommendation_request_routes())
        .merge(organization_routes())
}

fn menu_item_review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/menuitemreviews/all",
            get(menu_item_reviews::list_menu_item_reviews),
        )
        .route(
            "/api/menuitemreviews",
            get(menu_item_reviews::get_menu_item_review),
        )
        .route(
            "/api/menuitemreviews/post",
            post(menu_item_reviews::create_menu_item_review),
        )
}

fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/api/articles/all", get(articles::list_articles))
        .route("/api/articles", get(articles::get_article))
        .route("/api/articles/post", post(articles::create_article))
}

fn help_request_routes() -> Router<AppState> {
    Router::new()
        .route("/api/help_requests/all", get(help_requests::list_help_requests))
        .route("/api/help_requests", get(help_requests::get_help_request))
        .route("/api/help_requests/post", post(help_requests::create_help_request))
}

fn recommendation_request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/recommendationrequest/all",
            get(recommendation_requests::list_recommendation_requests),
        )
        .route(
            "/api/recommendationrequest",
            get(recommendation_requests::get_recommendation_request),
        )
        .route(
            "/api/recommendationrequest/post",
            post(recommendation_requests::create_recommendation_request),
        )
}

fn organization_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ucsborganization/all", get(ucsb_organizations::list_organizations))
        .route("/api/ucsborganization", get(ucsb_organizations::get_organization))
        .route("/api/ucsborganization/post", post(ucsb_organizations::create_organization))
}
