use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod params;
pub mod policy;
pub mod repository;

// Public (ungated) and API (role-gated) routers.
pub mod routes;
use routes::{api, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{ApiError, ErrorBody};
pub use models::{Articles, HelpRequest, MenuItemReview, RecommendationRequest, UCSBOrganization};
pub use repository::{
    InMemoryRepository, InMemoryUserRepository, PostgresRepository, PostgresUserRepository,
    RepositoryState, UserRepositoryState,
};

/// ApiDoc
///
/// OpenAPI document for every entity route, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::menu_item_reviews::list_menu_item_reviews,
        handlers::menu_item_reviews::get_menu_item_review,
        handlers::menu_item_reviews::create_menu_item_review,
        handlers::articles::list_articles,
        handlers::articles::get_article,
        handlers::articles::create_article,
        handlers::help_requests::list_help_requests,
        handlers::help_requests::get_help_request,
        handlers::help_requests::create_help_request,
        handlers::recommendation_requests::list_recommendation_requests,
        handlers::recommendation_requests::get_recommendation_request,
        handlers::recommendation_requests::create_recommendation_request,
        handlers::ucsb_organizations::list_organizations,
        handlers::ucsb_organizations::get_organization,
        handlers::ucsb_organizations::create_organization,
    ),
    components(
        schemas(
            MenuItemReview, Articles, HelpRequest, RecommendationRequest, UCSBOrganization,
            ErrorBody,
        )
    ),
    tags(
        (name = "MenuItemReviews", description = "Dining commons menu item reviews"),
        (name = "Articles", description = "Shared news articles"),
        (name = "HelpRequests", description = "Lab help requests"),
        (name = "RecommendationRequests", description = "Letter of recommendation requests"),
        (name = "UCSBOrganization", description = "Student organizations")
    )
)]
pub struct ApiDoc;

/// AppState
///
/// Single, cloneable container for every repository and the loaded configuration.
/// Each entity's storage is injected independently; no entity depends on another.
#[derive(Clone)]
pub struct AppState {
    pub menu_item_reviews: RepositoryState<MenuItemReview>,
    pub articles: RepositoryState<Articles>,
    pub help_requests: RepositoryState<HelpRequest>,
    pub recommendation_requests: RepositoryState<RecommendationRequest>,
    pub ucsb_organizations: RepositoryState<UCSBOrganization>,
    /// Accounts used to resolve callers and their roles.
    pub users: UserRepositoryState,
    pub config: AppConfig,
}

impl AppState {
    /// All repositories backed by the given Postgres pool.
    pub fn postgres(pool: PgPool, config: AppConfig) -> Self {
        Self {
            menu_item_reviews: Arc::new(PostgresRepository::<MenuItemReview>::new(pool.clone())),
            articles: Arc::new(PostgresRepository::<Articles>::new(pool.clone())),
            help_requests: Arc::new(PostgresRepository::<HelpRequest>::new(pool.clone())),
            recommendation_requests: Arc::new(PostgresRepository::<RecommendationRequest>::new(
                pool.clone(),
            )),
            ucsb_organizations: Arc::new(PostgresRepository::<UCSBOrganization>::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool)),
            config,
        }
    }

    /// All repositories held in process memory. Contents are lost on restart.
    pub fn in_memory(config: AppConfig) -> Self {
        Self {
            menu_item_reviews: Arc::new(InMemoryRepository::<MenuItemReview>::new()),
            articles: Arc::new(InMemoryRepository::<Articles>::new()),
            help_requests: Arc::new(InMemoryRepository::<HelpRequest>::new()),
            recommendation_requests: Arc::new(InMemoryRepository::<RecommendationRequest>::new()),
            ucsb_organizations: Arc::new(InMemoryRepository::<UCSBOrganization>::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

// Lets the `Caller` extractor pull only what it needs from the shared state.

impl FromRef<AppState> for UserRepositoryState {
    fn from_ref(app_state: &AppState) -> UserRepositoryState {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, puts the API routes behind the role gate,
/// and applies the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // `route_layer` runs after routing, so the gate sees the matched template
        // and unknown paths still fall through to a plain 404.
        .merge(api::api_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            policy::role_gate,
        )))
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for `TraceLayer`: method, URI and the `x-request-id` set above, so every
/// log line of one request is correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
