//! Route → minimum role policy and the gate that enforces it.
//!
//! Every `/api` route is listed here exactly once. The gate runs as a route layer,
//! after routing (so the matched template is known) and before any extractor or
//! handler touches a repository.

use axum::{
    extract::{MatchedPath, Request},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::{
    auth::{AuthUser, Caller, Role},
    error::ApiError,
};

/// One entry of the policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePolicy {
    pub method: &'static str,
    pub path: &'static str,
    pub role: Role,
}

const fn rule(method: &'static str, path: &'static str, role: Role) -> RoutePolicy {
    RoutePolicy { method, path, role }
}

pub static ROUTE_POLICY: &[RoutePolicy] = &[
    rule("GET", "/api/menuitemreviews/all", Role::User),
    rule("GET", "/api/menuitemreviews", Role::User),
    rule("POST", "/api/menuitemreviews/post", Role::Admin),
    rule("GET", "/api/articles/all", Role::User),
    rule("GET", "/api/articles", Role::User),
    rule("POST", "/api/articles/post", Role::Admin),
    rule("GET", "/api/help_requests/all", Role::User),
    rule("GET", "/api/help_requests", Role::User),
    rule("POST", "/api/help_requests/post", Role::Admin),
    rule("GET", "/api/recommendationrequest/all", Role::User),
    rule("GET", "/api/recommendationrequest", Role::User),
    rule("POST", "/api/recommendationrequest/post", Role::Admin),
    rule("GET", "/api/ucsborganization/all", Role::User),
    rule("GET", "/api/ucsborganization", Role::User),
    rule("POST", "/api/ucsborganization/post", Role::Admin),
];

/// Minimum role for a route template, or `None` if the table has no entry.
pub fn required_role(method: &Method, path: &str) -> Option<Role> {
    ROUTE_POLICY
        .iter()
        .find(|policy| policy.method == method.as_str() && policy.path == path)
        .map(|policy| policy.role)
}

/// Anonymous callers and callers below `required` are refused.
pub fn authorize(caller: Option<&AuthUser>, required: Role) -> Result<(), ApiError> {
    match caller {
        Some(user) if user.has_role(required) => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}

/// role_gate
///
/// Middleware applied with `route_layer` to the API router. Unlisted routes are denied.
pub async fn role_gate(
    Caller(caller): Caller,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let Some(path) = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
    else {
        tracing::warn!("role gate reached without a matched route: {} {}", method, request.uri());
        return Err(ApiError::Forbidden);
    };

    let Some(required) = required_role(&method, &path) else {
        tracing::warn!("no role policy for {} {}; denying", method, path);
        return Err(ApiError::Forbidden);
    };

    if let Err(denied) = authorize(caller.as_ref(), required) {
        tracing::debug!(
            "denied {} {} (requires {}, caller {:?})",
            method,
            path,
            required,
            caller.as_ref().map(|user| user.role)
        );
        return Err(denied);
    }

    Ok(next.run(request).await)
}
