//! HTTP handlers, one module per entity.
//!
//! Each entity exposes the same three operations. The per-entity handlers own the
//! route documentation and parameter names; the shared bodies live here.

use axum::Json;

use crate::{
    error::ApiError,
    params::QueryParams,
    repository::{Entity, Repository},
};

pub mod articles;
pub mod help_requests;
pub mod menu_item_reviews;
pub mod recommendation_requests;
pub mod ucsb_organizations;

/// The full `find_all` result, unchanged.
pub async fn list_all<E: Entity>(repo: &dyn Repository<E>) -> Result<Json<Vec<E>>, ApiError> {
    let records = repo.find_all().await?;
    Ok(Json(records))
}

/// Looks up the record keyed by the `key_param` query parameter, or fails with
/// `EntityNotFound` naming `E::NAME` and the requested key.
pub async fn find_one<E: Entity>(
    repo: &dyn Repository<E>,
    params: &QueryParams,
    key_param: &str,
) -> Result<Json<E>, ApiError> {
    let id: E::Id = params.required(key_param, "a valid identifier")?;
    match repo.find_by_id(&id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::not_found(E::NAME, &id)),
    }
}

/// Persists a decoded draft and returns the stored record, key included.
pub async fn save<E: Entity>(repo: &dyn Repository<E>, draft: E::Draft) -> Result<Json<E>, ApiError> {
    let saved = repo.save(draft).await?;
    tracing::info!("created {} {}", E::NAME, saved.id());
    Ok(Json(saved))
}
