/// Router Module Index
///
/// `public` routes are served to anyone. `api` routes are mounted behind the
/// role gate, which checks each one against the policy table before dispatch.

/// Health check and other unauthenticated endpoints.
pub mod public;

/// The entity CRUD endpoints under `/api`.
pub mod api;
