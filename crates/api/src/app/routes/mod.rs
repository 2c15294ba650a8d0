use std::sync::Arc;

use axum::{Router, routing::get};

use admissions_auth::Role;
use admissions_core::{DomainResult, UniversityId};

use crate::app::services::AppServices;
use crate::context::RequestContext;
use crate::errors::{HandlerError, RequestError};
use crate::gate::{HandlerConfig, create_handler};

pub mod applications;
pub mod auth;
pub mod messages;
pub mod roles;
pub mod staff;
pub mod students;
pub mod system;
pub mod universities;

/// Context type every business function receives.
pub type Ctx = RequestContext<Arc<AppServices>>;

/// Full routing tree; state is attached by the caller.
pub fn router() -> Router<Arc<AppServices>> {
    Router::new()
        .route("/health", get(create_handler(system::health, public())))
        .nest("/auth", auth::router())
        .nest("/universities", universities::router())
        .nest("/staff", staff::router())
        .nest("/students", students::router())
        .nest("/roles", roles::router())
        .nest("/messages", messages::router())
        .nest("/applications", applications::router())
}

pub(crate) fn public() -> HandlerConfig {
    HandlerConfig::new()
}

pub(crate) fn admin_only() -> HandlerConfig {
    HandlerConfig::new().require_auth().allow_roles([Role::ADMIN])
}

pub(crate) fn admin_or_staff() -> HandlerConfig {
    HandlerConfig::new()
        .require_auth()
        .allow_roles([Role::ADMIN, Role::STAFF])
}

/// Run `write` with the referenced university pinned.
///
/// A university delete waits until `write` returns, so a stored reference
/// always points at a live record. Unknown ids are a 400.
pub(crate) fn with_university<R>(
    ctx: &Ctx,
    id: Option<UniversityId>,
    write: impl FnOnce() -> DomainResult<R>,
) -> Result<R, HandlerError> {
    let Some(id) = id else {
        return Ok(write()?);
    };

    match ctx.state().universities.with_present(&id, write) {
        Some(written) => Ok(written?),
        None => Err(RequestError::new(format!("Unknown university: {id}")).into()),
    }
}
