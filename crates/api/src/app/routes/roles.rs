use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};
use chrono::Utc;

use admissions_core::RoleId;

use crate::app::dto::{self, RoleDefinition, RoleRequest};
use crate::app::routes::{Ctx, admin_only};
use crate::app::services::{AppServices, BUILTIN_ROLES};
use crate::app::store::RecordStore;
use crate::app::validators;
use crate::context::GateRequest;
use crate::envelope;
use crate::errors::{HandlerResult, RequestError};
use crate::gate::create_handler;

pub fn router() -> Router<Arc<AppServices>> {
    Router::new()
        .route(
            "/",
            get(create_handler(list_roles, admin_only())).post(create_handler(
                create_role,
                admin_only().validate_body(validators::role()),
            )),
        )
        .route("/:id", delete(create_handler(delete_role, admin_only())))
}

pub async fn list_roles(_req: GateRequest, ctx: Ctx) -> HandlerResult<Vec<RoleDefinition>> {
    Ok(envelope::success(ctx.state().roles.list()))
}

pub async fn create_role(req: GateRequest, ctx: Ctx) -> HandlerResult<RoleDefinition> {
    let body: RoleRequest = req.json()?;
    let record = RoleDefinition::new(body, Utc::now());
    let name = record.name.clone();

    let created = ctx
        .state()
        .roles
        .insert_unique(record, &|r: &RoleDefinition| dto::same_name(&r.name, &name))?;

    tracing::info!(role_id = %created.id, role = %created.name, "role created");
    Ok(envelope::created(created))
}

pub async fn delete_role(_req: GateRequest, ctx: Ctx) -> HandlerResult<RoleDefinition> {
    let id: RoleId = ctx.id("id")?;
    let store = &ctx.state().roles;

    let role = store.fetch(&id)?;
    if BUILTIN_ROLES.contains(&role.name.as_str()) {
        return Err(RequestError::new(format!("Built-in role '{}' cannot be deleted", role.name)).into());
    }

    let removed = store.delete(&id)?;
    tracing::info!(role_id = %id, role = %removed.name, "role deleted");
    Ok(envelope::success(removed))
}
