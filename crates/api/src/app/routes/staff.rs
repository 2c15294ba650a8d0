use std::sync::Arc;

use axum::{Router, routing::get};
use chrono::Utc;

use admissions_core::StaffId;

use crate::app::dto::{StaffMember, StaffRequest};
use crate::app::routes::{Ctx, admin_only};
use crate::app::services::AppServices;
use crate::app::store::RecordStore;
use crate::app::validators;
use crate::context::GateRequest;
use crate::envelope;
use crate::errors::HandlerResult;
use crate::gate::create_handler;

pub fn router() -> Router<Arc<AppServices>> {
    let write = || admin_only().validate_body(validators::staff());

    Router::new()
        .route(
            "/",
            get(create_handler(list_staff, admin_only())).post(create_handler(create_staff, write())),
        )
        .route(
            "/:id",
            get(create_handler(get_staff, admin_only()))
                .put(create_handler(update_staff, write()))
                .delete(create_handler(delete_staff, admin_only())),
        )
}

pub async fn list_staff(_req: GateRequest, ctx: Ctx) -> HandlerResult<Vec<StaffMember>> {
    Ok(envelope::success(ctx.state().staff.list()))
}

pub async fn get_staff(_req: GateRequest, ctx: Ctx) -> HandlerResult<StaffMember> {
    let id: StaffId = ctx.id("id")?;
    Ok(envelope::success(ctx.state().staff.fetch(&id)?))
}

pub async fn create_staff(req: GateRequest, ctx: Ctx) -> HandlerResult<StaffMember> {
    let body: StaffRequest = req.json()?;
    let record = StaffMember::with_id(StaffId::new(), body, Utc::now());
    let email = record.email.clone();

    let created = ctx
        .state()
        .staff
        .insert_unique(record, &|s: &StaffMember| s.email == email)?;

    tracing::info!(staff_id = %created.id, "staff member created");
    Ok(envelope::created(created))
}

pub async fn update_staff(req: GateRequest, ctx: Ctx) -> HandlerResult<StaffMember> {
    let id: StaffId = ctx.id("id")?;
    let body: StaffRequest = req.json()?;
    let store = &ctx.state().staff;

    let existing = store.fetch(&id)?;
    let record = StaffMember::with_id(id, body, existing.created_at);
    let email = record.email.clone();

    let updated = store.replace_unique(record, &|s: &StaffMember| s.email == email)?;
    Ok(envelope::success(updated))
}

pub async fn delete_staff(_req: GateRequest, ctx: Ctx) -> HandlerResult<StaffMember> {
    let id: StaffId = ctx.id("id")?;
    let removed = ctx.state().staff.delete(&id)?;

    tracing::info!(staff_id = %id, "staff member deleted");
    Ok(envelope::success(removed))
}
