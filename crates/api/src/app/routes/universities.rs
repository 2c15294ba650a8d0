use std::sync::Arc;

use axum::{Router, routing::get};
use chrono::Utc;

use admissions_core::UniversityId;

use crate::app::dto::{self, University, UniversityRequest};
use crate::app::routes::{Ctx, admin_only, public};
use crate::app::services::AppServices;
use crate::app::store::RecordStore;
use crate::app::validators;
use crate::context::GateRequest;
use crate::envelope;
use crate::errors::HandlerResult;
use crate::gate::create_handler;

pub fn router() -> Router<Arc<AppServices>> {
    Router::new()
        .route(
            "/",
            get(create_handler(list_universities, public())).post(create_handler(
                create_university,
                admin_only().validate_body(validators::university()),
            )),
        )
        .route(
            "/:id",
            get(create_handler(get_university, public()))
                .put(create_handler(
                    update_university,
                    admin_only().validate_body(validators::university()),
                ))
                .delete(create_handler(delete_university, admin_only())),
        )
}

pub async fn list_universities(_req: GateRequest, ctx: Ctx) -> HandlerResult<Vec<University>> {
    Ok(envelope::success(ctx.state().universities.list()))
}

pub async fn get_university(_req: GateRequest, ctx: Ctx) -> HandlerResult<University> {
    let id: UniversityId = ctx.id("id")?;
    Ok(envelope::success(ctx.state().universities.fetch(&id)?))
}

pub async fn create_university(req: GateRequest, ctx: Ctx) -> HandlerResult<University> {
    let body: UniversityRequest = req.json()?;
    let record = University::new(body, Utc::now());
    let name = record.name.clone();

    let created = ctx
        .state()
        .universities
        .insert_unique(record, &|u: &University| dto::same_name(&u.name, &name))?;

    tracing::info!(university_id = %created.id, "university created");
    Ok(envelope::created(created))
}

pub async fn update_university(req: GateRequest, ctx: Ctx) -> HandlerResult<University> {
    let id: UniversityId = ctx.id("id")?;
    let body: UniversityRequest = req.json()?;
    let store = &ctx.state().universities;

    let existing = store.fetch(&id)?;
    let record = University::with_id(id, body, existing.created_at);
    let name = record.name.clone();

    let updated = store.replace_unique(record, &|u: &University| dto::same_name(&u.name, &name))?;

    tracing::info!(university_id = %id, "university updated");
    Ok(envelope::success(updated))
}

pub async fn delete_university(_req: GateRequest, ctx: Ctx) -> HandlerResult<University> {
    let id: UniversityId = ctx.id("id")?;
    let removed = ctx.state().universities.delete(&id)?;

    tracing::info!(university_id = %id, "university deleted");
    Ok(envelope::success(removed))
}
