use std::sync::Arc;

use axum::{Router, routing::get};
use chrono::Utc;

use admissions_core::ApplicationId;

use crate::app::dto::{Application, ApplicationRequest};
use crate::app::routes::{Ctx, admin_or_staff, public, with_university};
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
            get(create_handler(list_applications, admin_or_staff())).post(create_handler(
                submit_application,
                public().validate_body(validators::application()),
            )),
        )
        .route("/:id", get(create_handler(get_application, admin_or_staff())))
}

/// Applicant form submission from the public site.
pub async fn submit_application(req: GateRequest, ctx: Ctx) -> HandlerResult<Application> {
    let body: ApplicationRequest = req.json()?;
    let university = body.university_id;
    let record = Application::new(body, Utc::now());

    let stored = with_university(&ctx, university, || ctx.state().applications.insert(record))?;

    tracing::info!(application_id = %stored.id, program = %stored.program, "application submitted");
    Ok(envelope::created(stored))
}

pub async fn list_applications(_req: GateRequest, ctx: Ctx) -> HandlerResult<Vec<Application>> {
    Ok(envelope::success(ctx.state().applications.list()))
}

pub async fn get_application(_req: GateRequest, ctx: Ctx) -> HandlerResult<Application> {
    let id: ApplicationId = ctx.id("id")?;
    Ok(envelope::success(ctx.state().applications.fetch(&id)?))
}
