use std::sync::Arc;

use axum::{Router, routing::get};
use chrono::Utc;

use admissions_core::StudentId;

use crate::app::dto::{Student, StudentRequest};
use crate::app::routes::{Ctx, admin_or_staff, with_university};
use crate::app::services::AppServices;
use crate::app::store::RecordStore;
use crate::app::validators;
use crate::context::GateRequest;
use crate::envelope;
use crate::errors::HandlerResult;
use crate::gate::create_handler;

pub fn router() -> Router<Arc<AppServices>> {
    let write = || admin_or_staff().validate_body(validators::student());

    Router::new()
        .route(
            "/",
            get(create_handler(list_students, admin_or_staff()))
                .post(create_handler(create_student, write())),
        )
        .route(
            "/:id",
            get(create_handler(get_student, admin_or_staff()))
                .put(create_handler(update_student, write()))
                .delete(create_handler(delete_student, admin_or_staff())),
        )
}

pub async fn list_students(_req: GateRequest, ctx: Ctx) -> HandlerResult<Vec<Student>> {
    Ok(envelope::success(ctx.state().students.list()))
}

pub async fn get_student(_req: GateRequest, ctx: Ctx) -> HandlerResult<Student> {
    let id: StudentId = ctx.id("id")?;
    Ok(envelope::success(ctx.state().students.fetch(&id)?))
}

pub async fn create_student(req: GateRequest, ctx: Ctx) -> HandlerResult<Student> {
    let body: StudentRequest = req.json()?;
    let university = body.university_id;

    let record = Student::with_id(StudentId::new(), body, Utc::now());
    let email = record.email.clone();

    let created = with_university(&ctx, university, || {
        ctx.state()
            .students
            .insert_unique(record, &|s: &Student| s.email == email)
    })?;

    tracing::info!(student_id = %created.id, "student created");
    Ok(envelope::created(created))
}

pub async fn update_student(req: GateRequest, ctx: Ctx) -> HandlerResult<Student> {
    let id: StudentId = ctx.id("id")?;
    let body: StudentRequest = req.json()?;
    let university = body.university_id;

    let store = &ctx.state().students;
    let existing = store.fetch(&id)?;
    let record = Student::with_id(id, body, existing.created_at);
    let email = record.email.clone();

    let updated = with_university(&ctx, university, || {
        store.replace_unique(record, &|s: &Student| s.email == email)
    })?;
    Ok(envelope::success(updated))
}

pub async fn delete_student(_req: GateRequest, ctx: Ctx) -> HandlerResult<Student> {
    let id: StudentId = ctx.id("id")?;
    let removed = ctx.state().students.delete(&id)?;

    tracing::info!(student_id = %id, "student deleted");
    Ok(envelope::success(removed))
}
