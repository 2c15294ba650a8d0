use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};
use chrono::Utc;

use admissions_core::MessageId;

use crate::app::dto::{Message, MessageRequest};
use crate::app::routes::{Ctx, admin_only, admin_or_staff, public};
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
            get(create_handler(list_messages, admin_or_staff())).post(create_handler(
                submit_message,
                public().validate_body(validators::message()),
            )),
        )
        .route("/:id", delete(create_handler(delete_message, admin_only())))
}

/// Contact form submission from the public site.
pub async fn submit_message(req: GateRequest, ctx: Ctx) -> HandlerResult<Message> {
    let body: MessageRequest = req.json()?;
    let stored = ctx.state().messages.insert(Message::new(body, Utc::now()))?;

    tracing::info!(message_id = %stored.id, "contact message received");
    Ok(envelope::created(stored))
}

pub async fn list_messages(_req: GateRequest, ctx: Ctx) -> HandlerResult<Vec<Message>> {
    Ok(envelope::success(ctx.state().messages.list()))
}

pub async fn delete_message(_req: GateRequest, ctx: Ctx) -> HandlerResult<Message> {
    let id: MessageId = ctx.id("id")?;
    Ok(envelope::success(ctx.state().messages.delete(&id)?))
}
