use serde_json::{Value, json};

use crate::app::routes::Ctx;
use crate::context::GateRequest;
use crate::envelope;
use crate::errors::HandlerResult;

pub async fn health(_req: GateRequest, _ctx: Ctx) -> HandlerResult<Value> {
    Ok(envelope::success(json!({ "status": "ok" })))
}
