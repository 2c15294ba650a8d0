use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use chrono::Utc;

use admissions_auth::{TokenClaims, TokenIssuer};

use crate::app::dto::{LoginRequest, LoginResponse};
use crate::app::routes::{Ctx, public};
use crate::app::services::AppServices;
use crate::app::validators;
use crate::context::GateRequest;
use crate::envelope;
use crate::errors::{HandlerResult, RequestError};
use crate::gate::create_handler;

pub fn router() -> Router<Arc<AppServices>> {
    Router::new()
        .route(
            "/login",
            post(create_handler(login, public().validate_body(validators::login()))),
        )
        .route(
            "/me",
            get(create_handler(me, public().require_auth())),
        )
}

/// Exchange email + password for a signed access token.
pub async fn login(req: GateRequest, ctx: Ctx) -> HandlerResult<LoginResponse> {
    let body: LoginRequest = req.json()?;
    let services = ctx.state();

    let Some(user) = services
        .identity()
        .authenticate(&body.email, &body.password)
        .await?
    else {
        tracing::info!("login rejected: bad credentials");
        return Err(RequestError::unauthorized("Invalid email or password").into());
    };

    let issued = services
        .tokens()
        .issue(user.id, &user.email, user.role.clone(), Utc::now())?;

    tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");

    Ok(envelope::success(LoginResponse {
        user,
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// Claims of the current caller.
pub async fn me(_req: GateRequest, ctx: Ctx) -> HandlerResult<TokenClaims> {
    Ok(envelope::success(ctx.require_user()?.clone()))
}
