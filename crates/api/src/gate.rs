//! Request handler gate.
//!
//! Every route passes its business function through [`create_handler`], which
//! runs the same pipeline for each request:
//!
//! 1. body validation (non-read methods, when a validator is configured)
//! 2. bearer-token authentication (when `require_auth`)
//! 3. role authorization (when `require_auth` and roles are listed)
//! 4. the business function
//! 5. response shaping into an [`ApiEnvelope`](crate::envelope::ApiEnvelope)
//!
//! Any step may answer early; later steps (and the business function) then
//! never run. The gate keeps no state between requests.

use std::{
    collections::{HashMap, HashSet},
    future::Future,
    marker::PhantomData,
    pin::Pin,
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, Request},
    handler::Handler,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

use admissions_auth::{Role, TokenClaims, TokenVerifier, authorize_role};
use admissions_core::Validator;

use crate::context::{GateRequest, RequestContext};
use crate::envelope::{self, ApiResponse};
use crate::errors::{GateRejection, HandlerError, HandlerResult, INTERNAL_SERVER_ERROR};
use crate::middleware::extract_token;

/// Process-wide settings the gate reads from application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSettings {
    /// Cookie consulted when no `Authorization` header is present.
    pub auth_cookie: String,
    /// Attach internal error detail to 500 envelopes.
    pub dev_mode: bool,
    pub max_body_bytes: usize,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            auth_cookie: "auth_token".to_string(),
            dev_mode: false,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// What the gate needs from application state.
pub trait GateState: Send + Sync {
    fn token_verifier(&self) -> &dyn TokenVerifier;
    fn gate_settings(&self) -> &GateSettings;
}

impl<T> GateState for Arc<T>
where
    T: GateState + ?Sized,
{
    fn token_verifier(&self) -> &dyn TokenVerifier {
        (**self).token_verifier()
    }

    fn gate_settings(&self) -> &GateSettings {
        (**self).gate_settings()
    }
}

/// Route-level gate configuration, fixed when the route is defined.
#[derive(Clone, Default)]
pub struct HandlerConfig {
    validate_body: Option<Arc<dyn Validator>>,
    require_auth: bool,
    allowed_roles: HashSet<Role>,
}

impl HandlerConfig {
    /// No validation, no authentication.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate_body(mut self, validator: impl Validator + 'static) -> Self {
        self.validate_body = Some(Arc::new(validator));
        self
    }

    pub fn require_auth(mut self) -> Self {
        self.require_auth = true;
        self
    }

    /// Restrict the route to the given roles.
    ///
    /// Only enforced together with [`HandlerConfig::require_auth`].
    pub fn allow_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.allowed_roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn requires_auth(&self) -> bool {
        self.require_auth
    }

    pub fn allowed_roles(&self) -> &HashSet<Role> {
        &self.allowed_roles
    }
}

impl core::fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerConfig")
            .field("validate_body", &self.validate_body.is_some())
            .field("require_auth", &self.require_auth)
            .field("allowed_roles", &self.allowed_roles)
            .finish()
    }
}

/// A business function wrapped in the gate; usable as an axum handler.
pub struct Gate<F, S> {
    business: F,
    config: Arc<HandlerConfig>,
    _state: PhantomData<fn() -> S>,
}

impl<F: Clone, S> Clone for Gate<F, S> {
    fn clone(&self) -> Self {
        Self {
            business: self.business.clone(),
            config: Arc::clone(&self.config),
            _state: PhantomData,
        }
    }
}

/// Wrap `business` with validation, authentication and response shaping.
pub fn create_handler<F, Fut, T, S>(business: F, config: HandlerConfig) -> Gate<F, S>
where
    F: Fn(GateRequest, RequestContext<S>) -> Fut,
    Fut: Future<Output = HandlerResult<T>>,
{
    if !config.allowed_roles.is_empty() && !config.require_auth {
        tracing::warn!(
            roles = ?config.allowed_roles,
            "allowed roles configured without require_auth; roles will not be enforced"
        );
    }

    Gate {
        business,
        config: Arc::new(config),
        _state: PhantomData,
    }
}

fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Parse a body as JSON; anything unparseable (or empty) is an empty object.
fn parse_body(bytes: &Bytes) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) | Err(_) => empty_object(),
        Ok(value) => value,
    }
}

fn reject<T>(rejection: GateRejection) -> ApiResponse<T> {
    tracing::debug!(status = %rejection.status(), reason = %rejection, "request rejected by gate");
    rejection.to_response()
}

impl<F, Fut, T, S> Gate<F, S>
where
    F: Fn(GateRequest, RequestContext<S>) -> Fut,
    Fut: Future<Output = HandlerResult<T>>,
    S: GateState + Clone + Send + Sync + 'static,
{
    /// Run the full pipeline for one request.
    pub async fn handle(&self, req: Request, state: S) -> ApiResponse<T> {
        let (mut parts, body) = req.into_parts();
        let settings = state.gate_settings();

        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, &state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        let read_only = is_read_only(&parts.method);
        let body = if read_only {
            empty_object()
        } else {
            match axum::body::to_bytes(body, settings.max_body_bytes).await {
                Ok(bytes) => parse_body(&bytes),
                Err(e) => {
                    tracing::debug!(error = %e, "failed to read request body");
                    return reject(GateRejection::UnreadableBody);
                }
            }
        };

        if let Some(validator) = self.config.validate_body.as_deref() {
            if !read_only {
                let outcome = validator.validate(&body);
                if !outcome.valid {
                    return reject(GateRejection::ValidationFailed(outcome.summary()));
                }
            }
        }

        let user = if self.config.require_auth {
            match self.authenticate(&parts.headers, &state) {
                Ok(claims) => Some(claims),
                Err(rejection) => return reject(rejection),
            }
        } else {
            None
        };

        let request = GateRequest::new(parts.method, parts.uri, parts.headers, body);
        let ctx = RequestContext::new(params, user, state.clone());

        match (self.business)(request, ctx).await {
            Ok(response) => response,
            Err(HandlerError::Request(err)) => {
                tracing::debug!(status = %err.status(), error = %err, "request failed");
                err.to_response()
            }
            Err(HandlerError::Internal(err)) => {
                tracing::error!(error = %format!("{err:#}"), "unhandled error in handler");
                let response = envelope::fail(INTERNAL_SERVER_ERROR)
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR);
                if settings.dev_mode {
                    response.with_debug(format!("{err:?}"))
                } else {
                    response
                }
            }
        }
    }

    fn authenticate(&self, headers: &HeaderMap, state: &S) -> Result<TokenClaims, GateRejection> {
        let token = extract_token(headers, &state.gate_settings().auth_cookie)
            .ok_or(GateRejection::MissingCredentials)?;

        let claims = state
            .token_verifier()
            .verify(&token, Utc::now())
            .map_err(|e| {
                tracing::debug!(error = %e, "token verification failed");
                GateRejection::InvalidToken
            })?;

        authorize_role(&claims, &self.config.allowed_roles).map_err(|e| {
            tracing::debug!(sub = %claims.sub, error = %e, "role not permitted");
            GateRejection::Forbidden
        })?;

        Ok(claims)
    }
}

/// Marker for the gate's [`Handler`] implementation.
#[derive(Debug, Clone, Copy)]
pub struct GateMarker;

impl<F, Fut, T, S> Handler<GateMarker, S> for Gate<F, S>
where
    F: Fn(GateRequest, RequestContext<S>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult<T>> + Send + 'static,
    T: Serialize + Send + 'static,
    S: GateState + Clone + Send + Sync + 'static,
{
    type Future = Pin<Box<dyn Future<Output = Response> + Send>>;

    fn call(self, req: Request, state: S) -> Self::Future {
        Box::pin(async move { self.handle(req, state).await.into_response() })
    }
}
