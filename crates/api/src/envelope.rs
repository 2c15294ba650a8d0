//! Uniform JSON envelope returned by every route.
//!
//! ```json
//! { "success": true, "data": { ... }, "error": null }
//! { "success": false, "data": null, "error": "Insufficient permissions" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// `{ success, data, error }` wrapper.
///
/// Invariant: `success == true` implies `error` is `None`; `success == false`
/// implies `data` is `None`. Only the constructors below build envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,

    /// Internal error detail; only populated in development mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

/// An envelope paired with the HTTP status it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    status: StatusCode,
    envelope: ApiEnvelope<T>,
}

/// `{success: true, data, error: null}` at 200.
pub fn success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        status: StatusCode::OK,
        envelope: ApiEnvelope {
            success: true,
            data: Some(data),
            error: None,
            debug: None,
        },
    }
}

/// `{success: true, data, error: null}` at 201.
pub fn created<T>(data: T) -> ApiResponse<T> {
    success(data).with_status(StatusCode::CREATED)
}

/// `{success: false, data: null, error}` at 400.
pub fn fail<T>(error: impl Into<String>) -> ApiResponse<T> {
    ApiResponse {
        status: StatusCode::BAD_REQUEST,
        envelope: ApiEnvelope {
            success: false,
            data: None,
            error: Some(error.into()),
            debug: None,
        },
    }
}

impl<T> ApiResponse<T> {
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Attach internal error detail (failure envelopes only).
    pub(crate) fn with_debug(mut self, detail: String) -> Self {
        if !self.envelope.success {
            self.envelope.debug = Some(detail);
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn envelope(&self) -> &ApiEnvelope<T> {
        &self.envelope
    }

    pub fn into_parts(self) -> (StatusCode, ApiEnvelope<T>) {
        (self.status, self.envelope)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn success_defaults_to_ok() {
        let res = success(json!({"id": 1}));
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(res.envelope()).unwrap(),
            json!({"success": true, "data": {"id": 1}, "error": null})
        );
    }

    #[test]
    fn fail_defaults_to_bad_request() {
        let res = fail::<()>("Bad request error");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(res.envelope()).unwrap(),
            json!({"success": false, "data": null, "error": "Bad request error"})
        );
    }

    #[test]
    fn created_is_201() {
        assert_eq!(created("x").status(), StatusCode::CREATED);
    }

    #[test]
    fn debug_only_sticks_to_failures() {
        let ok = success(1).with_debug("boom".to_string());
        assert_eq!(ok.envelope().debug, None);

        let err = fail::<i32>("Internal server error").with_debug("boom".to_string());
        let body = serde_json::to_value(err.envelope()).unwrap();
        assert_eq!(body["debug"], "boom");
    }

    #[tokio::test]
    async fn into_response_uses_envelope_status() {
        let res = fail::<()>("nope").with_status(StatusCode::CONFLICT).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "nope");
        assert_eq!(body["success"], false);
    }

    proptest! {
        /// Property: `success(data).with_status(s)` always carries data, no error, status `s`.
        #[test]
        fn success_shape_holds_for_any_input(data in ".{0,64}", code in 200u16..600) {
            let status = StatusCode::from_u16(code).unwrap();
            let res = success(data.clone()).with_status(status);
            prop_assert_eq!(res.status(), status);

            let body = serde_json::to_value(res.envelope()).unwrap();
            prop_assert_eq!(body, json!({"success": true, "data": data, "error": null}));
        }

        /// Property: `fail(msg).with_status(s)` always carries the message, no data, status `s`.
        #[test]
        fn fail_shape_holds_for_any_input(message in ".{0,64}", code in 200u16..600) {
            let status = StatusCode::from_u16(code).unwrap();
            let res = fail::<String>(message.clone()).with_status(status);
            prop_assert_eq!(res.status(), status);

            let body = serde_json::to_value(res.envelope()).unwrap();
            prop_assert_eq!(body, json!({"success": false, "data": null, "error": message}));
        }
    }
}
