use std::collections::HashMap;
use std::str::FromStr;

use axum::http::{HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;
use serde_json::Value;

use admissions_auth::TokenClaims;
use admissions_core::DomainError;

use crate::errors::RequestError;

/// The request as seen by a business function.
///
/// The body has already been read and parsed by the gate; reads and
/// unparseable bodies show up as an empty JSON object.
#[derive(Debug, Clone)]
pub struct GateRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Value,
}

impl GateRequest {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Value) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Deserialize the body into a typed DTO (400 on shape mismatch).
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| RequestError::new(format!("Invalid request body: {e}")))
    }
}

/// Per-request context handed to business functions.
///
/// Holds route parameters, the verified token claims (only when the route
/// requires authentication) and the injected application state.
#[derive(Debug, Clone)]
pub struct RequestContext<S> {
    params: HashMap<String, String>,
    user: Option<TokenClaims>,
    state: S,
}

impl<S> RequestContext<S> {
    pub fn new(params: HashMap<String, String>, user: Option<TokenClaims>, state: S) -> Self {
        Self {
            params,
            user,
            state,
        }
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Result<&str, RequestError> {
        self.params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RequestError::new(format!("missing path parameter '{name}'")))
    }

    /// Parse a path parameter into a typed id (`DomainError::InvalidId` on failure).
    pub fn id<T>(&self, name: &str) -> Result<T, crate::errors::HandlerError>
    where
        T: FromStr<Err = DomainError>,
    {
        Ok(self.param(name)?.parse::<T>()?)
    }

    pub fn user(&self) -> Option<&TokenClaims> {
        self.user.as_ref()
    }

    /// Claims of the caller, or 401 when the route did not authenticate.
    pub fn require_user(&self) -> Result<&TokenClaims, RequestError> {
        self.user
            .as_ref()
            .ok_or_else(|| RequestError::unauthorized("Authentication required"))
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admissions_core::UniversityId;
    use axum::http::StatusCode;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Login {
        email: String,
    }

    fn request(body: Value) -> GateRequest {
        GateRequest::new(Method::POST, Uri::from_static("/auth/login"), HeaderMap::new(), body)
    }

    #[test]
    fn json_deserializes_body() {
        let login: Login = request(json!({"email": "a@b.edu"})).json().unwrap();
        assert_eq!(login.email, "a@b.edu");
    }

    #[test]
    fn json_shape_mismatch_is_400() {
        let err = request(json!({})).json::<Login>().unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().starts_with("Invalid request body"));
    }

    #[test]
    fn typed_ids_come_from_params() {
        let id = UniversityId::new();
        let params = HashMap::from([("id".to_string(), id.to_string())]);
        let ctx = RequestContext::new(params, None, ());

        assert_eq!(ctx.id::<UniversityId>("id").unwrap(), id);
        assert!(ctx.id::<UniversityId>("missing").is_err());
    }

    #[test]
    fn require_user_is_401_when_anonymous() {
        let ctx = RequestContext::new(HashMap::new(), None, ());
        assert_eq!(ctx.require_user().unwrap_err().status(), StatusCode::UNAUTHORIZED);
    }
}
