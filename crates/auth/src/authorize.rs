use std::collections::HashSet;

use thiserror::Error;

use crate::{Role, TokenClaims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{0}' is not permitted")]
    Forbidden(Role),
}

/// Check an authenticated caller's role against a route's allow-list.
///
/// An empty allow-list admits every authenticated caller.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize_role(claims: &TokenClaims, allowed: &HashSet<Role>) -> Result<(), AuthzError> {
    if allowed.is_empty() || allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(claims.role.clone()))
    }
}
