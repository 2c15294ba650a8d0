//! `admissions-auth`: access tokens and role checks.
//!
//! This crate is decoupled from HTTP and storage: it knows how to mint and
//! verify access tokens and how to check a caller's role.

pub mod authorize;
pub mod claims;
pub mod roles;
pub mod token;

pub use authorize::{AuthzError, authorize_role};
pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use roles::Role;
pub use token::{Hs256Tokens, IssuedToken, TokenError, TokenIssuer, TokenVerifier};
