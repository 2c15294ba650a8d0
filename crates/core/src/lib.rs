//! `admissions-core`: domain building blocks shared by the admissions backend.
//!
//! This crate contains **pure domain** primitives (no HTTP or storage concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod validation;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ApplicationId, MessageId, RoleId, StaffId, StudentId, UniversityId, UserId};
pub use validation::{FieldValidator, Rule, ValidationOutcome, Validator};
