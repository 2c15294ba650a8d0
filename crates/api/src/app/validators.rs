//! Body validators for the routes that accept input.

use admissions_core::{FieldValidator, Rule};

pub fn login() -> FieldValidator {
    FieldValidator::new()
        .field("email", [Rule::Required, Rule::Email])
        .field("password", [Rule::Required])
}

pub fn university() -> FieldValidator {
    FieldValidator::new()
        .field("name", [Rule::Required, Rule::MinLength(2), Rule::MaxLength(200)])
        .field("country", [Rule::Required, Rule::MaxLength(100)])
        .field("city", [Rule::Required, Rule::MaxLength(100)])
        .field("website", [Rule::MaxLength(300)])
        .field("description", [Rule::MaxLength(5000)])
}

pub fn staff() -> FieldValidator {
    FieldValidator::new()
        .field("name", [Rule::Required, Rule::MinLength(2), Rule::MaxLength(200)])
        .field("email", [Rule::Required, Rule::Email])
        .field("position", [Rule::MaxLength(100)])
        .field("phone", [Rule::Phone])
}

pub fn student() -> FieldValidator {
    FieldValidator::new()
        .field("first_name", [Rule::Required, Rule::MaxLength(100)])
        .field("last_name", [Rule::Required, Rule::MaxLength(100)])
        .field("email", [Rule::Required, Rule::Email])
        .field("phone", [Rule::Phone])
}

pub fn role() -> FieldValidator {
    FieldValidator::new()
        .field("name", [Rule::Required, Rule::MinLength(2), Rule::MaxLength(50)])
        .field("description", [Rule::MaxLength(500)])
}

/// Public contact form.
pub fn message() -> FieldValidator {
    FieldValidator::new()
        .field("name", [Rule::Required, Rule::MaxLength(200)])
        .field("email", [Rule::Required, Rule::Email])
        .field("subject", [Rule::Required, Rule::MaxLength(200)])
        .field("message", [Rule::Required, Rule::MinLength(10), Rule::MaxLength(5000)])
}

/// Public applicant form.
pub fn application() -> FieldValidator {
    FieldValidator::new()
        .field("first_name", [Rule::Required, Rule::MaxLength(100)])
        .field("last_name", [Rule::Required, Rule::MaxLength(100)])
        .field("email", [Rule::Required, Rule::Email])
        .field("phone", [Rule::Required, Rule::Phone])
        .field("program", [Rule::Required, Rule::MaxLength(200)])
        .field("notes", [Rule::MaxLength(2000)])
}
