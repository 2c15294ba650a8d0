use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use admissions_core::{
    ApplicationId, Entity, MessageId, RoleId, StaffId, StudentId, UniversityId,
};

use crate::app::identity::UserAccount;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Create and full-update body for universities.
#[derive(Debug, Deserialize)]
pub struct UniversityRequest {
    pub name: String,
    pub country: String,
    pub city: String,
    pub website: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StaffRequest {
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub university_id: Option<UniversityId>,
}

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Contact form.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Applicant form.
#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub program: String,
    pub university_id: Option<UniversityId>,
    pub notes: Option<String>,
}

// -------------------------
// Response DTOs / records
// -------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserAccount,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    pub id: UniversityId,
    pub name: String,
    pub country: String,
    pub city: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl University {
    pub fn new(req: UniversityRequest, now: DateTime<Utc>) -> Self {
        Self::with_id(UniversityId::new(), req, now)
    }

    pub fn with_id(id: UniversityId, req: UniversityRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: req.name.trim().to_string(),
            country: req.country.trim().to_string(),
            city: req.city.trim().to_string(),
            website: trimmed(req.website),
            description: trimmed(req.description),
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StaffMember {
    pub fn with_id(id: StaffId, req: StaffRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: req.name.trim().to_string(),
            email: normalize_email(&req.email),
            position: trimmed(req.position),
            phone: trimmed(req.phone),
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub university_id: Option<UniversityId>,
    pub created_at: DateTime<Utc>,
}

impl Student {
    pub fn with_id(id: StudentId, req: StudentRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: normalize_email(&req.email),
            phone: trimmed(req.phone),
            university_id: req.university_id,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub id: RoleId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RoleDefinition {
    pub fn new(req: RoleRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: RoleId::new(),
            name: req.name.trim().to_ascii_lowercase(),
            description: trimmed(req.description),
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(req: MessageRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            name: req.name.trim().to_string(),
            email: normalize_email(&req.email),
            subject: req.subject.trim().to_string(),
            message: req.message.trim().to_string(),
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub program: String,
    pub university_id: Option<UniversityId>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Application {
    pub fn new(req: ApplicationRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ApplicationId::new(),
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: normalize_email(&req.email),
            phone: req.phone.trim().to_string(),
            program: req.program.trim().to_string(),
            university_id: req.university_id,
            notes: trimmed(req.notes),
            created_at,
        }
    }
}

macro_rules! impl_entity {
    ($record:ty, $id:ty) => {
        impl Entity for $record {
            type Id = $id;

            fn id(&self) -> &$id {
                &self.id
            }
        }
    };
}

impl_entity!(University, UniversityId);
impl_entity!(StaffMember, StaffId);
impl_entity!(Student, StudentId);
impl_entity!(RoleDefinition, RoleId);
impl_entity!(Message, MessageId);
impl_entity!(Application, ApplicationId);

// -------------------------
// Helpers
// -------------------------

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Case-insensitive, whitespace-insensitive name comparison used for
/// uniqueness checks.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
