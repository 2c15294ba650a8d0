use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use admissions_auth::{Hs256Tokens, Role, TokenVerifier};

use crate::app::dto::{
    Application, Message, RoleDefinition, RoleRequest, StaffMember, Student, University,
};
use crate::app::identity::{IdentityProvider, InMemoryIdentity};
use crate::app::store::Collection;
use crate::config::AppConfig;
use crate::gate::{GateSettings, GateState};

/// Application state shared by every route (behind an `Arc`).
pub struct AppServices {
    identity: Arc<dyn IdentityProvider>,
    tokens: Hs256Tokens,
    settings: GateSettings,

    pub universities: Collection<University>,
    pub staff: Collection<StaffMember>,
    pub students: Collection<Student>,
    pub roles: Collection<RoleDefinition>,
    pub messages: Collection<Message>,
    pub applications: Collection<Application>,
}

impl AppServices {
    pub fn new(identity: Arc<dyn IdentityProvider>, tokens: Hs256Tokens, settings: GateSettings) -> Self {
        Self {
            identity,
            tokens,
            settings,
            universities: Collection::new("university"),
            staff: Collection::new("staff member"),
            students: Collection::new("student"),
            roles: Collection::with_records("role", builtin_roles(Utc::now())),
            messages: Collection::new("message"),
            applications: Collection::new("application"),
        }
    }

    /// In-memory services configured from `config`, with the bootstrap admin
    /// registered when both `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let identity = InMemoryIdentity::new();

        match (&config.admin_email, &config.admin_password) {
            (Some(email), Some(password)) => {
                let admin = identity.register(email, password, Role::admin())?;
                tracing::info!(user_id = %admin.id, email = %admin.email, "bootstrap admin registered");
            }
            (None, None) => {
                tracing::warn!("no bootstrap admin configured; login will reject every account");
            }
            _ => {
                tracing::warn!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together; bootstrap admin skipped");
            }
        }

        let ttl = Duration::try_minutes(config.token_ttl_minutes)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                anyhow::anyhow!("token lifetime out of range: {} minutes", config.token_ttl_minutes)
            })?;
        let tokens = Hs256Tokens::new(config.jwt_secret.as_bytes(), ttl);
        let settings = GateSettings {
            auth_cookie: config.auth_cookie.clone(),
            dev_mode: config.dev_mode,
            max_body_bytes: config.max_body_bytes,
        };

        Ok(Self::new(Arc::new(identity), tokens, settings))
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    pub fn tokens(&self) -> &Hs256Tokens {
        &self.tokens
    }
}

/// Role names tokens may carry; these cannot be deleted.
pub const BUILTIN_ROLES: [&str; 3] = [Role::ADMIN, Role::STAFF, Role::STUDENT];

fn builtin_roles(now: DateTime<Utc>) -> Vec<RoleDefinition> {
    BUILTIN_ROLES
        .iter()
        .map(|name| {
            RoleDefinition::new(
                RoleRequest {
                    name: (*name).to_string(),
                    description: Some("built-in".to_string()),
                },
                now,
            )
        })
        .collect()
}

impl GateState for AppServices {
    fn token_verifier(&self) -> &dyn TokenVerifier {
        &self.tokens
    }

    fn gate_settings(&self) -> &GateSettings {
        &self.settings
    }
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("tokens", &self.tokens)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
