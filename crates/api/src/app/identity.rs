//! Account lookup behind `POST /auth/login`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use admissions_auth::Role;
use admissions_core::{DomainError, DomainResult, UserId};

use crate::app::dto::normalize_email;

/// Public view of an account, returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

/// Checks credentials against whatever holds the accounts.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` for unknown emails and wrong passwords alike.
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<UserAccount>>;
}

#[derive(Debug, Clone)]
struct StoredAccount {
    account: UserAccount,
    password_digest: String,
}

/// Process-local identity store for development and tests.
///
/// Emails are matched case-insensitively. Passwords are kept as SHA-256
/// digests salted with the account id.
#[derive(Default)]
pub struct InMemoryIdentity {
    accounts: RwLock<HashMap<String, StoredAccount>>,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, email: &str, password: &str, role: Role) -> DomainResult<UserAccount> {
        let key = normalize_email(email);
        if key.is_empty() || password.is_empty() {
            return Err(DomainError::validation("email and password are required"));
        }

        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(&key) {
            return Err(DomainError::already_exists(format!("account {key}")));
        }

        let account = UserAccount {
            id: UserId::new(),
            email: key.clone(),
            role,
        };
        let password_digest = password_digest(&account.id, password);
        accounts.insert(
            key,
            StoredAccount {
                account: account.clone(),
                password_digest,
            },
        );

        Ok(account)
    }

    pub fn len(&self) -> usize {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for InMemoryIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryIdentity")
            .field("accounts", &self.len())
            .finish()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentity {
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<UserAccount>> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        let Some(stored) = accounts.get(&normalize_email(email)) else {
            return Ok(None);
        };

        if password_digest(&stored.account.id, password) == stored.password_digest {
            Ok(Some(stored.account.clone()))
        } else {
            Ok(None)
        }
    }
}

fn password_digest(id: &UserId, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_uuid().as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
