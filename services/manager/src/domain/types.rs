use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cla_domain::id::LinkId;
use cla_domain::link::ApplyTo;
use cla_domain::manager::ManagerRole;
use cla_domain::purpose::Purpose;

/// One corporation manager on a link's roster.
///
/// `password_hash` is whatever encoding the caller applies to passwords; the
/// roster only ever compares it for equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerEntry {
    pub role: ManagerRole,
    pub email: String,
    pub password_hash: String,
    pub initial_password_changed: bool,
}

impl ManagerEntry {
    /// A manager that has not yet replaced the password it was created with.
    pub fn new(
        role: ManagerRole,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            role,
            email: email.into(),
            password_hash: password_hash.into(),
            initial_password_changed: false,
        }
    }
}

/// Email and role of a roster entry, without credentials.
/// Returned by listings and used to name managers to delete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagerRef {
    pub email: String,
    pub role: ManagerRole,
}

impl From<&ManagerEntry> for ManagerRef {
    fn from(entry: &ManagerEntry) -> Self {
        Self {
            email: entry.email.clone(),
            role: entry.role,
        }
    }
}

/// Link fields the roster reads. The link itself is owned elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: LinkId,
    pub platform: String,
    pub org_id: String,
    pub repo_id: Option<String>,
    pub apply_to: ApplyTo,
    pub enabled: bool,
    pub admin_added: bool,
}

/// A link together with those of its managers that matched a query.
#[derive(Debug, Clone)]
pub struct LinkManagers {
    pub link: LinkRecord,
    pub managers: Vec<ManagerEntry>,
}

/// Fields to set on a roster entry. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerPatch {
    pub password_hash: Option<String>,
    pub initial_password_changed: Option<bool>,
}

impl ManagerPatch {
    /// Patch applied by a password reset.
    pub fn password_changed(new_password_hash: impl Into<String>) -> Self {
        Self {
            password_hash: Some(new_password_hash.into()),
            initial_password_changed: Some(true),
        }
    }

    pub fn apply(&self, entry: &mut ManagerEntry) {
        if let Some(hash) = &self.password_hash {
            entry.password_hash = hash.clone();
        }
        if let Some(changed) = self.initial_password_changed {
            entry.initial_password_changed = changed;
        }
    }
}

/// A successful credential match on one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialMatch {
    pub email: String,
    pub role: ManagerRole,
    pub platform: String,
    pub org_id: String,
    pub repo_id: Option<String>,
    pub initial_password_changed: bool,
}

/// Verification code issued to `recipient` for `purpose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub recipient: String,
    pub purpose: Purpose,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    /// A code is still valid at the instant it expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Verification code length in digits.
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Default verification code time-to-live in seconds.
pub const DEFAULT_VERIFICATION_CODE_TTL_SECS: i64 = 300;

/// Default maximum number of managers on one link.
pub const DEFAULT_CORPORATION_MANAGER_NUMBER: usize = 5;
