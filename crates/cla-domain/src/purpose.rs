//! Verification-code purposes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::LinkId;

/// Opaque key telling why a verification code was requested.
///
/// Codes are stored per `(recipient, purpose)`; the key is only ever compared
/// for equality. The constructors below build the keys used by the portal's
/// flows, but any string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Purpose(pub String);

impl Purpose {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Signing a CLA on a link. Keyed by the bare link id.
    pub fn signing(link_id: &LinkId) -> Self {
        Self(link_id.0.clone())
    }

    /// A corporation manager adding another email domain.
    pub fn adding_email_domain(manager_email: &str) -> Self {
        Self(format!("adding email domain: {manager_email}"))
    }

    /// A corporation manager retrieving a forgotten password on a link.
    pub fn password_recovery(link_id: &LinkId) -> Self {
        Self(format!("password recovery: {link_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
