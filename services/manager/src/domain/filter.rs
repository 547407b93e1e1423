//! Predicate objects for roster queries.
//!
//! Every field is optional; an unset field matches everything. Store adapters
//! translate these into their own query language, and `matches` gives the
//! reference semantics.

use cla_domain::id::LinkId;
use cla_domain::link::ApplyTo;
use cla_domain::manager::ManagerRole;

use crate::domain::types::{LinkRecord, ManagerEntry};

/// Selects link documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    pub id: Option<LinkId>,
    pub enabled: Option<bool>,
    pub apply_to: Option<ApplyTo>,
}

impl LinkFilter {
    pub fn any() -> Self {
        Self::default()
    }

    /// Links whose corporation managers may sign in: enabled corporation links.
    pub fn corporation_managers() -> Self {
        Self::any().enabled(true).apply_to(ApplyTo::Corporation)
    }

    pub fn id(mut self, id: LinkId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn apply_to(mut self, apply_to: ApplyTo) -> Self {
        self.apply_to = Some(apply_to);
        self
    }

    pub fn matches(&self, link: &LinkRecord) -> bool {
        self.id.as_ref().is_none_or(|id| *id == link.id)
            && self.enabled.is_none_or(|e| e == link.enabled)
            && self.apply_to.is_none_or(|a| a == link.apply_to)
    }
}

/// Selects entries within a link's roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerFilter {
    pub email: Option<String>,
    pub emails: Option<Vec<String>>,
    pub role: Option<ManagerRole>,
    pub password_hash: Option<String>,
}

impl ManagerFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn email_in<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emails = Some(emails.into_iter().map(Into::into).collect());
        self
    }

    pub fn role(mut self, role: ManagerRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    pub fn matches(&self, entry: &ManagerEntry) -> bool {
        self.email.as_ref().is_none_or(|e| *e == entry.email)
            && self
                .emails
                .as_ref()
                .is_none_or(|es| es.iter().any(|e| *e == entry.email))
            && self.role.is_none_or(|r| r == entry.role)
            && self
                .password_hash
                .as_ref()
                .is_none_or(|p| *p == entry.password_hash)
    }
}
