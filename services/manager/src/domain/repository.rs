#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use cla_domain::id::LinkId;
use cla_domain::purpose::Purpose;

use crate::domain::filter::{LinkFilter, ManagerFilter};
use crate::domain::types::{LinkManagers, ManagerEntry, ManagerPatch, VerificationCode};
use crate::error::ManagerServiceError;

/// Storage for link rosters: the manager array embedded in each link.
pub trait RosterStore: Send + Sync {
    type Session: RosterSession;

    /// Open an atomic session on one link's roster.
    ///
    /// Sessions on the same link are serialized; sessions on different links
    /// never block each other. Dropping a session without `commit` discards
    /// every write made through it. Fails with `NoRecordFound` if the link
    /// does not exist.
    async fn begin(&self, link_id: &LinkId) -> Result<Self::Session, ManagerServiceError>;

    /// Read committed rosters across links. Only links with at least one
    /// matching entry are returned, each with just its matching entries.
    async fn get_array_elem(
        &self,
        links: &LinkFilter,
        managers: &ManagerFilter,
    ) -> Result<Vec<LinkManagers>, ManagerServiceError>;
}

/// Read/write access to one link's roster inside a [`RosterStore`] session.
pub trait RosterSession: Send + Sized {
    /// Entries matching `filter`, in insertion order.
    async fn get_array_elem(
        &mut self,
        filter: &ManagerFilter,
    ) -> Result<Vec<ManagerEntry>, ManagerServiceError>;

    /// Append entries to the roster.
    async fn push_array_items(&mut self, items: &[ManagerEntry])
    -> Result<(), ManagerServiceError>;

    /// Remove every entry matching `filter`. Returns how many were removed.
    async fn pull_array_items(&mut self, filter: &ManagerFilter)
    -> Result<u64, ManagerServiceError>;

    /// Apply `patch` to the first entry matching `filter`.
    /// Returns `false` if nothing matched.
    async fn update_array_item(
        &mut self,
        filter: &ManagerFilter,
        patch: &ManagerPatch,
    ) -> Result<bool, ManagerServiceError>;

    /// Set the link's admin-added flag. Setting it again is a no-op.
    async fn mark_admin_added(&mut self) -> Result<(), ManagerServiceError>;

    async fn commit(self) -> Result<(), ManagerServiceError>;
}

/// Repository for verification codes, one record per `(recipient, purpose)`.
pub trait VerificationCodeRepository: Send + Sync {
    /// Insert the code, replacing any record for the same pair.
    async fn upsert(&self, code: &VerificationCode) -> Result<(), ManagerServiceError>;

    async fn find(
        &self,
        recipient: &str,
        purpose: &Purpose,
    ) -> Result<Option<VerificationCode>, ManagerServiceError>;

    /// Delete the record only if it holds `code` and is unexpired at `now`.
    /// Returns `true` if a record was consumed.
    async fn take_matching(
        &self,
        recipient: &str,
        purpose: &Purpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ManagerServiceError>;

    /// Delete the record only if it is expired at `now`, so a code reissued
    /// since the caller's read survives. Returns `true` if a record was removed.
    async fn delete_expired(
        &self,
        recipient: &str,
        purpose: &Purpose,
        now: DateTime<Utc>,
    ) -> Result<bool, ManagerServiceError>;

    /// Delete every record expired at `now`. Returns how many were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, ManagerServiceError>;
}
