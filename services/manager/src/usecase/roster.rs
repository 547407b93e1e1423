use std::collections::HashSet;

use tracing::{info, warn};

use cla_domain::id::LinkId;
use cla_domain::manager::ManagerRole;

use crate::domain::filter::{LinkFilter, ManagerFilter};
use crate::domain::repository::{RosterSession, RosterStore};
use crate::domain::types::{ManagerEntry, ManagerRef};
use crate::error::ManagerServiceError;

// ── AddManagers ──────────────────────────────────────────────────────────────

pub struct AddManagersInput {
    pub link_id: LinkId,
    pub managers: Vec<ManagerEntry>,
    /// Maximum roster size for the link.
    pub quota: usize,
}

pub struct AddManagersUseCase<S: RosterStore> {
    pub roster: S,
}

impl<S: RosterStore> AddManagersUseCase<S> {
    /// Returns the entries actually appended. Emails already on the roster are
    /// skipped silently, so the result may be empty.
    pub async fn execute(
        &self,
        input: AddManagersInput,
    ) -> Result<Vec<ManagerEntry>, ManagerServiceError> {
        if input.managers.is_empty() {
            return Ok(Vec::new());
        }

        let mut session = self.roster.begin(&input.link_id).await?;
        let current = session.get_array_elem(&ManagerFilter::all()).await?;

        let present: HashSet<&str> = current.iter().map(|m| m.email.as_str()).collect();
        let mut batch = HashSet::new();
        let to_add: Vec<ManagerEntry> = input
            .managers
            .into_iter()
            .filter(|m| !present.contains(m.email.as_str()) && batch.insert(m.email.clone()))
            .collect();

        if current.len() + to_add.len() > input.quota {
            warn!(
                link_id = %input.link_id,
                current = current.len(),
                requested = to_add.len(),
                quota = input.quota,
                "manager quota exceeded"
            );
            return Err(ManagerServiceError::QuotaExceeded(input.quota));
        }

        if !to_add.is_empty() {
            session.push_array_items(&to_add).await?;
            if to_add.iter().any(|m| m.role == ManagerRole::Admin) {
                session.mark_admin_added().await?;
            }
        }
        session.commit().await?;

        info!(link_id = %input.link_id, added = to_add.len(), "corporation managers added");
        Ok(to_add)
    }
}

// ── DeleteManagers ───────────────────────────────────────────────────────────

pub struct DeleteManagersInput {
    pub link_id: LinkId,
    pub managers: Vec<ManagerRef>,
}

pub struct DeleteManagersUseCase<S: RosterStore> {
    pub roster: S,
}

impl<S: RosterStore> DeleteManagersUseCase<S> {
    /// Removes the requested managers that are on the roster with the given
    /// role and returns their emails. Absent managers are ignored.
    pub async fn execute(
        &self,
        input: DeleteManagersInput,
    ) -> Result<Vec<String>, ManagerServiceError> {
        if input.managers.is_empty() {
            return Ok(Vec::new());
        }

        let mut session = self.roster.begin(&input.link_id).await?;
        let current = session.get_array_elem(&ManagerFilter::all()).await?;

        let present: HashSet<ManagerRef> = current.iter().map(ManagerRef::from).collect();
        let mut deleted: Vec<String> = Vec::with_capacity(input.managers.len());
        for m in input.managers {
            if present.contains(&m) && !deleted.contains(&m.email) {
                deleted.push(m.email);
            }
        }

        if !deleted.is_empty() {
            session
                .pull_array_items(&ManagerFilter::all().email_in(deleted.iter().cloned()))
                .await?;
        }
        session.commit().await?;

        info!(link_id = %input.link_id, deleted = deleted.len(), "corporation managers deleted");
        Ok(deleted)
    }
}

// ── ListManagers ─────────────────────────────────────────────────────────────

pub struct ListManagersInput {
    pub link_id: LinkId,
    pub email: Option<String>,
    pub role: Option<ManagerRole>,
}

pub struct ListManagersUseCase<S: RosterStore> {
    pub roster: S,
}

impl<S: RosterStore> ListManagersUseCase<S> {
    /// Fails with `NoRecordFound` when the link is unknown and also when no
    /// entry matches the filters; callers rely on that signal.
    pub async fn execute(
        &self,
        input: ListManagersInput,
    ) -> Result<Vec<ManagerRef>, ManagerServiceError> {
        let mut filter = ManagerFilter::all();
        if let Some(email) = input.email {
            filter = filter.email(email);
        }
        if let Some(role) = input.role {
            filter = filter.role(role);
        }

        let found = self
            .roster
            .get_array_elem(&LinkFilter::any().id(input.link_id), &filter)
            .await?;

        let managers: Vec<ManagerRef> = found
            .iter()
            .flat_map(|l| l.managers.iter().map(ManagerRef::from))
            .collect();
        if managers.is_empty() {
            return Err(ManagerServiceError::NoRecordFound);
        }
        Ok(managers)
    }
}
