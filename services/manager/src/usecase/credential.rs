use std::collections::HashMap;

use tracing::{info, warn};

use cla_domain::id::LinkId;

use crate::domain::filter::{LinkFilter, ManagerFilter};
use crate::domain::repository::{RosterSession, RosterStore};
use crate::domain::types::{CredentialMatch, ManagerPatch};
use crate::error::ManagerServiceError;

// ── CheckCredentials ─────────────────────────────────────────────────────────

pub struct CheckCredentialsInput {
    pub user: String,
    pub password_hash: String,
}

pub struct CheckCredentialsUseCase<S: RosterStore> {
    pub roster: S,
}

impl<S: RosterStore> CheckCredentialsUseCase<S> {
    /// Looks the credential up on every enabled corporation link, since one
    /// manager may administer several links with the same email and password.
    pub async fn execute(
        &self,
        input: CheckCredentialsInput,
    ) -> Result<HashMap<LinkId, Vec<CredentialMatch>>, ManagerServiceError> {
        let filter = ManagerFilter::all()
            .email(input.user)
            .password_hash(input.password_hash);
        let found = self
            .roster
            .get_array_elem(&LinkFilter::corporation_managers(), &filter)
            .await?;

        let mut result = HashMap::with_capacity(found.len());
        for doc in found {
            if doc.managers.is_empty() {
                continue;
            }
            // emails are unique per roster; several hits point at bad data
            if doc.managers.len() > 1 {
                warn!(
                    link_id = %doc.link.id,
                    matches = doc.managers.len(),
                    "multiple roster entries match one credential"
                );
            }
            let matches = doc
                .managers
                .into_iter()
                .map(|m| CredentialMatch {
                    email: m.email,
                    role: m.role,
                    platform: doc.link.platform.clone(),
                    org_id: doc.link.org_id.clone(),
                    repo_id: doc.link.repo_id.clone(),
                    initial_password_changed: m.initial_password_changed,
                })
                .collect();
            result.insert(doc.link.id, matches);
        }

        if result.is_empty() {
            return Err(ManagerServiceError::NoRecordFound);
        }
        Ok(result)
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub link_id: LinkId,
    pub email: String,
    pub old_password_hash: String,
    pub new_password_hash: String,
}

pub struct ResetPasswordUseCase<S: RosterStore> {
    pub roster: S,
}

impl<S: RosterStore> ResetPasswordUseCase<S> {
    /// Unknown email and wrong old password both fail with `InvalidCredential`.
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), ManagerServiceError> {
        let mut session = self.roster.begin(&input.link_id).await?;

        let filter = ManagerFilter::all()
            .email(input.email)
            .password_hash(input.old_password_hash);
        let updated = session
            .update_array_item(&filter, &ManagerPatch::password_changed(input.new_password_hash))
            .await?;
        if !updated {
            return Err(ManagerServiceError::InvalidCredential);
        }
        session.commit().await?;

        info!(link_id = %input.link_id, "corporation manager password reset");
        Ok(())
    }
}
