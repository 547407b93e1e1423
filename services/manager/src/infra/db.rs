use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    TransactionTrait,
    sea_query::{Expr, OnConflict},
};

use cla_domain::id::LinkId;
use cla_domain::link::ApplyTo;
use cla_domain::manager::ManagerRole;
use cla_domain::purpose::Purpose;
use cla_manager_schema::{corp_managers, links, verification_codes};

use crate::domain::filter::{LinkFilter, ManagerFilter};
use crate::domain::repository::{RosterSession, RosterStore, VerificationCodeRepository};
use crate::domain::types::{LinkManagers, LinkRecord, ManagerEntry, ManagerPatch, VerificationCode};
use crate::error::ManagerServiceError;

// ── Roster store ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRosterStore {
    pub db: DatabaseConnection,
}

/// A transaction holding the row lock of one link.
pub struct DbRosterSession {
    txn: DatabaseTransaction,
    link_id: LinkId,
}

impl RosterStore for DbRosterStore {
    type Session = DbRosterSession;

    async fn begin(&self, link_id: &LinkId) -> Result<DbRosterSession, ManagerServiceError> {
        let txn = self.db.begin().await.context("begin roster transaction")?;
        // SELECT ... FOR UPDATE serializes sessions on the same link
        let locked = links::Entity::find_by_id(link_id.0.clone())
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock link")?;
        if locked.is_none() {
            return Err(ManagerServiceError::NoRecordFound);
        }
        Ok(DbRosterSession {
            txn,
            link_id: link_id.clone(),
        })
    }

    async fn get_array_elem(
        &self,
        links_filter: &LinkFilter,
        managers_filter: &ManagerFilter,
    ) -> Result<Vec<LinkManagers>, ManagerServiceError> {
        let rows = corp_managers::Entity::find()
            .find_also_related(links::Entity)
            .filter(link_condition(links_filter))
            .filter(manager_condition(managers_filter))
            .order_by_asc(corp_managers::Column::LinkId)
            .order_by_asc(corp_managers::Column::Seq)
            .all(&self.db)
            .await
            .context("find corp managers across links")?;

        let mut grouped: Vec<LinkManagers> = Vec::new();
        for (manager, link) in rows {
            let link = link.ok_or_else(|| anyhow!("corp manager without link"))?;
            let entry = manager_from_model(manager)?;
            // rows are ordered by link, so each link's entries are contiguous
            if let Some(last) = grouped.last_mut().filter(|last| last.link.id.0 == link.id) {
                last.managers.push(entry);
                continue;
            }
            grouped.push(LinkManagers {
                link: link_from_model(link)?,
                managers: vec![entry],
            });
        }
        Ok(grouped)
    }
}

impl RosterSession for DbRosterSession {
    async fn get_array_elem(
        &mut self,
        filter: &ManagerFilter,
    ) -> Result<Vec<ManagerEntry>, ManagerServiceError> {
        let models = roster_query(&self.link_id, filter)
            .all(&self.txn)
            .await
            .context("list corp managers")?;
        models
            .into_iter()
            .map(|m| manager_from_model(m).map_err(Into::into))
            .collect()
    }

    async fn push_array_items(
        &mut self,
        items: &[ManagerEntry],
    ) -> Result<(), ManagerServiceError> {
        if items.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        let models = items.iter().map(|item| corp_managers::ActiveModel {
            link_id: Set(self.link_id.0.clone()),
            email: Set(item.email.clone()),
            role: Set(item.role.as_i16()),
            password_hash: Set(item.password_hash.clone()),
            initial_password_changed: Set(item.initial_password_changed),
            created_at: Set(now),
            ..Default::default()
        });
        corp_managers::Entity::insert_many(models)
            .exec(&self.txn)
            .await
            .context("push corp managers")?;
        Ok(())
    }

    async fn pull_array_items(
        &mut self,
        filter: &ManagerFilter,
    ) -> Result<u64, ManagerServiceError> {
        let result = corp_managers::Entity::delete_many()
            .filter(corp_managers::Column::LinkId.eq(self.link_id.0.clone()))
            .filter(manager_condition(filter))
            .exec(&self.txn)
            .await
            .context("pull corp managers")?;
        Ok(result.rows_affected)
    }

    async fn update_array_item(
        &mut self,
        filter: &ManagerFilter,
        patch: &ManagerPatch,
    ) -> Result<bool, ManagerServiceError> {
        let Some(model) = roster_query(&self.link_id, filter)
            .one(&self.txn)
            .await
            .context("find corp manager to update")?
        else {
            return Ok(false);
        };

        let mut am = corp_managers::ActiveModel {
            link_id: Set(model.link_id),
            email: Set(model.email),
            ..Default::default()
        };
        if let Some(hash) = &patch.password_hash {
            am.password_hash = Set(hash.clone());
        }
        if let Some(changed) = patch.initial_password_changed {
            am.initial_password_changed = Set(changed);
        }
        am.update(&self.txn)
            .await
            .context("update corp manager")?;
        Ok(true)
    }

    async fn mark_admin_added(&mut self) -> Result<(), ManagerServiceError> {
        links::Entity::update_many()
            .col_expr(links::Column::AdminAdded, Expr::value(true))
            .filter(links::Column::Id.eq(self.link_id.0.clone()))
            .exec(&self.txn)
            .await
            .context("mark admin added")?;
        Ok(())
    }

    async fn commit(self) -> Result<(), ManagerServiceError> {
        self.txn
            .commit()
            .await
            .context("commit roster transaction")?;
        Ok(())
    }
}

/// One link's entries matching `filter`. Rows pushed in one batch share
/// `created_at`, so order comes from the serial `seq` column.
fn roster_query(link_id: &LinkId, filter: &ManagerFilter) -> Select<corp_managers::Entity> {
    corp_managers::Entity::find()
        .filter(corp_managers::Column::LinkId.eq(link_id.0.clone()))
        .filter(manager_condition(filter))
        .order_by_asc(corp_managers::Column::Seq)
}

fn link_condition(filter: &LinkFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(id) = &filter.id {
        cond = cond.add(links::Column::Id.eq(id.0.clone()));
    }
    if let Some(enabled) = filter.enabled {
        cond = cond.add(links::Column::Enabled.eq(enabled));
    }
    if let Some(apply_to) = filter.apply_to {
        cond = cond.add(links::Column::ApplyTo.eq(apply_to.as_i16()));
    }
    cond
}

fn manager_condition(filter: &ManagerFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(email) = &filter.email {
        cond = cond.add(corp_managers::Column::Email.eq(email.clone()));
    }
    if let Some(emails) = &filter.emails {
        cond = cond.add(corp_managers::Column::Email.is_in(emails.iter().cloned()));
    }
    if let Some(role) = filter.role {
        cond = cond.add(corp_managers::Column::Role.eq(role.as_i16()));
    }
    if let Some(hash) = &filter.password_hash {
        cond = cond.add(corp_managers::Column::PasswordHash.eq(hash.clone()));
    }
    cond
}

fn manager_from_model(model: corp_managers::Model) -> anyhow::Result<ManagerEntry> {
    let role = ManagerRole::from_i16(model.role)
        .ok_or_else(|| anyhow!("unknown manager role {} for {}", model.role, model.email))?;
    Ok(ManagerEntry {
        role,
        email: model.email,
        password_hash: model.password_hash,
        initial_password_changed: model.initial_password_changed,
    })
}

fn link_from_model(model: links::Model) -> anyhow::Result<LinkRecord> {
    let apply_to = ApplyTo::from_i16(model.apply_to)
        .ok_or_else(|| anyhow!("unknown apply_to {} on link {}", model.apply_to, model.id))?;
    Ok(LinkRecord {
        id: LinkId(model.id),
        platform: model.platform,
        org_id: model.org_id,
        repo_id: model.repo_id,
        apply_to,
        enabled: model.enabled,
        admin_added: model.admin_added,
    })
}

// ── Verification code repository ─────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationCodeRepository {
    pub db: DatabaseConnection,
}

impl VerificationCodeRepository for DbVerificationCodeRepository {
    async fn upsert(&self, code: &VerificationCode) -> Result<(), ManagerServiceError> {
        let am = verification_codes::ActiveModel {
            recipient: Set(code.recipient.clone()),
            purpose: Set(code.purpose.0.clone()),
            code: Set(code.code.clone()),
            expires_at: Set(code.expires_at),
            created_at: Set(code.created_at),
        };
        verification_codes::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([
                    verification_codes::Column::Recipient,
                    verification_codes::Column::Purpose,
                ])
                .update_columns([
                    verification_codes::Column::Code,
                    verification_codes::Column::ExpiresAt,
                    verification_codes::Column::CreatedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .context("upsert verification code")?;
        Ok(())
    }

    async fn find(
        &self,
        recipient: &str,
        purpose: &Purpose,
    ) -> Result<Option<VerificationCode>, ManagerServiceError> {
        let key = (recipient.to_owned(), purpose.0.clone());
        let model = verification_codes::Entity::find_by_id(key)
            .one(&self.db)
            .await
            .context("find verification code")?;
        Ok(model.map(verification_code_from_model))
    }

    async fn take_matching(
        &self,
        recipient: &str,
        purpose: &Purpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ManagerServiceError> {
        let result = verification_codes::Entity::delete_many()
            .filter(verification_codes::Column::Recipient.eq(recipient))
            .filter(verification_codes::Column::Purpose.eq(purpose.as_str()))
            .filter(verification_codes::Column::Code.eq(code))
            .filter(verification_codes::Column::ExpiresAt.gte(now))
            .exec(&self.db)
            .await
            .context("consume verification code")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_expired(
        &self,
        recipient: &str,
        purpose: &Purpose,
        now: DateTime<Utc>,
    ) -> Result<bool, ManagerServiceError> {
        let result = verification_codes::Entity::delete_many()
            .filter(expired_code_condition(recipient, purpose, now))
            .exec(&self.db)
            .await
            .context("delete expired verification code")?;
        Ok(result.rows_affected > 0)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, ManagerServiceError> {
        let result = verification_codes::Entity::delete_many()
            .filter(verification_codes::Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .context("purge expired verification codes")?;
        Ok(result.rows_affected)
    }
}

fn expired_code_condition(recipient: &str, purpose: &Purpose, now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(verification_codes::Column::Recipient.eq(recipient))
        .add(verification_codes::Column::Purpose.eq(purpose.as_str()))
        .add(verification_codes::Column::ExpiresAt.lt(now))
}

fn verification_code_from_model(model: verification_codes::Model) -> VerificationCode {
    VerificationCode {
        recipient: model.recipient,
        purpose: Purpose(model.purpose),
        code: model.code,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}
