use sea_orm::entity::prelude::*;

/// One organization's CLA binding to a platform/org/repo scope.
/// Only the fields the manager roster needs are mapped here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub platform: String,
    pub org_id: String,
    pub repo_id: Option<String>,
    /// `cla_domain::link::ApplyTo` as i16.
    pub apply_to: i16,
    pub enabled: bool,
    /// Set once the first admin manager of the corporation was added. Never reset.
    pub admin_added: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::corp_managers::Entity")]
    CorpManagers,
}

impl Related<super::corp_managers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CorpManagers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
