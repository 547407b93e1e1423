use sea_orm::entity::prelude::*;

/// A corporation manager on a link's roster. `(link_id, email)` is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "corp_managers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub link_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    /// `cla_domain::manager::ManagerRole` as i16.
    pub role: i16,
    pub password_hash: String,
    pub initial_password_changed: bool,
    /// Insertion order within the roster; assigned by the database.
    pub seq: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::links::Entity",
        from = "Column::LinkId",
        to = "super::links::Column::Id"
    )]
    Link,
}

impl Related<super::links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Link.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
