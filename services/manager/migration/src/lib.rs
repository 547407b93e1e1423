pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_links;
mod m20240901_000002_create_corp_managers;
mod m20240901_000003_create_verification_codes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_links::Migration),
            Box::new(m20240901_000002_create_corp_managers::Migration),
            Box::new(m20240901_000003_create_verification_codes::Migration),
        ]
    }
}
