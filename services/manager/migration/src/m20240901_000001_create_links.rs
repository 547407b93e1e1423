use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Links::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Links::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Links::Platform).string().not_null())
                    .col(ColumnDef::new(Links::OrgId).string().not_null())
                    .col(ColumnDef::new(Links::RepoId).string())
                    .col(ColumnDef::new(Links::ApplyTo).small_integer().not_null())
                    .col(
                        ColumnDef::new(Links::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Links::AdminAdded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Links::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Links::Table)
                    .col(Links::Platform)
                    .col(Links::OrgId)
                    .col(Links::RepoId)
                    .name("idx_links_platform_org_repo")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Links::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Links {
    Table,
    Id,
    Platform,
    OrgId,
    RepoId,
    ApplyTo,
    Enabled,
    AdminAdded,
    CreatedAt,
}
