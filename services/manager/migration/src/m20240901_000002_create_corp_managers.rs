use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CorpManagers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CorpManagers::LinkId).string().not_null())
                    .col(ColumnDef::new(CorpManagers::Email).string().not_null())
                    .col(ColumnDef::new(CorpManagers::Role).small_integer().not_null())
                    .col(
                        ColumnDef::new(CorpManagers::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CorpManagers::InitialPasswordChanged)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CorpManagers::Seq)
                            .big_integer()
                            .not_null()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(CorpManagers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CorpManagers::LinkId)
                            .col(CorpManagers::Email),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CorpManagers::Table, CorpManagers::LinkId)
                            .to(Links::Table, Links::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // credential checks scan across links by email
        manager
            .create_index(
                Index::create()
                    .table(CorpManagers::Table)
                    .col(CorpManagers::Email)
                    .name("idx_corp_managers_email")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CorpManagers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CorpManagers {
    Table,
    LinkId,
    Email,
    Role,
    PasswordHash,
    InitialPasswordChanged,
    Seq,
    CreatedAt,
}

#[derive(Iden)]
enum Links {
    Table,
    Id,
}
