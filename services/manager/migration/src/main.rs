use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(cla_manager_migration::Migrator).await;
}
