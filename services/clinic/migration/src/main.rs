use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(carechart_clinic_migration::Migrator).await;
}
