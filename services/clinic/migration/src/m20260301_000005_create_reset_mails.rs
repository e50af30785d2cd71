use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResetMails::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ResetMails::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ResetMails::DoctorId).uuid().not_null())
                    .col(ColumnDef::new(ResetMails::Recipient).string().not_null())
                    .col(ColumnDef::new(ResetMails::RecipientName).string().not_null())
                    .col(ColumnDef::new(ResetMails::ResetLink).text().not_null())
                    .col(
                        ColumnDef::new(ResetMails::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ResetMails::Table, ResetMails::DoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResetMails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ResetMails {
    Table,
    Id,
    DoctorId,
    Recipient,
    RecipientName,
    ResetLink,
    CreatedAt,
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
}
