use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(SusResponses::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(SusResponses::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(SusResponses::DoctorId).uuid().not_null());
        for question in SusResponses::QUESTIONS {
            table.col(ColumnDef::new(question).small_integer().not_null());
        }
        table
            .col(ColumnDef::new(SusResponses::SusScore).double().not_null())
            .col(
                ColumnDef::new(SusResponses::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(SusResponses::Table, SusResponses::DoctorId)
                    .to(Doctors::Table, Doctors::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );

        manager.create_table(table.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SusResponses::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum SusResponses {
    Table,
    Id,
    DoctorId,
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
    Q9,
    Q10,
    SusScore,
    CreatedAt,
}

impl SusResponses {
    const QUESTIONS: [Self; 10] = [
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Q4,
        Self::Q5,
        Self::Q6,
        Self::Q7,
        Self::Q8,
        Self::Q9,
        Self::Q10,
    ];
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
}
