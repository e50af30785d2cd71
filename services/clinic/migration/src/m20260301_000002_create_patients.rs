use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Patients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Patients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Patients::DoctorId).uuid().not_null())
                    .col(ColumnDef::new(Patients::FullName).string().not_null())
                    .col(ColumnDef::new(Patients::Age).integer())
                    .col(ColumnDef::new(Patients::WeightKg).double())
                    .col(ColumnDef::new(Patients::HeightCm).double())
                    .col(ColumnDef::new(Patients::BloodType).string())
                    .col(ColumnDef::new(Patients::Phone).string())
                    .col(ColumnDef::new(Patients::Email).string())
                    .col(ColumnDef::new(Patients::Address).string())
                    .col(ColumnDef::new(Patients::Gender).string().not_null())
                    .col(flag(Patients::HasAllergies))
                    .col(flag(Patients::HasDiabetes))
                    .col(flag(Patients::HasHypertension))
                    .col(flag(Patients::HasHeartDisease))
                    .col(flag(Patients::IsSmoker))
                    .col(ColumnDef::new(Patients::DateOfBirth).date())
                    .col(ColumnDef::new(Patients::AdmissionDate).date())
                    .col(ColumnDef::new(Patients::LastVisitDate).date())
                    .col(ColumnDef::new(Patients::MedicalHistory).text())
                    .col(ColumnDef::new(Patients::CurrentMedications).text())
                    .col(ColumnDef::new(Patients::Diagnosis).text())
                    .col(ColumnDef::new(Patients::TreatmentNotes).text())
                    .col(ColumnDef::new(Patients::ReportImage).string())
                    .col(
                        ColumnDef::new(Patients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Patients::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Patients::Table, Patients::DoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Dashboard query: WHERE doctor_id = $1 ORDER BY created_at DESC
        manager
            .create_index(
                Index::create()
                    .table(Patients::Table)
                    .col(Patients::DoctorId)
                    .col(Patients::CreatedAt)
                    .name("idx_patients_doctor_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Patients::Table).to_owned())
            .await
    }
}

fn flag(column: Patients) -> ColumnDef {
    ColumnDef::new(column)
        .boolean()
        .not_null()
        .default(false)
        .to_owned()
}

#[derive(Iden, Clone, Copy)]
enum Patients {
    Table,
    Id,
    DoctorId,
    FullName,
    Age,
    WeightKg,
    HeightCm,
    BloodType,
    Phone,
    Email,
    Address,
    Gender,
    HasAllergies,
    HasDiabetes,
    HasHypertension,
    HasHeartDisease,
    IsSmoker,
    DateOfBirth,
    AdmissionDate,
    LastVisitDate,
    MedicalHistory,
    CurrentMedications,
    Diagnosis,
    TreatmentNotes,
    ReportImage,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
}
