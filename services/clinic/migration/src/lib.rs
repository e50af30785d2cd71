pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_doctors;
mod m20260301_000002_create_patients;
mod m20260301_000003_create_sus_responses;
mod m20260301_000004_create_contact_inquiries;
mod m20260301_000005_create_reset_mails;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_doctors::Migration),
            Box::new(m20260301_000002_create_patients::Migration),
            Box::new(m20260301_000003_create_sus_responses::Migration),
            Box::new(m20260301_000004_create_contact_inquiries::Migration),
            Box::new(m20260301_000005_create_reset_mails::Migration),
        ]
    }
}
