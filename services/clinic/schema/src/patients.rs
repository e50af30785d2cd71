use sea_orm::entity::prelude::*;

/// Patient record, owned by exactly one doctor.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "patients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub full_name: String,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub blood_type: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub gender: String,
    pub has_allergies: bool,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub has_heart_disease: bool,
    pub is_smoker: bool,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub admission_date: Option<chrono::NaiveDate>,
    pub last_visit_date: Option<chrono::NaiveDate>,
    #[sea_orm(column_type = "Text", nullable)]
    pub medical_history: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub current_medications: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub diagnosis: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub treatment_notes: Option<String>,
    /// Attachment storage key, if a report was uploaded.
    pub report_image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::doctors::Entity",
        from = "Column::DoctorId",
        to = "super::doctors::Column::Id",
        on_delete = "Cascade"
    )]
    Doctor,
}

impl Related<super::doctors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Doctor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
