use sea_orm::entity::prelude::*;

/// One submitted usability questionnaire. Append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sus_responses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub q1: i16,
    pub q2: i16,
    pub q3: i16,
    pub q4: i16,
    pub q5: i16,
    pub q6: i16,
    pub q7: i16,
    pub q8: i16,
    pub q9: i16,
    pub q10: i16,
    pub sus_score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
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
