use sea_orm::entity::prelude::*;

/// Doctor account. Root of data partitioning: every patient row points here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "doctors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    /// Single active password-reset token; cleared when consumed.
    #[sea_orm(unique)]
    pub reset_token: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::patients::Entity")]
    Patients,
    #[sea_orm(has_many = "super::sus_responses::Entity")]
    SusResponses,
    #[sea_orm(has_many = "super::reset_mails::Entity")]
    ResetMails,
}

impl Related<super::patients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Patients.def()
    }
}

impl Related<super::sus_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SusResponses.def()
    }
}

impl Related<super::reset_mails::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResetMails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
