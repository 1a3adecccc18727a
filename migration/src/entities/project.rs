//! Project entity: the tenant that visit records are scoped to

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub domain: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ai_visit::Entity")]
    AiVisit,
}

impl Related<super::ai_visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiVisit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
