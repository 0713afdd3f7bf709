use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Display name for a line whose catalog entry was deleted
pub const SERVICE_SUPPRIME: &str = "Service supprimé";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prestation_services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub prestation_id: Uuid,
    pub service_id: Uuid,
    /// Unit price snapshot taken when the visit was billed
    pub prix: f64,
    pub quantite: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::prestation::Entity",
        from = "Column::PrestationId",
        to = "super::prestation::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Prestation,
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Service,
}

impl Related<super::prestation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prestation.def()
    }
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn sous_total(&self) -> f64 {
        self.prix * f64::from(self.quantite)
    }
}
