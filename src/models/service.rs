use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::patch::double_option;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nom: String,
    pub prix: f64,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::prestation_service::Entity")]
    PrestationServices,
}

impl Related<super::prestation_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrestationServices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateService {
    pub nom: Option<String>,
    pub prix: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateService {
    pub nom: Option<String>,
    pub prix: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}
