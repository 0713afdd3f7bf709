use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::client::ClientSummary;
use crate::utils::patch::double_option;

/// A standalone treatment record, independent of the service catalog
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "soins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub service_name: String,
    pub prix: f64,
    pub praticien: Option<String>,
    pub notes: Option<String>,
    pub date: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Client,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Soin joined with its client's identity (`None` once the client is gone)
#[derive(Debug, Clone, Serialize)]
pub struct SoinWithClient {
    #[serde(flatten)]
    pub soin: Model,
    pub client: Option<ClientSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSoin {
    pub client_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub prix: Option<f64>,
    pub praticien: Option<String>,
    pub notes: Option<String>,
    pub date: Option<DateTimeUtc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSoin {
    #[serde(default, deserialize_with = "double_option")]
    pub client_id: Option<Option<Uuid>>,
    pub service_name: Option<String>,
    pub prix: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub praticien: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    pub date: Option<DateTimeUtc>,
}
