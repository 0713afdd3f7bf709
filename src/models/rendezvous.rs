use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Appointment. Client and soins are free text, not references.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rendezvous")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nom_client: String,
    pub numero_client: String,
    pub soins: String, // JSON array of soin names
    pub date_rdv: Date,
    pub heure: Time,
    pub acompte: f64,
    pub nombre_personnes: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, Serialize)]
pub struct RendezvousDto {
    pub id: Uuid,
    pub nom_client: String,
    pub numero_client: String,
    pub soins: Vec<String>,
    pub date_rdv: Date,
    pub heure: Time,
    pub acompte: f64,
    pub nombre_personnes: i32,
    pub created_at: DateTimeUtc,
}

impl From<Model> for RendezvousDto {
    fn from(model: Model) -> Self {
        let soins = serde_json::from_str(&model.soins).unwrap_or_default();
        Self {
            id: model.id,
            nom_client: model.nom_client,
            numero_client: model.numero_client,
            soins,
            date_rdv: model.date_rdv,
            heure: model.heure,
            acompte: model.acompte,
            nombre_personnes: model.nombre_personnes,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRendezvous {
    pub nom_client: Option<String>,
    pub numero_client: Option<String>,
    #[serde(default)]
    pub soins: Vec<String>,
    pub date_rdv: Option<Date>,
    pub heure: Option<Time>,
    pub acompte: Option<f64>,
    pub nombre_personnes: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRendezvous {
    pub nom_client: Option<String>,
    pub numero_client: Option<String>,
    pub soins: Option<Vec<String>>,
    pub date_rdv: Option<Date>,
    pub heure: Option<Time>,
    pub acompte: Option<f64>,
    pub nombre_personnes: Option<i32>,
}
