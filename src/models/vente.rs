use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::patch::double_option;

/// One sold line. Several rows with the same client and near-identical
/// timestamps make up one checkout; there is no order entity.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ventes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub r#type: String,
    pub produit_id: Option<Uuid>,
    pub soin_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    // Walk-in customers are recorded by name and phone only
    pub client_nom: Option<String>,
    pub client_telephone: Option<String>,
    pub prestation_id: Option<Uuid>,
    pub quantite: i32,
    pub montant: f64,
    pub remarque: Option<String>,
    pub date: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::produit::Entity",
        from = "Column::ProduitId",
        to = "super::produit::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Produit,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Client,
}

impl Related<super::produit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produit.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Type discriminator stored in `ventes.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenteType {
    Produit,
    Soin,
    Service,
}

impl VenteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenteType::Produit => "produit",
            VenteType::Soin => "soin",
            VenteType::Service => "service",
        }
    }
}

impl fmt::Display for VenteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VenteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "produit" => Ok(VenteType::Produit),
            "soin" => Ok(VenteType::Soin),
            "service" => Ok(VenteType::Service),
            other => Err(format!("type de vente inconnu: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVente {
    pub r#type: Option<VenteType>,
    pub produit_id: Option<Uuid>,
    pub soin_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub client_nom: Option<String>,
    pub client_telephone: Option<String>,
    pub prestation_id: Option<Uuid>,
    pub quantite: Option<i32>,
    pub montant: Option<f64>,
    pub remarque: Option<String>,
    pub date: Option<DateTimeUtc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVente {
    pub r#type: Option<VenteType>,
    #[serde(default, deserialize_with = "double_option")]
    pub produit_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub soin_id: Option<Option<Uuid>>,
    pub quantite: Option<i32>,
    pub montant: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub remarque: Option<Option<String>>,
}

/// Vente joined with its product and client, as read by the sales views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenteWithDetails {
    #[serde(flatten)]
    pub vente: Model,
    pub produit: Option<super::produit::Model>,
    pub client: Option<super::client::ClientSummary>,
}
