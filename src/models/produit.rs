use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::patch::double_option;

/// Display name for a sale whose product was deleted
pub const PRODUIT_SUPPRIME: &str = "Produit supprimé";

/// Default low-stock threshold applied when none is supplied
pub const DEFAULT_SEUIL_ALERTE: i32 = 5;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "produits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nom: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub prix: f64,
    /// Current stock. Only the sale path guards `quantite >= 0`.
    pub quantite: i32,
    pub seuil_alerte: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vente::Entity")]
    Ventes,
}

impl Related<super::vente::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ventes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn en_alerte(&self) -> bool {
        self.quantite <= self.seuil_alerte
    }

    pub fn en_rupture(&self) -> bool {
        self.quantite <= 0
    }
}

// DTO for API responses
#[derive(Debug, Clone, Serialize)]
pub struct ProduitDto {
    pub id: Uuid,
    pub nom: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub prix: f64,
    pub quantite: i32,
    pub seuil_alerte: i32,
    pub en_alerte: bool,
    pub created_at: DateTimeUtc,
}

impl From<Model> for ProduitDto {
    fn from(model: Model) -> Self {
        let en_alerte = model.en_alerte();
        Self {
            id: model.id,
            nom: model.nom,
            sku: model.sku,
            description: model.description,
            prix: model.prix,
            quantite: model.quantite,
            seuil_alerte: model.seuil_alerte,
            en_alerte,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProduit {
    pub nom: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub prix: Option<f64>,
    pub quantite: Option<i32>,
    pub seuil_alerte: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduit {
    pub nom: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub sku: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub prix: Option<f64>,
    pub quantite: Option<i32>,
    pub seuil_alerte: Option<i32>,
}
