use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::patch::double_option;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nom: String,
    pub prenom: Option<String>,
    pub date_naissance: Option<Date>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub email: Option<String>,
    /// Profil médical et peau, saisi librement
    pub allergies: Option<String>,
    pub antecedents: Option<String>,
    pub enceinte: bool,
    pub type_peau: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::soin::Entity")]
    Soins,
    #[sea_orm(has_many = "super::prestation::Entity")]
    Prestations,
    #[sea_orm(has_many = "super::vente::Entity")]
    Ventes,
}

impl Related<super::soin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Soins.def()
    }
}

impl Related<super::prestation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prestations.def()
    }
}

impl Related<super::vente::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ventes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Identity subset embedded in joined reads (soins, prestations, ventes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: Uuid,
    pub nom: String,
    pub prenom: Option<String>,
    pub telephone: Option<String>,
}

impl From<Model> for ClientSummary {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nom: model.nom,
            prenom: model.prenom,
            telephone: model.telephone,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateClient {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub date_naissance: Option<Date>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub email: Option<String>,
    pub allergies: Option<String>,
    pub antecedents: Option<String>,
    #[serde(default)]
    pub enceinte: bool,
    pub type_peau: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub nom: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub prenom: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_naissance: Option<Option<Date>>,
    #[serde(default, deserialize_with = "double_option")]
    pub telephone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub adresse: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub allergies: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub antecedents: Option<Option<String>>,
    pub enceinte: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub type_peau: Option<Option<String>>,
}
