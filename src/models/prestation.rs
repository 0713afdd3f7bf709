use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::client::ClientSummary;
use crate::utils::patch::double_option;

/// A salon visit billed as one total
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prestations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    /// Stored total; kept equal to the sum of the line items on every write
    pub total: f64,
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
    #[sea_orm(has_many = "super::prestation_service::Entity")]
    Lignes,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::prestation_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lignes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Line item as displayed: the catalog name is resolved at read time
#[derive(Debug, Clone, Serialize)]
pub struct LigneServiceDetails {
    pub id: Uuid,
    pub service_id: Uuid,
    /// "Service supprimé" when the catalog row no longer exists
    pub service_nom: String,
    pub prix: f64,
    pub quantite: i32,
    pub sous_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrestationWithDetails {
    #[serde(flatten)]
    pub prestation: Model,
    pub client: Option<ClientSummary>,
    pub services: Vec<LigneServiceDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LigneServiceInput {
    pub service_id: Uuid,
    pub prix: f64,
    #[serde(default = "default_quantite")]
    pub quantite: i32,
}

fn default_quantite() -> i32 {
    1
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePrestation {
    pub client_id: Option<Uuid>,
    /// Optional; when supplied it must match the line items
    pub total: Option<f64>,
    pub notes: Option<String>,
    pub date: Option<DateTimeUtc>,
    #[serde(default)]
    pub services: Vec<LigneServiceInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePrestation {
    pub client_id: Option<Uuid>,
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    pub date: Option<DateTimeUtc>,
    /// Replaces every existing line when present
    pub services: Option<Vec<LigneServiceInput>>,
}

/// Largest accepted gap between a supplied total and the sum of its lines
pub const TOTAL_TOLERANCE: f64 = 0.005;

/// Sum of `prix * quantite` over the line items
pub fn lignes_total(lignes: &[LigneServiceInput]) -> f64 {
    lignes.iter().map(|l| l.prix * f64::from(l.quantite)).sum()
}

/// Computes the stored total and rejects a supplied total that disagrees
pub fn resolve_total(
    lignes: &[LigneServiceInput],
    supplied: Option<f64>,
) -> Result<f64, crate::domain::DomainError> {
    if lignes.is_empty() {
        return Err(crate::domain::DomainError::validation(
            "Ajoutez au moins un service",
        ));
    }
    if let Some(ligne) = lignes.iter().find(|l| l.quantite <= 0 || l.prix < 0.0) {
        return Err(crate::domain::DomainError::Validation(format!(
            "Ligne invalide pour le service {}",
            ligne.service_id
        )));
    }

    let computed = lignes_total(lignes);
    match supplied {
        Some(total) if (total - computed).abs() > TOTAL_TOLERANCE => {
            Err(crate::domain::DomainError::Validation(format!(
                "Le total {} ne correspond pas à la somme des services {}",
                total, computed
            )))
        }
        _ => Ok(computed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ligne(prix: f64, quantite: i32) -> LigneServiceInput {
        LigneServiceInput {
            service_id: Uuid::new_v4(),
            prix,
            quantite,
        }
    }

    #[test]
    fn test_total_is_computed_from_lines() {
        let lignes = vec![ligne(5000.0, 2), ligne(3500.0, 1)];
        assert_eq!(resolve_total(&lignes, None).unwrap(), 13500.0);
        assert_eq!(resolve_total(&lignes, Some(13500.0)).unwrap(), 13500.0);
    }

    #[test]
    fn test_mismatched_total_is_rejected() {
        let lignes = vec![ligne(5000.0, 2)];
        assert!(resolve_total(&lignes, Some(9000.0)).is_err());
    }

    #[test]
    fn test_empty_or_invalid_lines_are_rejected() {
        assert!(resolve_total(&[], None).is_err());
        assert!(resolve_total(&[ligne(1000.0, 0)], None).is_err());
    }
}
