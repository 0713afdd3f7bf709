//! SeaORM implementation of ProduitRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{DomainError, ProduitFilter, ProduitOrder, ProduitRepository, StockFilter};
use crate::models::produit::{
    ActiveModel, Column, CreateProduit, DEFAULT_SEUIL_ALERTE, Entity as ProduitEntity, Model,
    UpdateProduit,
};
use crate::utils::patch::non_blank;

/// SeaORM-based implementation of ProduitRepository
pub struct SeaOrmProduitRepository {
    db: DatabaseConnection,
}

impl SeaOrmProduitRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn validate_prix(prix: Option<f64>) -> Result<f64, DomainError> {
    match prix {
        None => Err(DomainError::validation("Le nom et le prix sont obligatoires")),
        Some(p) if p <= 0.0 => Err(DomainError::validation("Le prix doit être supérieur à 0")),
        Some(p) => Ok(p),
    }
}

fn matches_query(produit: &Model, query: &str) -> bool {
    let query = query.to_lowercase();
    produit.nom.to_lowercase().contains(&query)
        || produit
            .sku
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(&query))
        || produit
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&query))
}

#[async_trait]
impl ProduitRepository for SeaOrmProduitRepository {
    async fn find_all(&self, filter: ProduitFilter) -> Result<Vec<Model>, DomainError> {
        let mut query = ProduitEntity::find();

        query = match filter.stock {
            Some(StockFilter::Alerte) => {
                query.filter(Expr::col(Column::Quantite).lte(Expr::col(Column::SeuilAlerte)))
            }
            Some(StockFilter::Disponible) => {
                query.filter(Expr::col(Column::Quantite).gt(Expr::col(Column::SeuilAlerte)))
            }
            None => query,
        };

        query = match filter.order {
            ProduitOrder::Recent => query.order_by_desc(Column::CreatedAt),
            ProduitOrder::Nom => query.order_by_asc(Column::Nom),
        };

        let produits = query.all(&self.db).await?;

        // Text search stays in memory so it is case-insensitive on every backend
        Ok(match non_blank(filter.query) {
            Some(q) => produits.into_iter().filter(|p| matches_query(p, &q)).collect(),
            None => produits,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, DomainError> {
        Ok(ProduitEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: CreateProduit) -> Result<Model, DomainError> {
        let nom = non_blank(input.nom)
            .ok_or_else(|| DomainError::validation("Le nom et le prix sont obligatoires"))?;
        let prix = validate_prix(input.prix)?;

        let new_produit = ActiveModel {
            id: Set(Uuid::new_v4()),
            nom: Set(nom),
            sku: Set(non_blank(input.sku)),
            description: Set(input.description),
            prix: Set(prix),
            quantite: Set(input.quantite.unwrap_or(0)),
            seuil_alerte: Set(input.seuil_alerte.unwrap_or(DEFAULT_SEUIL_ALERTE)),
            created_at: Set(chrono::Utc::now()),
        };

        Ok(new_produit.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, input: UpdateProduit) -> Result<Model, DomainError> {
        let existing = ProduitEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.clone().into();

        if let Some(nom) = input.nom {
            let nom = non_blank(Some(nom))
                .ok_or_else(|| DomainError::validation("Le nom et le prix sont obligatoires"))?;
            active.nom = Set(nom);
        }
        if let Some(sku) = input.sku {
            active.sku = Set(sku);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(prix) = input.prix {
            active.prix = Set(validate_prix(Some(prix))?);
        }
        // A plain update writes the given stock verbatim
        if let Some(quantite) = input.quantite {
            active.quantite = Set(quantite);
        }
        if let Some(seuil) = input.seuil_alerte {
            active.seuil_alerte = Set(seuil);
        }

        if !active.is_changed() {
            return Ok(existing);
        }
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = ProduitEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn decrement_stock(&self, id: Uuid, n: i32) -> Result<u64, DomainError> {
        let result = ProduitEntity::update_many()
            .col_expr(Column::Quantite, Expr::col(Column::Quantite).sub(n))
            .filter(Column::Id.eq(id))
            .filter(Column::Quantite.gte(n))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn restock(&self, id: Uuid, n: i32) -> Result<u64, DomainError> {
        let result = ProduitEntity::update_many()
            .col_expr(Column::Quantite, Expr::col(Column::Quantite).add(n))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
