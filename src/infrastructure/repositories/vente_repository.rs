//! SeaORM implementation of VenteRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{DateRange, DomainError, VenteRepository};
use crate::models::client::{self, ClientSummary, Entity as ClientEntity};
use crate::models::produit::Entity as ProduitEntity;
use crate::models::vente::{
    ActiveModel, Column, CreateVente, Entity as VenteEntity, Model, UpdateVente, VenteWithDetails,
};
use crate::utils::patch::non_blank;

pub struct SeaOrmVenteRepository {
    db: DatabaseConnection,
}

impl SeaOrmVenteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VenteRepository for SeaOrmVenteRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        Ok(VenteEntity::find()
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await?)
    }

    async fn find_all_with_details(&self) -> Result<Vec<VenteWithDetails>, DomainError> {
        let rows = VenteEntity::find()
            .find_also_related(ProduitEntity)
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await?;

        let mut client_ids: Vec<Uuid> = rows.iter().filter_map(|(v, _)| v.client_id).collect();
        client_ids.sort();
        client_ids.dedup();

        let clients: HashMap<Uuid, client::Model> = if client_ids.is_empty() {
            HashMap::new()
        } else {
            ClientEntity::find()
                .filter(client::Column::Id.is_in(client_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(vente, produit)| VenteWithDetails {
                client: vente
                    .client_id
                    .and_then(|id| clients.get(&id).cloned())
                    .map(ClientSummary::from),
                produit,
                vente,
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, DomainError> {
        Ok(VenteEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<Model>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(VenteEntity::find()
            .filter(Column::Id.is_in(ids))
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await?)
    }

    async fn find_in_range(&self, range: DateRange) -> Result<Vec<Model>, DomainError> {
        let mut query = VenteEntity::find();
        if let Some(start) = range.start {
            query = query.filter(Column::Date.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(Column::Date.lt(end));
        }
        Ok(query.order_by_desc(Column::Date).all(&self.db).await?)
    }

    async fn create(&self, input: CreateVente) -> Result<Model, DomainError> {
        let vente_type = input
            .r#type
            .ok_or_else(|| DomainError::validation("type est requis"))?;
        let montant = input
            .montant
            .ok_or_else(|| DomainError::validation("montant est requis"))?;
        let quantite = input.quantite.unwrap_or(1);
        if quantite <= 0 {
            return Err(DomainError::validation("La quantité doit être positive"));
        }

        let now = chrono::Utc::now();
        let vente = ActiveModel {
            id: Set(Uuid::new_v4()),
            r#type: Set(vente_type.to_string()),
            produit_id: Set(input.produit_id),
            soin_id: Set(input.soin_id),
            client_id: Set(input.client_id),
            client_nom: Set(non_blank(input.client_nom)),
            client_telephone: Set(non_blank(input.client_telephone)),
            prestation_id: Set(input.prestation_id),
            quantite: Set(quantite),
            montant: Set(montant),
            remarque: Set(non_blank(input.remarque)),
            date: Set(input.date.unwrap_or(now)),
            created_at: Set(now),
        };

        Ok(vente.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, input: UpdateVente) -> Result<Model, DomainError> {
        let existing = VenteEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.clone().into();

        if let Some(vente_type) = input.r#type {
            active.r#type = Set(vente_type.to_string());
        }
        if let Some(produit_id) = input.produit_id {
            active.produit_id = Set(produit_id);
        }
        if let Some(soin_id) = input.soin_id {
            active.soin_id = Set(soin_id);
        }
        if let Some(quantite) = input.quantite {
            if quantite <= 0 {
                return Err(DomainError::validation("La quantité doit être positive"));
            }
            active.quantite = Set(quantite);
        }
        if let Some(montant) = input.montant {
            active.montant = Set(montant);
        }
        if let Some(remarque) = input.remarque {
            active.remarque = Set(remarque);
        }

        if !active.is_changed() {
            return Ok(existing);
        }
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = VenteEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn delete_many(&self, ids: Vec<Uuid>) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = VenteEntity::delete_many()
            .filter(Column::Id.is_in(ids))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
