//! SeaORM implementation of PrestationRepository
//!
//! Line items are owned by their prestation: edits replace the whole set and a
//! delete removes them. Reads batch-fetch lines, catalog names and clients for
//! the visible prestation set instead of querying per row.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{DateRange, DomainError, PrestationRepository};
use crate::models::client::{self, ClientSummary, Entity as ClientEntity};
use crate::models::prestation::{
    ActiveModel, Column, CreatePrestation, Entity as PrestationEntity,
    LigneServiceDetails, LigneServiceInput, Model, PrestationWithDetails, UpdatePrestation,
    resolve_total,
};
use crate::models::prestation_service::{self, Entity as LigneEntity, SERVICE_SUPPRIME};
use crate::models::service::{self, Entity as ServiceEntity};

pub struct SeaOrmPrestationRepository {
    db: DatabaseConnection,
}

impl SeaOrmPrestationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_details(
        &self,
        prestations: Vec<Model>,
    ) -> Result<Vec<PrestationWithDetails>, DomainError> {
        if prestations.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = prestations.iter().map(|p| p.id).collect();
        let mut client_ids: Vec<Uuid> = prestations.iter().map(|p| p.client_id).collect();
        client_ids.sort();
        client_ids.dedup();

        let lignes = LigneEntity::find()
            .filter(prestation_service::Column::PrestationId.is_in(ids))
            .order_by_asc(prestation_service::Column::CreatedAt)
            .find_also_related(ServiceEntity)
            .all(&self.db)
            .await?;

        let clients: HashMap<Uuid, client::Model> = ClientEntity::find()
            .filter(client::Column::Id.is_in(client_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut lignes_by_prestation: HashMap<Uuid, Vec<LigneServiceDetails>> = HashMap::new();
        for (ligne, service) in lignes {
            lignes_by_prestation
                .entry(ligne.prestation_id)
                .or_default()
                .push(ligne_details(ligne, service));
        }

        Ok(prestations
            .into_iter()
            .map(|prestation| PrestationWithDetails {
                client: clients
                    .get(&prestation.client_id)
                    .cloned()
                    .map(ClientSummary::from),
                services: lignes_by_prestation
                    .remove(&prestation.id)
                    .unwrap_or_default(),
                prestation,
            })
            .collect())
    }

    async fn load(&self, id: Uuid) -> Result<PrestationWithDetails, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn insert_lignes(
        &self,
        prestation_id: Uuid,
        lignes: &[LigneServiceInput],
    ) -> Result<(), DomainError> {
        let now = chrono::Utc::now();
        let rows = lignes.iter().map(|l| prestation_service::ActiveModel {
            id: Set(Uuid::new_v4()),
            prestation_id: Set(prestation_id),
            service_id: Set(l.service_id),
            prix: Set(l.prix),
            quantite: Set(l.quantite),
            created_at: Set(now),
        });

        LigneEntity::insert_many(rows)
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn delete_lignes(&self, prestation_id: Uuid) -> Result<(), DomainError> {
        LigneEntity::delete_many()
            .filter(prestation_service::Column::PrestationId.eq(prestation_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

fn ligne_details(
    ligne: prestation_service::Model,
    service: Option<service::Model>,
) -> LigneServiceDetails {
    LigneServiceDetails {
        id: ligne.id,
        service_id: ligne.service_id,
        service_nom: service
            .map(|s| s.nom)
            .unwrap_or_else(|| SERVICE_SUPPRIME.to_string()),
        prix: ligne.prix,
        quantite: ligne.quantite,
        sous_total: ligne.sous_total(),
    }
}

#[async_trait]
impl PrestationRepository for SeaOrmPrestationRepository {
    async fn find_all(&self) -> Result<Vec<PrestationWithDetails>, DomainError> {
        let prestations = PrestationEntity::find()
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await?;
        self.with_details(prestations).await
    }

    async fn find_by_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<PrestationWithDetails>, DomainError> {
        let prestations = PrestationEntity::find()
            .filter(Column::ClientId.eq(client_id))
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await?;
        self.with_details(prestations).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PrestationWithDetails>, DomainError> {
        let Some(prestation) = PrestationEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.with_details(vec![prestation]).await?.into_iter().next())
    }

    async fn find_in_range(&self, range: DateRange) -> Result<Vec<Model>, DomainError> {
        let mut query = PrestationEntity::find();
        if let Some(start) = range.start {
            query = query.filter(Column::Date.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(Column::Date.lt(end));
        }
        Ok(query.order_by_desc(Column::Date).all(&self.db).await?)
    }

    async fn find_all_lignes(
        &self,
    ) -> Result<Vec<(prestation_service::Model, Option<service::Model>)>, DomainError> {
        Ok(LigneEntity::find()
            .find_also_related(ServiceEntity)
            .all(&self.db)
            .await?)
    }

    async fn create(&self, input: CreatePrestation) -> Result<PrestationWithDetails, DomainError> {
        let client_id = input
            .client_id
            .ok_or_else(|| DomainError::validation("Veuillez sélectionner un client"))?;
        let total = resolve_total(&input.services, input.total)?;

        let now = chrono::Utc::now();
        let id = Uuid::new_v4();
        let prestation = ActiveModel {
            id: Set(id),
            client_id: Set(client_id),
            total: Set(total),
            notes: Set(input.notes),
            date: Set(input.date.unwrap_or(now)),
            created_at: Set(now),
        };
        prestation.insert(&self.db).await?;

        self.insert_lignes(id, &input.services).await?;
        tracing::debug!(prestation_id = %id, lignes = input.services.len(), "prestation created");

        self.load(id).await
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdatePrestation,
    ) -> Result<PrestationWithDetails, DomainError> {
        let existing = PrestationEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let total = match &input.services {
            Some(lignes) => Some(resolve_total(lignes, input.total)?),
            None => match input.total {
                Some(supplied) => {
                    let current = LigneEntity::find()
                        .filter(prestation_service::Column::PrestationId.eq(id))
                        .all(&self.db)
                        .await?
                        .into_iter()
                        .map(|l| LigneServiceInput {
                            service_id: l.service_id,
                            prix: l.prix,
                            quantite: l.quantite,
                        })
                        .collect::<Vec<_>>();
                    Some(resolve_total(&current, Some(supplied))?)
                }
                None => None,
            },
        };

        let mut active: ActiveModel = existing.into();
        if let Some(client_id) = input.client_id {
            active.client_id = Set(client_id);
        }
        if let Some(total) = total {
            active.total = Set(total);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if active.is_changed() {
            active.update(&self.db).await?;
        }

        if let Some(lignes) = &input.services {
            self.delete_lignes(id).await?;
            self.insert_lignes(id, lignes).await?;
        }

        self.load(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = PrestationEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        self.delete_lignes(id).await
    }
}
