//! SeaORM implementation of SoinRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{DomainError, SoinRepository};
use crate::models::client::Entity as ClientEntity;
use crate::models::soin::{
    ActiveModel, Column, CreateSoin, Entity as SoinEntity, Model, SoinWithClient, UpdateSoin,
};
use crate::utils::patch::non_blank;

pub struct SeaOrmSoinRepository {
    db: DatabaseConnection,
}

impl SeaOrmSoinRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SoinRepository for SeaOrmSoinRepository {
    async fn find_all(&self) -> Result<Vec<SoinWithClient>, DomainError> {
        let rows = SoinEntity::find()
            .find_also_related(ClientEntity)
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(soin, client)| SoinWithClient {
                soin,
                client: client.map(Into::into),
            })
            .collect())
    }

    async fn find_by_client(&self, client_id: Uuid) -> Result<Vec<Model>, DomainError> {
        Ok(SoinEntity::find()
            .filter(Column::ClientId.eq(client_id))
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, DomainError> {
        Ok(SoinEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: CreateSoin) -> Result<Model, DomainError> {
        let client_id = input
            .client_id
            .ok_or_else(|| DomainError::validation("Veuillez sélectionner un client"))?;
        let service_name = non_blank(input.service_name)
            .ok_or_else(|| DomainError::validation("service_name est requis"))?;

        let now = chrono::Utc::now();
        let soin = ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(Some(client_id)),
            service_name: Set(service_name),
            prix: Set(input.prix.unwrap_or(0.0)),
            praticien: Set(non_blank(input.praticien)),
            notes: Set(input.notes),
            date: Set(input.date.unwrap_or(now)),
            created_at: Set(now),
        };

        Ok(soin.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, input: UpdateSoin) -> Result<Model, DomainError> {
        let existing = SoinEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.clone().into();

        if let Some(client_id) = input.client_id {
            active.client_id = Set(client_id);
        }
        if let Some(service_name) = input.service_name {
            active.service_name = Set(service_name);
        }
        if let Some(prix) = input.prix {
            active.prix = Set(prix);
        }
        if let Some(praticien) = input.praticien {
            active.praticien = Set(praticien);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }

        if !active.is_changed() {
            return Ok(existing);
        }
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = SoinEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
