//! SeaORM implementation of ServiceRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::domain::{DomainError, ServiceRepository};
use crate::models::service::{
    ActiveModel, Column, CreateService, Entity as ServiceEntity, Model, UpdateService,
};
use crate::utils::patch::non_blank;

/// SeaORM-based implementation of ServiceRepository
pub struct SeaOrmServiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        Ok(ServiceEntity::find()
            .order_by_asc(Column::Nom)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, DomainError> {
        Ok(ServiceEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: CreateService) -> Result<Model, DomainError> {
        let nom = non_blank(input.nom).ok_or_else(|| DomainError::validation("nom est requis"))?;
        let prix = input
            .prix
            .ok_or_else(|| DomainError::validation("prix est requis"))?;

        let service = ActiveModel {
            id: Set(Uuid::new_v4()),
            nom: Set(nom),
            prix: Set(prix),
            description: Set(input.description),
            created_at: Set(chrono::Utc::now()),
        };

        Ok(service.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, input: UpdateService) -> Result<Model, DomainError> {
        let existing = ServiceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.clone().into();

        if let Some(nom) = input.nom {
            active.nom = Set(nom);
        }
        if let Some(prix) = input.prix {
            active.prix = Set(prix);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }

        if !active.is_changed() {
            return Ok(existing);
        }
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = ServiceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
