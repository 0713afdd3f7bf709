//! SeaORM implementation of ClientRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{ClientRepository, DomainError};
use crate::models::client::{ActiveModel, Column, CreateClient, Entity as ClientEntity, Model, UpdateClient};
use crate::utils::patch::non_blank;

/// SeaORM-based implementation of ClientRepository
pub struct SeaOrmClientRepository {
    db: DatabaseConnection,
}

impl SeaOrmClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        let clients = ClientEntity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(clients)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, DomainError> {
        Ok(ClientEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<Model>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(ClientEntity::find()
            .filter(Column::Id.is_in(ids))
            .all(&self.db)
            .await?)
    }

    async fn create(&self, input: CreateClient) -> Result<Model, DomainError> {
        let nom = non_blank(input.nom).ok_or_else(|| DomainError::validation("nom est requis"))?;

        let new_client = ActiveModel {
            id: Set(Uuid::new_v4()),
            nom: Set(nom),
            prenom: Set(input.prenom),
            date_naissance: Set(input.date_naissance),
            telephone: Set(input.telephone),
            adresse: Set(input.adresse),
            email: Set(input.email),
            allergies: Set(input.allergies),
            antecedents: Set(input.antecedents),
            enceinte: Set(input.enceinte),
            type_peau: Set(input.type_peau),
            created_at: Set(chrono::Utc::now()),
        };

        Ok(new_client.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, input: UpdateClient) -> Result<Model, DomainError> {
        let existing = ClientEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.clone().into();

        if let Some(nom) = input.nom {
            let nom = non_blank(Some(nom)).ok_or_else(|| DomainError::validation("nom est requis"))?;
            active.nom = Set(nom);
        }
        if let Some(prenom) = input.prenom {
            active.prenom = Set(prenom);
        }
        if let Some(date) = input.date_naissance {
            active.date_naissance = Set(date);
        }
        if let Some(telephone) = input.telephone {
            active.telephone = Set(telephone);
        }
        if let Some(adresse) = input.adresse {
            active.adresse = Set(adresse);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(allergies) = input.allergies {
            active.allergies = Set(allergies);
        }
        if let Some(antecedents) = input.antecedents {
            active.antecedents = Set(antecedents);
        }
        if let Some(enceinte) = input.enceinte {
            active.enceinte = Set(enceinte);
        }
        if let Some(type_peau) = input.type_peau {
            active.type_peau = Set(type_peau);
        }

        if !active.is_changed() {
            return Ok(existing);
        }
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = ClientEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
