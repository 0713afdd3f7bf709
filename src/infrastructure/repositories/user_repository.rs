//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::{DomainError, UserRepository};
use crate::models::user::{ActiveModel, Column, Entity as UserEntity, Model};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Model>, DomainError> {
        Ok(UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn create(
        &self,
        email: String,
        password_hash: String,
        role: String,
    ) -> Result<Model, DomainError> {
        if self.find_by_email(&email).await?.is_some() {
            return Err(DomainError::validation("Cet email est déjà utilisé"));
        }

        let user = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(chrono::Utc::now()),
        };

        Ok(user.insert(&self.db).await?)
    }
}
