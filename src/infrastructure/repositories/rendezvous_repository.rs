//! SeaORM implementation of RendezvousRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{DomainError, Quand, RendezvousFilter, RendezvousRepository};
use crate::models::rendezvous::{
    ActiveModel, Column, CreateRendezvous, Entity as RendezvousEntity, Model, UpdateRendezvous,
};
use crate::utils::patch::non_blank;

pub struct SeaOrmRendezvousRepository {
    db: DatabaseConnection,
}

impl SeaOrmRendezvousRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

const CHAMPS_REQUIS: &str = "Veuillez remplir tous les champs obligatoires";

fn encode_soins(soins: Vec<String>) -> Result<String, DomainError> {
    let soins: Vec<String> = soins
        .into_iter()
        .filter_map(|s| non_blank(Some(s)))
        .collect();
    if soins.is_empty() {
        return Err(DomainError::validation("Veuillez sélectionner au moins un soin"));
    }
    serde_json::to_string(&soins).map_err(|e| DomainError::Validation(e.to_string()))
}

#[async_trait]
impl RendezvousRepository for SeaOrmRendezvousRepository {
    async fn find_all(&self, filter: RendezvousFilter) -> Result<Vec<Model>, DomainError> {
        let query = match filter.quand {
            Quand::AVenir => RendezvousEntity::find().filter(Column::DateRdv.gte(filter.today)),
            Quand::Passes => RendezvousEntity::find().filter(Column::DateRdv.lt(filter.today)),
            Quand::Tous => RendezvousEntity::find(),
        };

        Ok(query
            .order_by_asc(Column::DateRdv)
            .order_by_asc(Column::Heure)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, DomainError> {
        Ok(RendezvousEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: CreateRendezvous) -> Result<Model, DomainError> {
        let nom_client =
            non_blank(input.nom_client).ok_or_else(|| DomainError::validation(CHAMPS_REQUIS))?;
        let numero_client =
            non_blank(input.numero_client).ok_or_else(|| DomainError::validation(CHAMPS_REQUIS))?;
        let date_rdv = input
            .date_rdv
            .ok_or_else(|| DomainError::validation(CHAMPS_REQUIS))?;
        let heure = input
            .heure
            .ok_or_else(|| DomainError::validation(CHAMPS_REQUIS))?;
        let soins = encode_soins(input.soins)?;

        let rendezvous = ActiveModel {
            id: Set(Uuid::new_v4()),
            nom_client: Set(nom_client),
            numero_client: Set(numero_client),
            soins: Set(soins),
            date_rdv: Set(date_rdv),
            heure: Set(heure),
            acompte: Set(input.acompte.unwrap_or(0.0)),
            nombre_personnes: Set(input.nombre_personnes.unwrap_or(1)),
            created_at: Set(chrono::Utc::now()),
        };

        Ok(rendezvous.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, input: UpdateRendezvous) -> Result<Model, DomainError> {
        let existing = RendezvousEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.clone().into();

        if let Some(nom_client) = input.nom_client {
            active.nom_client = Set(nom_client);
        }
        if let Some(numero_client) = input.numero_client {
            active.numero_client = Set(numero_client);
        }
        if let Some(soins) = input.soins {
            active.soins = Set(encode_soins(soins)?);
        }
        if let Some(date_rdv) = input.date_rdv {
            active.date_rdv = Set(date_rdv);
        }
        if let Some(heure) = input.heure {
            active.heure = Set(heure);
        }
        if let Some(acompte) = input.acompte {
            active.acompte = Set(acompte);
        }
        if let Some(nombre_personnes) = input.nombre_personnes {
            active.nombre_personnes = Set(nombre_personnes);
        }

        if !active.is_changed() {
            return Ok(existing);
        }
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = RendezvousEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
