//! Demo data inserted at startup when `SEED_DEMO` is set

use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use uuid::Uuid;

use super::auth::hash_password;
use crate::models::{client, produit, service, user};

const DEMO_SERVICES: &[(&str, f64)] = &[
    ("Soin visage hydratant", 15000.0),
    ("Massage relaxant", 20000.0),
    ("Manucure", 5000.0),
    ("Pédicure", 6000.0),
    ("Épilation jambes", 8000.0),
];

// (nom, sku, prix, quantite)
const DEMO_PRODUITS: &[(&str, &str, f64, i32)] = &[
    ("Crème hydratante", "CR-HYD-01", 7500.0, 12),
    ("Huile de massage", "HU-MAS-01", 6000.0, 4),
    ("Sérum éclat", "SE-ECL-01", 12000.0, 0),
];

const DEMO_CLIENTS: &[(&str, &str, &str)] = &[
    ("Kouassi", "Awa", "0700000001"),
    ("Traoré", "Mariam", "0700000002"),
];

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now();

    // 1. Admin account
    let admin_password = hash_password("admin").map_err(DbErr::Custom)?;
    let admin = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set("admin@salon.local".to_owned()),
        password_hash: Set(admin_password),
        role: Set("admin".to_owned()),
        created_at: Set(now),
    };
    user::Entity::insert(admin)
        .on_conflict(OnConflict::column(user::Column::Email).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;

    // 2. Catalog, stock and clients, only into empty tables
    if service::Entity::find().count(db).await? == 0 {
        for (nom, prix) in DEMO_SERVICES {
            service::ActiveModel {
                id: Set(Uuid::new_v4()),
                nom: Set((*nom).to_owned()),
                prix: Set(*prix),
                description: Set(None),
                created_at: Set(now),
            }
            .insert(db)
            .await?;
        }
    }

    if produit::Entity::find().count(db).await? == 0 {
        for (nom, sku, prix, quantite) in DEMO_PRODUITS {
            produit::ActiveModel {
                id: Set(Uuid::new_v4()),
                nom: Set((*nom).to_owned()),
                sku: Set(Some((*sku).to_owned())),
                description: Set(None),
                prix: Set(*prix),
                quantite: Set(*quantite),
                seuil_alerte: Set(produit::DEFAULT_SEUIL_ALERTE),
                created_at: Set(now),
            }
            .insert(db)
            .await?;
        }
    }

    if client::Entity::find().count(db).await? == 0 {
        for (nom, prenom, telephone) in DEMO_CLIENTS {
            client::ActiveModel {
                id: Set(Uuid::new_v4()),
                nom: Set((*nom).to_owned()),
                prenom: Set(Some((*prenom).to_owned())),
                date_naissance: Set(None),
                telephone: Set(Some((*telephone).to_owned())),
                adresse: Set(None),
                email: Set(None),
                allergies: Set(None),
                antecedents: Set(None),
                enceinte: Set(false),
                type_peau: Set(None),
                created_at: Set(now),
            }
            .insert(db)
            .await?;
        }
    }

    tracing::info!("Demo data seeded");
    Ok(())
}
