use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // A hosted Postgres Row Store owns its schema; only the embedded SQLite
    // store is provisioned here.
    if db.get_database_backend() == DbBackend::Sqlite {
        run_migrations(&db).await?;
    } else {
        tracing::info!("Skipping migrations for external Row Store");
    }

    Ok(db)
}

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS clients (
        id BLOB PRIMARY KEY NOT NULL,
        nom TEXT NOT NULL,
        prenom TEXT,
        date_naissance TEXT,
        telephone TEXT,
        adresse TEXT,
        email TEXT,
        allergies TEXT,
        antecedents TEXT,
        enceinte BOOLEAN NOT NULL DEFAULT 0,
        type_peau TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS produits (
        id BLOB PRIMARY KEY NOT NULL,
        nom TEXT NOT NULL,
        sku TEXT,
        description TEXT,
        prix REAL NOT NULL,
        quantite INTEGER NOT NULL DEFAULT 0,
        seuil_alerte INTEGER NOT NULL DEFAULT 5,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS services (
        id BLOB PRIMARY KEY NOT NULL,
        nom TEXT NOT NULL,
        prix REAL NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS soins (
        id BLOB PRIMARY KEY NOT NULL,
        client_id BLOB,
        service_name TEXT NOT NULL,
        prix REAL NOT NULL,
        praticien TEXT,
        notes TEXT,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS prestations (
        id BLOB PRIMARY KEY NOT NULL,
        client_id BLOB NOT NULL,
        total REAL NOT NULL,
        notes TEXT,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    // No foreign key to services: a deleted catalog entry leaves the line dangling
    r#"
    CREATE TABLE IF NOT EXISTS prestation_services (
        id BLOB PRIMARY KEY NOT NULL,
        prestation_id BLOB NOT NULL,
        service_id BLOB NOT NULL,
        prix REAL NOT NULL,
        quantite INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ventes (
        id BLOB PRIMARY KEY NOT NULL,
        "type" TEXT NOT NULL,
        produit_id BLOB,
        soin_id BLOB,
        client_id BLOB,
        client_nom TEXT,
        client_telephone TEXT,
        prestation_id BLOB,
        quantite INTEGER NOT NULL DEFAULT 1,
        montant REAL NOT NULL,
        remarque TEXT,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS rendezvous (
        id BLOB PRIMARY KEY NOT NULL,
        nom_client TEXT NOT NULL,
        numero_client TEXT NOT NULL,
        soins TEXT NOT NULL DEFAULT '[]',
        date_rdv TEXT NOT NULL,
        heure TEXT NOT NULL,
        acompte REAL NOT NULL DEFAULT 0,
        nombre_personnes INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BLOB PRIMARY KEY NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'staff',
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_ventes_date ON ventes (date)",
    "CREATE INDEX IF NOT EXISTS idx_prestations_date ON prestations (date)",
    "CREATE INDEX IF NOT EXISTS idx_prestation_services_prestation ON prestation_services (prestation_id)",
    "CREATE INDEX IF NOT EXISTS idx_soins_client ON soins (client_id)",
];

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    for sql in MIGRATIONS {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_string(),
        ))
        .await?;
    }

    tracing::debug!("Applied {} schema statements", MIGRATIONS.len());
    Ok(())
}
