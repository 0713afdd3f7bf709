use chrono::{DateTime, Duration, Local, Utc};
use salon::db;
use salon::domain::DateRange;
use salon::infrastructure::AppState;
use salon::models::prestation::{CreatePrestation, LigneServiceInput};
use salon::models::vente::{CreateVente, VenteType};
use salon::services::reporting::{self, TRAILING_MONTHS};
use salon::services::reporting_service;
use uuid::Uuid;

async fn setup_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

async fn add_prestation(state: &AppState, date: DateTime<Utc>, prix: f64) {
    state
        .prestation_repo
        .create(CreatePrestation {
            client_id: Some(Uuid::new_v4()),
            date: Some(date),
            services: vec![LigneServiceInput {
                service_id: Uuid::new_v4(),
                prix,
                quantite: 1,
            }],
            ..Default::default()
        })
        .await
        .expect("Failed to create prestation");
}

async fn add_vente(state: &AppState, date: DateTime<Utc>, montant: f64) {
    state
        .vente_repo
        .create(CreateVente {
            r#type: Some(VenteType::Produit),
            produit_id: Some(Uuid::new_v4()),
            montant: Some(montant),
            date: Some(date),
            ..Default::default()
        })
        .await
        .expect("Failed to create vente");
}

#[tokio::test]
async fn test_monthly_sub_sums_equal_six_month_sum() {
    let state = setup_state().await;
    let months = reporting::trailing_months(Local::now().date_naive(), TRAILING_MONTHS);

    // Rows on both edges of every month, plus one just before the window
    for (i, month) in months.iter().enumerate() {
        let range = reporting::month_range(&Local, *month);
        let start = range.start.unwrap();
        let end = range.end.unwrap();
        let montant = 1000.0 * (i as f64 + 1.0);
        add_prestation(&state, start, montant).await;
        add_vente(&state, end - Duration::seconds(1), montant / 2.0).await;
    }
    let first = reporting::month_range(&Local, months[0]).start.unwrap();
    add_prestation(&state, first - Duration::seconds(1), 99999.0).await;

    let tendance = reporting_service::mensuel(&state).await.unwrap();
    assert_eq!(tendance.len(), 6);
    for (i, mois) in tendance.iter().enumerate() {
        let montant = 1000.0 * (i as f64 + 1.0);
        assert_eq!(mois.ca_services, montant);
        assert_eq!(mois.ca_produits, montant / 2.0);
    }

    let window = DateRange::between(
        first,
        reporting::month_range(&Local, months[5]).end.unwrap(),
    );
    let direct = reporting::ca_services(&state.prestation_repo.find_in_range(window).await.unwrap())
        + reporting::ca_produits(&state.vente_repo.find_in_range(window).await.unwrap());
    let sub_sums: f64 = tendance.iter().map(|m| m.ca_total).sum();

    assert_eq!(sub_sums, direct);
    assert_eq!(direct, 21000.0 + 10500.0);
}

#[tokio::test]
async fn test_row_on_month_boundary_counts_once() {
    let state = setup_state().await;
    let months = reporting::trailing_months(Local::now().date_naive(), TRAILING_MONTHS);
    let boundary = reporting::month_range(&Local, months[4]).end.unwrap();
    add_vente(&state, boundary, 500.0).await;

    let tendance = reporting_service::mensuel(&state).await.unwrap();
    assert_eq!(tendance[4].ca_produits, 0.0);
    assert_eq!(tendance[5].ca_produits, 500.0);
}

#[tokio::test]
async fn test_rapport_for_month() {
    let state = setup_state().await;
    let month = reporting::month_start(Local::now().date_naive());
    let start = reporting::month_range(&Local, month).start.unwrap();
    add_prestation(&state, start + Duration::hours(1), 15000.0).await;
    add_vente(&state, start + Duration::hours(2), 7500.0).await;
    add_vente(&state, start + Duration::hours(3), 2500.0).await;

    let raw = month.format("%Y-%m").to_string();
    let rapport = reporting_service::rapport(&state, &raw).await.unwrap();
    assert_eq!(rapport.month, month);
    assert_eq!(rapport.ca_services, 15000.0);
    assert_eq!(rapport.ca_produits, 10000.0);
    assert_eq!(rapport.ca_total, 25000.0);
    assert_eq!(rapport.nombre_ventes, 2);

    let rapports = reporting_service::rapports(&state).await.unwrap();
    assert_eq!(rapports.len(), 1);
    assert_eq!(rapports[0], rapport);
}

#[tokio::test]
async fn test_top_produits_ranked_by_revenue() {
    let state = setup_state().await;
    let now = Utc::now();
    add_vente(&state, now, 3000.0).await;
    add_vente(&state, now, 9000.0).await;

    let top = reporting_service::top_produits(&state, reporting::Periode::Tous)
        .await
        .unwrap();
    // Products were never created, so both rows fall under the placeholder
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].nom, "Produit supprimé");
    assert_eq!(top[0].chiffre_affaires, 12000.0);
    assert_eq!(top[0].quantite, 2);
}
