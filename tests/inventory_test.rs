use salon::db;
use salon::domain::DomainError;
use salon::infrastructure::AppState;
use salon::models::produit::CreateProduit;
use salon::models::vente::UpdateVente;
use salon::services::inventory_service;
use salon::services::reporting::Periode;
use salon::services::sale_service::{self, CheckoutLine, CheckoutRequest};
use uuid::Uuid;

async fn setup_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

async fn create_produit(state: &AppState, nom: &str, quantite: i32) -> Uuid {
    state
        .produit_repo
        .create(CreateProduit {
            nom: Some(nom.to_string()),
            prix: Some(2500.0),
            quantite: Some(quantite),
            seuil_alerte: Some(5),
            ..Default::default()
        })
        .await
        .expect("Failed to create produit")
        .id
}

async fn stock(state: &AppState, id: Uuid) -> i32 {
    state
        .produit_repo
        .find_by_id(id)
        .await
        .unwrap()
        .expect("produit exists")
        .quantite
}

fn walk_in(lignes: Vec<CheckoutLine>) -> CheckoutRequest {
    CheckoutRequest {
        client_nom: Some("Awa".to_string()),
        client_telephone: Some("0700000001".to_string()),
        lignes,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_sell_out_then_restore_on_transaction_delete() {
    let state = setup_state().await;
    let produit_id = create_produit(&state, "Crème", 2).await;

    let result = sale_service::checkout(
        &state,
        walk_in(vec![CheckoutLine {
            produit_id,
            quantite: 2,
        }]),
    )
    .await
    .unwrap();
    assert_eq!(result.ventes.len(), 1);
    assert_eq!(result.montant_total, 5000.0);
    assert_eq!(stock(&state, produit_id).await, 0);

    let err = sale_service::checkout(
        &state,
        walk_in(vec![CheckoutLine {
            produit_id,
            quantite: 1,
        }]),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::InsufficientStock { disponible: 0, .. }
    ));

    let transactions = sale_service::list_transactions(&state, Periode::Tous)
        .await
        .unwrap();
    assert_eq!(transactions.len(), 1);

    let deletion = sale_service::delete_transaction_by_id(&state, transactions[0].id)
        .await
        .unwrap();
    assert_eq!(deletion.ventes_supprimees, 1);
    assert_eq!(stock(&state, produit_id).await, 2);
}

#[tokio::test]
async fn test_oversized_line_rejects_whole_cart_before_writing() {
    let state = setup_state().await;
    let a = create_produit(&state, "Crème", 4).await;
    let b = create_produit(&state, "Huile", 1).await;

    let err = sale_service::checkout(
        &state,
        walk_in(vec![
            CheckoutLine {
                produit_id: a,
                quantite: 2,
            },
            CheckoutLine {
                produit_id: b,
                quantite: 2,
            },
        ]),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        DomainError::InsufficientStock {
            disponible: 1,
            demande: 2,
            ..
        }
    ));
    assert_eq!(stock(&state, a).await, 4);
    assert_eq!(stock(&state, b).await, 1);
    assert!(state.vente_repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_lines_are_merged_against_stock() {
    let state = setup_state().await;
    let a = create_produit(&state, "Crème", 3).await;

    let line = CheckoutLine {
        produit_id: a,
        quantite: 2,
    };
    let err = sale_service::checkout(&state, walk_in(vec![line.clone(), line]))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::InsufficientStock { demande: 4, .. }));
    assert_eq!(stock(&state, a).await, 3);
}

#[tokio::test]
async fn test_each_line_is_restocked_by_its_own_quantity() {
    let state = setup_state().await;
    let a = create_produit(&state, "Crème", 10).await;
    let b = create_produit(&state, "Huile", 10).await;
    let c = create_produit(&state, "Sérum", 10).await;

    let result = sale_service::checkout(
        &state,
        walk_in(vec![
            CheckoutLine {
                produit_id: a,
                quantite: 1,
            },
            CheckoutLine {
                produit_id: b,
                quantite: 3,
            },
            CheckoutLine {
                produit_id: c,
                quantite: 7,
            },
        ]),
    )
    .await
    .unwrap();
    assert_eq!(stock(&state, c).await, 3);

    let ids: Vec<Uuid> = result.ventes.iter().map(|v| v.id).collect();
    let deletion = sale_service::delete_transaction(&state, ids).await.unwrap();

    assert_eq!(deletion.ventes_supprimees, 3);
    assert_eq!(deletion.produits_restockes, 3);
    assert_eq!(stock(&state, a).await, 10);
    assert_eq!(stock(&state, b).await, 10);
    assert_eq!(stock(&state, c).await, 10);
}

#[tokio::test]
async fn test_restock_skips_deleted_products() {
    let state = setup_state().await;
    let a = create_produit(&state, "Crème", 5).await;
    let b = create_produit(&state, "Huile", 5).await;

    let result = sale_service::checkout(
        &state,
        walk_in(vec![
            CheckoutLine {
                produit_id: a,
                quantite: 1,
            },
            CheckoutLine {
                produit_id: b,
                quantite: 1,
            },
        ]),
    )
    .await
    .unwrap();
    state.produit_repo.delete(a).await.unwrap();

    let ids: Vec<Uuid> = result.ventes.iter().map(|v| v.id).collect();
    let deletion = sale_service::delete_transaction(&state, ids).await.unwrap();

    assert_eq!(deletion.ventes_supprimees, 2);
    assert_eq!(deletion.produits_restockes, 1);
    assert_eq!(stock(&state, b).await, 5);
}

#[tokio::test]
async fn test_overflowing_duplicate_lines_are_rejected() {
    let state = setup_state().await;
    let a = create_produit(&state, "Crème", 5).await;

    let err = sale_service::checkout(
        &state,
        walk_in(vec![
            CheckoutLine {
                produit_id: a,
                quantite: 1,
            },
            CheckoutLine {
                produit_id: a,
                quantite: i32::MAX,
            },
        ]),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(stock(&state, a).await, 5);
    assert!(state.vente_repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_vente_quantity_cannot_be_edited_below_one() {
    let state = setup_state().await;
    let a = create_produit(&state, "Crème", 5).await;

    let result = sale_service::checkout(
        &state,
        walk_in(vec![CheckoutLine {
            produit_id: a,
            quantite: 1,
        }]),
    )
    .await
    .unwrap();
    let vente_id = result.ventes[0].id;

    for quantite in [0, -10] {
        let err = state
            .vente_repo
            .update(
                vente_id,
                UpdateVente {
                    quantite: Some(quantite),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    sale_service::delete_transaction(&state, vec![vente_id])
        .await
        .unwrap();
    assert_eq!(stock(&state, a).await, 5);
}

#[tokio::test]
async fn test_stock_writes_reject_non_positive_quantities() {
    let state = setup_state().await;
    let a = create_produit(&state, "Crème", 5).await;
    let repo = state.produit_repo.as_ref();

    for n in [0, -6] {
        let err = inventory_service::restock(repo, a, n).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        let err = inventory_service::decrement_stock(repo, a, n)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
    assert_eq!(stock(&state, a).await, 5);
}

#[tokio::test]
async fn test_conditional_decrement_never_goes_negative() {
    let state = setup_state().await;
    let a = create_produit(&state, "Crème", 2).await;

    assert_eq!(state.produit_repo.decrement_stock(a, 3).await.unwrap(), 0);
    assert_eq!(stock(&state, a).await, 2);

    assert_eq!(state.produit_repo.decrement_stock(a, 2).await.unwrap(), 1);
    assert_eq!(state.produit_repo.decrement_stock(a, 1).await.unwrap(), 0);
    assert_eq!(stock(&state, a).await, 0);

    assert_eq!(
        state
            .produit_repo
            .decrement_stock(Uuid::new_v4(), 1)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_concurrent_checkouts_sell_the_last_unit_once() {
    let state = setup_state().await;
    let a = create_produit(&state, "Crème", 1).await;

    let first = sale_service::checkout(
        &state,
        walk_in(vec![CheckoutLine {
            produit_id: a,
            quantite: 1,
        }]),
    );
    let second = sale_service::checkout(
        &state,
        walk_in(vec![CheckoutLine {
            produit_id: a,
            quantite: 1,
        }]),
    );
    let (first, second) = tokio::join!(first, second);

    assert_eq!(
        [first.is_ok(), second.is_ok()]
            .iter()
            .filter(|ok| **ok)
            .count(),
        1
    );
    assert_eq!(stock(&state, a).await, 0);
    assert_eq!(state.vente_repo.find_all().await.unwrap().len(), 1);
}
