use mongodb::Client;
use rustshop::models::OrderStatus;
use rustshop::services::order_service::{self, OrderError};
use rustshop::{config, events::OrderEvents, AppState};
use std::sync::Arc;

async fn test_state() -> AppState {
    let settings = config::load();

    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("mongodb client");
    let db = client.database(&settings.mongodb_db);

    AppState {
        db,
        settings,
        events: Arc::new(OrderEvents::new()),
    }
}

#[test]
fn skipping_a_state_is_an_illegal_transition() {
    let err = order_service::check_transition(OrderStatus::Pending, OrderStatus::Shipped)
        .unwrap_err();

    assert_eq!(
        err,
        OrderError::IllegalTransition {
            from: OrderStatus::Pending,
            requested: OrderStatus::Shipped,
        }
    );
}

#[test]
fn repeating_a_transition_is_an_illegal_transition() {
    // the order already advanced; resending the same target must fail
    let err = order_service::check_transition(OrderStatus::Approved, OrderStatus::Approved)
        .unwrap_err();

    assert_eq!(
        err,
        OrderError::IllegalTransition {
            from: OrderStatus::Approved,
            requested: OrderStatus::Approved,
        }
    );
}

#[test]
fn backward_moves_are_illegal_transitions() {
    let err = order_service::check_transition(OrderStatus::Packed, OrderStatus::Approved)
        .unwrap_err();

    assert_eq!(
        err,
        OrderError::IllegalTransition {
            from: OrderStatus::Packed,
            requested: OrderStatus::Approved,
        }
    );
}

#[test]
fn immediate_successor_passes_the_guard() {
    assert_eq!(
        order_service::check_transition(OrderStatus::Pending, OrderStatus::Approved),
        Ok(())
    );
    assert_eq!(
        order_service::check_transition(OrderStatus::Shipped, OrderStatus::Delivered),
        Ok(())
    );
}

#[test]
fn terminal_status_rejects_every_target() {
    for requested in [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ] {
        assert!(order_service::check_transition(OrderStatus::Delivered, requested).is_err());
    }
}

#[tokio::test]
async fn create_order_rejects_an_empty_item_list() {
    let state = test_state().await;

    // rejected before any store round-trip
    let err = order_service::create_order(&state, Vec::new(), None)
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::NoItems);
}
