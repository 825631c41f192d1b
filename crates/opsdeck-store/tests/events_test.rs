//! Data-change broadcast behavior of the entity store.

use opsdeck_store::{CustomerPatch, EntityStore, NewCustomer, NewProduct};
use tokio::sync::broadcast;

fn new_customer(name: &str, email: &str) -> NewCustomer {
    NewCustomer {
        name: name.to_string(),
        email: email.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn mutations_broadcast_typed_events_with_full_record() {
    let (tx, mut rx) = broadcast::channel(64);
    let store = EntityStore::new(tx);

    let created = store
        .add_customer(new_customer("Acme Corporation", "contact@acme.com"))
        .expect("create should succeed");

    let event = rx.recv().await.expect("added event expected");
    assert_eq!(event.event_type, "customer_added");
    assert_eq!(event.data["id"], created.id.as_str());
    assert_eq!(event.data["name"], "Acme Corporation");
    assert!(event.data["phone"].is_null(), "absent fields broadcast as null");

    store
        .update_customer(
            &created.id,
            CustomerPatch {
                notes: Some("VIP".to_string()),
                ..Default::default()
            },
        )
        .expect("update should succeed");
    let event = rx.recv().await.expect("updated event expected");
    assert_eq!(event.event_type, "customer_updated");
    assert_eq!(event.data["notes"], "VIP");

    store.delete_customer(&created.id).expect("delete should succeed");
    let event = rx.recv().await.expect("deleted event expected");
    assert_eq!(event.event_type, "customer_deleted");
    assert_eq!(event.data["id"], created.id.as_str());
}

#[tokio::test]
async fn failed_create_broadcasts_nothing() {
    let (tx, mut rx) = broadcast::channel(64);
    let store = EntityStore::new(tx);

    store
        .add_product(NewProduct {
            name: "Widget".to_string(),
            // sku withheld
            price: Some(9.99),
            ..Default::default()
        })
        .expect_err("missing sku must fail");

    assert!(
        matches!(rx.try_recv(), Err(broadcast::error::TryRecvError::Empty)),
        "no event may be broadcast for a rejected create"
    );
}

#[tokio::test]
async fn mutations_succeed_without_subscribers() {
    let (tx, rx) = broadcast::channel(64);
    drop(rx);
    let store = EntityStore::new(tx);

    store
        .add_customer(new_customer("Lonely Corp", "solo@lonely.com"))
        .expect("create must succeed with no subscribers");
}
