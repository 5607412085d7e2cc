use mongodb::bson::oid::ObjectId;
use rustshop::models::{Order, OrderStatus};
use rustshop::sync::{merge_order, OrderList};

fn make_order(status: OrderStatus) -> Order {
    Order {
        id: ObjectId::new(),
        user_id: Some(ObjectId::new()),
        items: Vec::new(),
        total_price: 42.0,
        status,
        created_at: 1_700_000_000,
        updated_at: 1_700_000_000,
    }
}

fn with_status(order: &Order, status: OrderStatus) -> Order {
    let mut o = order.clone();
    o.status = status;
    o.updated_at += 60;
    o
}

#[test]
fn merge_takes_newer_status() {
    let local = make_order(OrderStatus::Approved);
    let incoming = with_status(&local, OrderStatus::Packed);

    let merged = merge_order(&local, incoming);
    assert_eq!(merged.status, OrderStatus::Packed);
}

#[test]
fn merge_never_regresses() {
    let local = make_order(OrderStatus::Packed);
    let stale = with_status(&local, OrderStatus::Approved);

    let merged = merge_order(&local, stale);
    assert_eq!(merged.status, OrderStatus::Packed);
}

#[test]
fn merge_is_idempotent() {
    let local = make_order(OrderStatus::Shipped);
    let once = merge_order(&local, local.clone());
    let twice = merge_order(&once, local.clone());

    assert_eq!(once.status, twice.status);
    assert_eq!(once.updated_at, twice.updated_at);
}

#[test]
fn ack_and_broadcast_race_is_a_noop() {
    // the same transition arrives twice: once as the mutation ack, once as
    // the broadcast event; whichever lands first wins, the second changes nothing
    let mut list = OrderList::new();
    let pending = make_order(OrderStatus::Pending);
    list.replace_all(vec![pending.clone()]);

    let approved = with_status(&pending, OrderStatus::Approved);
    list.apply_update(approved.clone()); // ack
    list.apply_update(approved.clone()); // broadcast

    assert_eq!(list.len(), 1);
    assert_eq!(list.get(pending.id).unwrap().status, OrderStatus::Approved);
}

#[test]
fn out_of_order_broadcasts_keep_the_most_advanced_status() {
    let mut list = OrderList::new();
    let order = make_order(OrderStatus::Pending);
    list.replace_all(vec![order.clone()]);

    // shipped arrives before the (reordered) packed event
    list.apply_update(with_status(&order, OrderStatus::Shipped));
    list.apply_update(with_status(&order, OrderStatus::Packed));

    assert_eq!(list.get(order.id).unwrap().status, OrderStatus::Shipped);
}

#[test]
fn new_order_prepends_for_the_operator_view() {
    let mut list = OrderList::new();
    let first = make_order(OrderStatus::Pending);
    list.replace_all(vec![first.clone()]);

    let newest = make_order(OrderStatus::Pending);
    list.apply_new_order(newest.clone());

    let ids: Vec<_> = list.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![newest.id, first.id]);
}

#[test]
fn duplicate_new_order_event_does_not_duplicate_the_entry() {
    let mut list = OrderList::new();
    let order = make_order(OrderStatus::Pending);

    list.apply_new_order(order.clone());
    list.apply_new_order(order.clone());

    assert_eq!(list.len(), 1);
}

#[test]
fn new_order_for_known_id_degrades_to_merge() {
    let mut list = OrderList::new();
    let order = make_order(OrderStatus::Approved);
    list.replace_all(vec![order.clone()]);

    // stale duplicate still carrying the creation status
    list.apply_new_order(with_status(&order, OrderStatus::Pending));

    assert_eq!(list.len(), 1);
    assert_eq!(list.get(order.id).unwrap().status, OrderStatus::Approved);
}

#[test]
fn update_for_unknown_id_is_ignored() {
    let mut list = OrderList::new();
    list.replace_all(vec![make_order(OrderStatus::Pending)]);

    list.apply_update(make_order(OrderStatus::Approved));

    assert_eq!(list.len(), 1);
}

#[test]
fn snapshot_replaces_everything() {
    let mut list = OrderList::new();
    list.replace_all(vec![make_order(OrderStatus::Pending), make_order(OrderStatus::Packed)]);

    let fresh = make_order(OrderStatus::Delivered);
    list.replace_all(vec![fresh.clone()]);

    assert_eq!(list.len(), 1);
    assert_eq!(list.get(fresh.id).unwrap().status, OrderStatus::Delivered);
}

#[test]
fn snapshot_with_duplicate_ids_keeps_the_first() {
    let mut list = OrderList::new();
    let order = make_order(OrderStatus::Approved);

    list.replace_all(vec![order.clone(), with_status(&order, OrderStatus::Pending)]);

    assert_eq!(list.len(), 1);
    assert_eq!(list.get(order.id).unwrap().status, OrderStatus::Approved);
}
