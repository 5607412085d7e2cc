use rustshop::models::OrderStatus;

const SEQUENCE: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Approved,
    OrderStatus::Packed,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

#[test]
fn can_transition_only_to_immediate_successor() {
    for (i, &from) in SEQUENCE.iter().enumerate() {
        for (j, &to) in SEQUENCE.iter().enumerate() {
            let legal = from.can_transition_to(to);
            if j == i + 1 {
                assert!(legal, "{from} -> {to} should be legal");
            } else {
                assert!(!legal, "{from} -> {to} should be illegal");
            }
        }
    }
}

#[test]
fn delivered_is_terminal() {
    assert_eq!(OrderStatus::Delivered.next(), None);
    for &to in &SEQUENCE {
        assert!(!OrderStatus::Delivered.can_transition_to(to));
    }
}

#[test]
fn no_self_transitions() {
    for &s in &SEQUENCE {
        assert!(!s.can_transition_to(s), "{s} -> {s} must be illegal");
    }
}

#[test]
fn next_walks_the_whole_sequence() {
    let mut current = OrderStatus::Pending;
    let mut walked = vec![current];

    while let Some(next) = current.next() {
        walked.push(next);
        current = next;
    }

    assert_eq!(walked, SEQUENCE);
}

#[test]
fn sequence_order_is_comparable() {
    for pair in SEQUENCE.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn status_serializes_lowercase() {
    let json = serde_json::to_string(&OrderStatus::Packed).unwrap();
    assert_eq!(json, r#""packed""#);

    let back: OrderStatus = serde_json::from_str(r#""shipped""#).unwrap();
    assert_eq!(back, OrderStatus::Shipped);
}

#[test]
fn unknown_status_value_is_rejected() {
    // anything outside the five-value enum is a data-integrity violation
    let res: Result<OrderStatus, _> = serde_json::from_str(r#""cancelled""#);
    assert!(res.is_err());
}
