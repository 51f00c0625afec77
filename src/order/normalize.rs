//! Turns stored order documents into orders that are safe to aggregate.

use crate::order::{LineItem, Order, RawLineItem, RawOrder};

/// Normalize a stored order.
///
/// Line items are repaired rather than rejected: a missing or non-positive
/// quantity counts as one, a missing, negative or non-finite price counts as
/// zero, and a missing name becomes empty.
pub fn normalize_order(raw: &RawOrder) -> Order {
    Order {
        id: raw.id.clone(),
        is_paid: raw.is_paid,
        order_status: raw.order_status,
        created_at: raw.created_at,
        line_items: raw.order_items.iter().map(normalize_line_item).collect(),
    }
}

fn normalize_line_item(raw: &RawLineItem) -> LineItem {
    let price = raw
        .price
        .filter(|price| price.is_finite() && *price >= 0.0)
        .unwrap_or(0.0);
    let quantity = raw.qty.filter(|qty| *qty > 0).unwrap_or(1);

    LineItem {
        name: raw.name.clone().unwrap_or_default(),
        category: raw.category.clone(),
        price,
        quantity,
    }
}

#[cfg(test)]
mod normalize_tests {
    use time::macros::datetime;

    use crate::order::{LineItem, OrderStatus, RawLineItem, RawOrder};

    use super::normalize_order;

    fn raw_order(items: Vec<RawLineItem>) -> RawOrder {
        RawOrder {
            id: "order-1".to_owned(),
            order_items: items,
            is_paid: true,
            order_status: OrderStatus::Delivering,
            phone: "050-0000000".to_owned(),
            address: "1 Test Street".to_owned(),
            user_id: "user-1".to_owned(),
            total_amount: 999.0,
            created_at: Some(datetime!(2025-03-14 12:00 UTC)),
            updated_at: None,
        }
    }

    #[test]
    fn copies_order_fields() {
        let order = normalize_order(&raw_order(vec![]));

        assert_eq!(order.id, "order-1");
        assert!(order.is_paid);
        assert_eq!(order.order_status, OrderStatus::Delivering);
        assert_eq!(order.created_at, Some(datetime!(2025-03-14 12:00 UTC)));
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn keeps_complete_line_item() {
        let order = normalize_order(&raw_order(vec![RawLineItem {
            name: Some("Lemonade".to_owned()),
            category: Some("Drinks".to_owned()),
            price: Some(10.0),
            qty: Some(2),
            ..Default::default()
        }]));

        assert_eq!(
            order.line_items,
            vec![LineItem {
                name: "Lemonade".to_owned(),
                category: Some("Drinks".to_owned()),
                price: 10.0,
                quantity: 2,
            }]
        );
    }

    #[test]
    fn missing_quantity_counts_as_one() {
        let order = normalize_order(&raw_order(vec![RawLineItem {
            price: Some(7.0),
            ..Default::default()
        }]));

        assert_eq!(order.line_items[0].quantity, 1);
        assert_eq!(order.total(), 7.0);
    }

    #[test]
    fn non_positive_quantity_counts_as_one() {
        let order = normalize_order(&raw_order(vec![
            RawLineItem {
                price: Some(3.0),
                qty: Some(0),
                ..Default::default()
            },
            RawLineItem {
                price: Some(4.0),
                qty: Some(-2),
                ..Default::default()
            },
        ]));

        assert_eq!(order.total(), 7.0);
    }

    #[test]
    fn bad_price_contributes_nothing_but_keeps_the_order() {
        let order = normalize_order(&raw_order(vec![
            RawLineItem {
                name: Some("Mystery".to_owned()),
                qty: Some(3),
                ..Default::default()
            },
            RawLineItem {
                price: Some(-5.0),
                ..Default::default()
            },
            RawLineItem {
                price: Some(f64::NAN),
                ..Default::default()
            },
            RawLineItem {
                price: Some(5.0),
                ..Default::default()
            },
        ]));

        assert_eq!(order.line_items.len(), 4);
        assert_eq!(order.total(), 5.0);
    }

    #[test]
    fn missing_name_and_category_use_defaults() {
        let order = normalize_order(&raw_order(vec![RawLineItem::default()]));

        assert_eq!(order.line_items[0].name, "");
        assert_eq!(order.line_items[0].category, None);
    }

    #[test]
    fn total_ignores_stored_total_amount() {
        let order = normalize_order(&raw_order(vec![RawLineItem {
            price: Some(10.0),
            qty: Some(2),
            ..Default::default()
        }]));

        assert_eq!(order.total(), 20.0);
    }
}
