//! Order aggregation for the dashboard.
//!
//! Reduces normalized orders to the dashboard's metrics: total revenue, the
//! number of sales, a twelve month revenue series and revenue grouped by
//! payment status, order status or category. Every function is a pure fold
//! over its input, so the result does not depend on the order of `orders`.

use std::{collections::HashMap, hash::Hash};

use clap::ValueEnum;
use serde::Serialize;
use time::{Month, UtcOffset};

use crate::order::{LineItem, Order, OrderStatus, PaymentStatus};

/// The label used for line items that were sold without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Which orders count towards revenue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RevenuePolicy {
    /// Count every order, paid or not.
    #[default]
    AllOrders,
    /// Count only orders that have been paid for.
    PaidOnly,
}

impl RevenuePolicy {
    /// Whether `order` contributes to revenue under this policy.
    pub fn includes(self, order: &Order) -> bool {
        match self {
            RevenuePolicy::AllOrders => true,
            RevenuePolicy::PaidOnly => order.is_paid,
        }
    }
}

/// The revenue for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// Three letter month name, e.g. "Mar".
    pub label: &'static str,
    pub total: f64,
}

/// Sums the line item totals of every order included by `policy`.
///
/// # Returns
/// 0.0 for an empty slice.
pub fn total_revenue(orders: &[Order], policy: RevenuePolicy) -> f64 {
    orders
        .iter()
        .filter(|order| policy.includes(order))
        .map(Order::total)
        .sum()
}

/// Counts the orders that have been paid for.
pub fn total_sales(orders: &[Order]) -> usize {
    orders.iter().filter(|order| order.is_paid).count()
}

/// Formats a month as a three-letter abbreviation.
pub fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Buckets revenue into the twelve months of `year`.
///
/// Each order's whole total goes to the month it was created in, as seen
/// from `local_offset`. Orders without a creation time or from other years
/// are skipped.
///
/// # Returns
/// Exactly twelve entries, January first, including months with no revenue.
pub fn monthly_revenue(
    orders: &[Order],
    policy: RevenuePolicy,
    year: i32,
    local_offset: UtcOffset,
) -> Vec<MonthlyRevenue> {
    let mut totals = [0.0; 12];

    for order in orders.iter().filter(|order| policy.includes(order)) {
        let Some(created_at) = order.created_at else {
            continue;
        };

        let local_date = created_at.to_offset(local_offset).date();

        if local_date.year() != year {
            continue;
        }

        totals[local_date.month() as usize - 1] += order.total();
    }

    let mut month = Month::January;

    totals
        .into_iter()
        .map(|total| {
            let entry = MonthlyRevenue {
                label: month_label(month),
                total,
            };
            month = month.next();
            entry
        })
        .collect()
}

/// Sums line item revenue per key.
///
/// `key_fn` picks the group of each line item and receives the order the
/// line item belongs to. Keys that never occur are absent from the result.
pub fn revenue_by<'a, K, F>(
    orders: impl IntoIterator<Item = &'a Order>,
    key_fn: F,
) -> HashMap<K, f64>
where
    K: Eq + Hash,
    F: Fn(&Order, &LineItem) -> K,
{
    let mut totals = HashMap::new();

    for order in orders {
        for line_item in &order.line_items {
            *totals.entry(key_fn(order, line_item)).or_insert(0.0) += line_item.subtotal();
        }
    }

    totals
}

/// Revenue of paid and unpaid orders.
///
/// Every order is counted regardless of the revenue policy, since this
/// rollup exists to compare the two.
pub fn revenue_by_payment_status(orders: &[Order]) -> HashMap<PaymentStatus, f64> {
    revenue_by(orders, |order, _| order.payment_status())
}

/// Revenue per order status of the orders included by `policy`.
pub fn revenue_by_order_status(
    orders: &[Order],
    policy: RevenuePolicy,
) -> HashMap<OrderStatus, f64> {
    revenue_by(
        orders.iter().filter(|order| policy.includes(order)),
        |order, _| order.order_status,
    )
}

/// Revenue per line item category of the orders included by `policy`.
///
/// Line items without a category are grouped under [UNCATEGORIZED_LABEL].
pub fn revenue_by_category(orders: &[Order], policy: RevenuePolicy) -> HashMap<String, f64> {
    revenue_by(
        orders.iter().filter(|order| policy.includes(order)),
        |_, line_item| {
            line_item
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_owned())
        },
    )
}

#[cfg(test)]
mod aggregation_tests {
    use time::{OffsetDateTime, UtcOffset, macros::datetime};

    use crate::order::{LineItem, Order, OrderStatus, PaymentStatus};

    use super::{
        RevenuePolicy, UNCATEGORIZED_LABEL, monthly_revenue, revenue_by_category,
        revenue_by_order_status, revenue_by_payment_status, total_revenue, total_sales,
    };

    fn item(category: Option<&str>, price: f64, quantity: i64) -> LineItem {
        LineItem {
            name: "Item".to_owned(),
            category: category.map(str::to_owned),
            price,
            quantity,
        }
    }

    fn order(
        id: &str,
        is_paid: bool,
        created_at: Option<OffsetDateTime>,
        line_items: Vec<LineItem>,
    ) -> Order {
        Order {
            id: id.to_owned(),
            is_paid,
            order_status: OrderStatus::Processing,
            created_at,
            line_items,
        }
    }

    fn sample_orders() -> Vec<Order> {
        vec![
            order(
                "a",
                true,
                Some(datetime!(2025-03-02 10:00 UTC)),
                vec![item(Some("Drinks"), 10.0, 2), item(Some("Food"), 5.0, 1)],
            ),
            order(
                "b",
                false,
                Some(datetime!(2025-07-20 18:30 UTC)),
                vec![item(Some("Food"), 12.5, 4)],
            ),
            order("c", true, None, vec![item(None, 7.0, 1)]),
        ]
    }

    #[test]
    fn total_revenue_sums_every_line_item() {
        assert_eq!(
            total_revenue(&sample_orders(), RevenuePolicy::AllOrders),
            20.0 + 5.0 + 50.0 + 7.0
        );
    }

    #[test]
    fn total_revenue_ignores_order_of_input() {
        let orders = sample_orders();
        let mut reversed = orders.clone();
        reversed.reverse();

        assert_eq!(
            total_revenue(&orders, RevenuePolicy::AllOrders),
            total_revenue(&reversed, RevenuePolicy::AllOrders)
        );
        assert_eq!(
            revenue_by_category(&orders, RevenuePolicy::AllOrders),
            revenue_by_category(&reversed, RevenuePolicy::AllOrders)
        );
    }

    #[test]
    fn paid_only_policy_skips_unpaid_orders() {
        assert_eq!(
            total_revenue(&sample_orders(), RevenuePolicy::PaidOnly),
            20.0 + 5.0 + 7.0
        );
    }

    #[test]
    fn empty_input_gives_zero_aggregates() {
        assert_eq!(total_revenue(&[], RevenuePolicy::AllOrders), 0.0);
        assert_eq!(total_sales(&[]), 0);

        let months = monthly_revenue(&[], RevenuePolicy::AllOrders, 2025, UtcOffset::UTC);
        let labels: Vec<&str> = months.iter().map(|month| month.label).collect();
        assert_eq!(
            labels,
            [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"
            ]
        );
        assert!(months.iter().all(|month| month.total == 0.0));

        assert!(revenue_by_payment_status(&[]).is_empty());
        assert!(
            revenue_by_order_status(&[], RevenuePolicy::AllOrders).is_empty()
        );
        assert!(
            revenue_by_category(&[], RevenuePolicy::AllOrders).is_empty()
        );
    }

    #[test]
    fn marking_an_order_paid_adds_one_sale_and_keeps_revenue() {
        let mut orders = sample_orders();
        let revenue_before = total_revenue(&orders, RevenuePolicy::AllOrders);
        let sales_before = total_sales(&orders);

        orders[1].is_paid = true;

        assert_eq!(total_sales(&orders), sales_before + 1);
        assert_eq!(
            total_revenue(&orders, RevenuePolicy::AllOrders),
            revenue_before
        );
    }

    #[test]
    fn category_revenue_is_split_per_line_item() {
        let orders = vec![order(
            "a",
            true,
            None,
            vec![item(Some("Drinks"), 10.0, 2), item(Some("Food"), 5.0, 1)],
        )];

        let by_category = revenue_by_category(&orders, RevenuePolicy::AllOrders);

        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category["Drinks"], 20.0);
        assert_eq!(by_category["Food"], 5.0);
    }

    #[test]
    fn missing_category_is_uncategorized() {
        let by_category = revenue_by_category(&sample_orders(), RevenuePolicy::AllOrders);

        assert_eq!(by_category[UNCATEGORIZED_LABEL], 7.0);
    }

    #[test]
    fn orders_in_the_same_month_share_a_bucket() {
        let orders = vec![
            order(
                "a",
                true,
                Some(datetime!(2025-03-05 08:00 UTC)),
                vec![item(None, 100.0, 1)],
            ),
            order(
                "b",
                false,
                Some(datetime!(2025-03-05 08:00 UTC)),
                vec![item(None, 25.0, 2)],
            ),
        ];

        let months = monthly_revenue(&orders, RevenuePolicy::AllOrders, 2025, UtcOffset::UTC);

        assert_eq!(months[2].label, "Mar");
        assert_eq!(months[2].total, 150.0);
        assert_eq!(months.iter().map(|month| month.total).sum::<f64>(), 150.0);
    }

    #[test]
    fn monthly_revenue_uses_local_time_and_skips_other_years() {
        let orders = vec![
            // March 31st 23:30 UTC is already April 1st in UTC+2.
            order(
                "a",
                true,
                Some(datetime!(2025-03-31 23:30 UTC)),
                vec![item(None, 40.0, 1)],
            ),
            order(
                "b",
                true,
                Some(datetime!(2024-03-10 12:00 UTC)),
                vec![item(None, 99.0, 1)],
            ),
            order("c", true, None, vec![item(None, 13.0, 1)]),
        ];
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();

        let months = monthly_revenue(&orders, RevenuePolicy::AllOrders, 2025, offset);

        assert_eq!(months[2].total, 0.0);
        assert_eq!(months[3].total, 40.0);
        assert_eq!(months.iter().map(|month| month.total).sum::<f64>(), 40.0);
    }

    #[test]
    fn payment_status_rollup_ignores_policy() {
        let by_payment = revenue_by_payment_status(&sample_orders());

        assert_eq!(by_payment[&PaymentStatus::Paid], 32.0);
        assert_eq!(by_payment[&PaymentStatus::NotPaid], 50.0);
    }

    #[test]
    fn order_status_rollup_respects_policy() {
        let mut orders = sample_orders();
        orders[1].order_status = OrderStatus::Delivered;

        let all = revenue_by_order_status(&orders, RevenuePolicy::AllOrders);
        assert_eq!(all[&OrderStatus::Processing], 32.0);
        assert_eq!(all[&OrderStatus::Delivered], 50.0);

        let paid = revenue_by_order_status(&orders, RevenuePolicy::PaidOnly);
        assert_eq!(paid.get(&OrderStatus::Delivered), None);
    }
}
