//! Summary cards shown above the dashboard charts.

use maud::{Markup, html};

use crate::html::format_currency;

/// The headline numbers for a store.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SummaryCards {
    pub total_revenue: f64,
    pub total_sales: usize,
    pub products_in_stock: usize,
}

pub(super) fn summary_cards_view(summary: &SummaryCards) -> Markup {
    html! {
        section id="summary-cards" class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                (summary_card("Total Revenue", &format_currency(summary.total_revenue)))
                (summary_card("Sales", &format!("+{}", summary.total_sales)))
                (summary_card("Products In Stock", &summary.products_in_stock.to_string()))
            }
        }
    }
}

fn summary_card(title: &str, value: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            aria-label=(format!("{title}: {value}"))
        {
            h4 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-2" {
                (title)
            }

            div class="text-3xl font-bold" data-testid="card-value" {
                (value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::test_utils::select_text;

    use super::{SummaryCards, summary_cards_view};

    #[test]
    fn renders_three_cards() {
        let summary = SummaryCards {
            total_revenue: 234.4,
            total_sales: 3,
            products_in_stock: 12,
        };

        let html = Html::parse_fragment(&summary_cards_view(&summary).into_string());

        assert_eq!(
            select_text(&html, "[data-testid='card-value']"),
            ["₪234", "+3", "12"]
        );
    }
}
