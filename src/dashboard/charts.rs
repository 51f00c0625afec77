//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts bar charts from the order aggregates:
//! - **Monthly Revenue**: revenue per month of the selected year
//! - **Payment Status**: revenue of paid orders against unpaid orders
//! - **Order Status**: revenue per delivery status
//! - **Category**: revenue per product category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use std::collections::HashMap;

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::MonthlyRevenue,
    html::HeadElement,
    order::{OrderStatus, PaymentStatus},
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                escape_script_text(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Escape `<` so that chart labels taken from order data cannot close the
/// surrounding `<script>` element.
///
/// `<` only appears inside JSON strings, where `\u003c` decodes to the same
/// character.
fn escape_script_text(options: &str) -> String {
    options.replace('<', "\\u003c")
}

pub(super) fn monthly_revenue_chart(months: &[MonthlyRevenue], year: i32) -> Chart {
    let labels = months.iter().map(|month| month.label.to_owned()).collect();
    let values: Vec<f64> = months.iter().map(|month| month.total).collect();

    revenue_bar_chart("Revenue", &year.to_string(), labels, values)
}

/// Both payment buckets are always shown, empty ones as zero.
pub(super) fn payment_status_chart(revenue: &HashMap<PaymentStatus, f64>) -> Chart {
    let labels = PaymentStatus::ALL
        .iter()
        .map(|status| status.label().to_owned())
        .collect();
    let values = PaymentStatus::ALL
        .iter()
        .map(|status| revenue.get(status).copied().unwrap_or(0.0))
        .collect();

    revenue_bar_chart("Revenue by Payment Status", "All orders", labels, values)
}

pub(super) fn order_status_chart(revenue: &HashMap<OrderStatus, f64>) -> Chart {
    let labels = OrderStatus::ALL
        .iter()
        .map(|status| status.label().to_owned())
        .collect();
    let values = OrderStatus::ALL
        .iter()
        .map(|status| revenue.get(status).copied().unwrap_or(0.0))
        .collect();

    revenue_bar_chart("Revenue by Order Status", "", labels, values)
}

pub(super) fn category_chart(revenue: &HashMap<String, f64>) -> Chart {
    let mut categories: Vec<(&String, &f64)> = revenue.iter().collect();
    categories.sort_by(|(a, _), (b, _)| a.cmp(b));

    let labels = categories.iter().map(|(name, _)| (*name).clone()).collect();
    let values = categories.iter().map(|(_, total)| **total).collect();

    revenue_bar_chart("Revenue by Category", "", labels, values)
}

fn revenue_bar_chart(title: &str, subtitle: &str, labels: Vec<String>, values: Vec<f64>) -> Chart {
    Chart::new()
        .title(Title::new().text(title).subtext(subtitle))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name(title).data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'ILS',
              maximumFractionDigits: 0
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
