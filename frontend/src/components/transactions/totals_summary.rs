use shared::format::{format_amount, format_signed_amount};
use shared::Totals;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TotalsSummaryProps {
    pub totals: Totals,
    pub total_count: u64,
}

/// Aggregates over the whole filtered set, as computed by the server
#[function_component(TotalsSummary)]
pub fn totals_summary(props: &TotalsSummaryProps) -> Html {
    let totals = &props.totals;
    let net_class = if totals.net_amount.is_sign_negative() { "total-value negative" } else { "total-value positive" };

    html! {
        <div class="totals-summary">
            <div class="total-card">
                <span class="total-label">{"Total Income"}</span>
                <span class="total-value positive">{format_amount(totals.total_income)}</span>
            </div>
            <div class="total-card">
                <span class="total-label">{"Total Expenses"}</span>
                <span class="total-value negative">{format_amount(totals.total_expenses)}</span>
            </div>
            <div class="total-card">
                <span class="total-label">{"Net Amount"}</span>
                <span class={net_class}>{format_signed_amount(totals.net_amount)}</span>
            </div>
            <div class="total-card">
                <span class="total-label">{"Transactions"}</span>
                <span class="total-value">{totals.total_transactions.unwrap_or(props.total_count)}</span>
            </div>
        </div>
    }
}
