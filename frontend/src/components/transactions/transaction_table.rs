use shared::format::{format_amount, format_date};
use shared::{SortField, SortOrder, Transaction};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub on_sort: Callback<SortField>,
    pub on_select: Callback<Transaction>,
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    let header = |field: SortField| {
        let on_sort = props.on_sort.clone();
        let indicator = match (props.sort_by == field, props.sort_order) {
            (true, SortOrder::Asc) => " ▲",
            (true, SortOrder::Desc) => " ▼",
            (false, _) => "",
        };
        html! {
            <th class="sortable" onclick={Callback::from(move |_: MouseEvent| on_sort.emit(field))}>
                {field.label()}{indicator}
            </th>
        }
    };

    html! {
        <section class="transactions-section">
            {if props.loading {
                html! { <div class="loading">{"Loading transactions..."}</div> }
            } else if props.transactions.is_empty() {
                html! { <div class="empty-state">{"No transactions found. Add your first transaction above!"}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="transactions-table">
                            <thead>
                                <tr>
                                    {header(SortField::Date)}
                                    <th>{"Category"}</th>
                                    <th>{"Description"}</th>
                                    {header(SortField::Amount)}
                                    <th>{"Recurring"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.transactions.iter().map(|transaction| {
                                    let amount_class = if transaction.category.is_income() {
                                        "amount positive"
                                    } else {
                                        "amount negative"
                                    };
                                    let on_select = props.on_select.clone();
                                    let selected = transaction.clone();

                                    html! {
                                        <tr class="clickable" onclick={Callback::from(move |_: MouseEvent| on_select.emit(selected.clone()))}>
                                            <td class="date">{format_date(transaction.date)}</td>
                                            <td>
                                                <span class={format!("category-badge {}", transaction.category.as_str())}>
                                                    {transaction.category.label()}
                                                </span>
                                            </td>
                                            <td class="description">{&transaction.description}</td>
                                            <td class={amount_class}>{format_amount(transaction.amount)}</td>
                                            <td>{if transaction.is_recurring { "🔄" } else { "" }}</td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}
