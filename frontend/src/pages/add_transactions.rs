use crate::components::forms::MultiTransactionForm;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use shared::Route;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AddTransactionsPageProps {
    pub api: ApiClient,
    pub on_navigate: Callback<Route>,
}

#[function_component(AddTransactionsPage)]
pub fn add_transactions_page(props: &AddTransactionsPageProps) -> Html {
    let on_saved = Callback::from(|count: usize| {
        Logger::debug_with_component("add-transactions", &format!("{} transaction(s) added", count));
    });
    let view_all = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Route::Transactions))
    };

    html! {
        <div class="add-transactions-page">
            <div class="page-header">
                <h1>{"Add Transactions"}</h1>
                <button class="btn btn-secondary" onclick={view_all}>{"View All Transactions"}</button>
            </div>
            <p class="page-subtitle">
                {"Enter one or more transactions, or upload a receipt to fill them in automatically."}
            </p>
            <MultiTransactionForm api={props.api.clone()} on_saved={on_saved} />
        </div>
    }
}
