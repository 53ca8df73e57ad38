use crate::components::transactions::{
    FilterSummary, FiltersSidebar, PaginationControls, SearchBar, TotalsSummary, TransactionTable,
};
use crate::components::{DownloadModal, ErrorMessage, TransactionDetailModal};
use crate::hooks::use_transactions;
use crate::services::api::ApiClient;
use shared::Transaction;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    pub api: ApiClient,
    pub authenticated: bool,
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let transactions = use_transactions(&props.api, props.authenticated);
    let selected = use_state(|| Option::<Transaction>::None);
    let download_open = use_state(|| false);

    let list = &transactions.list;
    let actions = transactions.actions.clone();
    let query = list.query().clone();
    let result = list.result().clone();

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |transaction: Transaction| selected.set(Some(transaction)))
    };
    let on_detail_close = {
        let selected = selected.clone();
        Callback::from(move |_| selected.set(None))
    };
    let on_changed = {
        let selected = selected.clone();
        let refresh = actions.refresh.clone();
        Callback::from(move |_| {
            selected.set(None);
            refresh.emit(());
        })
    };
    let open_download = {
        let download_open = download_open.clone();
        Callback::from(move |_: MouseEvent| download_open.set(true))
    };
    let close_download = {
        let download_open = download_open.clone();
        Callback::from(move |_| download_open.set(false))
    };
    let on_dismiss = {
        let dismiss = actions.dismiss_error.clone();
        Callback::from(move |_| dismiss.emit(()))
    };

    html! {
        <div class="transactions-page">
            <div class="page-header">
                <h1>{"Transactions"}</h1>
                <button class="btn btn-secondary" onclick={open_download}>{"Download Report"}</button>
            </div>

            <ErrorMessage message={list.error().map(str::to_string)} on_dismiss={Some(on_dismiss)} />

            <div class="transactions-layout">
                <FiltersSidebar
                    query={query.clone()}
                    error={transactions.filter_error.clone()}
                    on_category={actions.on_category.clone()}
                    on_date_range={actions.on_date_range.clone()}
                    on_amount_range={actions.on_amount_range.clone()}
                    on_clear={actions.on_clear_filters.clone()}
                />

                <div class="transactions-main">
                    <SearchBar
                        value={query.search_input.clone()}
                        on_input={actions.on_search_input.clone()}
                        on_commit={actions.on_search_commit.clone()}
                    />
                    <FilterSummary query={query.clone()} on_clear={actions.on_clear_filters.clone()} />
                    <TotalsSummary totals={result.totals.clone()} total_count={result.total_count} />

                    <TransactionTable
                        transactions={result.transactions.clone()}
                        loading={list.is_loading()}
                        sort_by={query.sort_by}
                        sort_order={query.sort_order}
                        on_sort={actions.on_sort.clone()}
                        on_select={on_select}
                    />

                    <PaginationControls
                        page={query.page}
                        total_pages={result.total_pages}
                        page_size={result.page_size}
                        total_count={result.total_count}
                        disabled={list.is_loading()}
                        on_page={actions.on_page.clone()}
                    />
                </div>
            </div>

            <TransactionDetailModal
                transaction={(*selected).clone()}
                api={props.api.clone()}
                on_close={on_detail_close}
                on_changed={on_changed}
            />
            <DownloadModal is_open={*download_open} api={props.api.clone()} on_close={close_download} />
        </div>
    }
}
