use crate::components::{ErrorMessage, LoadingSpinner};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use shared::format::{format_amount, format_signed_amount};
use shared::{Route, Totals, User};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HomePageProps {
    pub api: ApiClient,
    pub authenticated: bool,
    pub user: Option<User>,
    pub on_navigate: Callback<Route>,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let totals = use_state(|| Option::<Totals>::None);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    {
        let api = props.api.clone();
        let totals = totals.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(props.authenticated, move |authenticated| {
            if *authenticated {
                loading.set(true);
                spawn_local(async move {
                    match api.dashboard_totals().await {
                        Ok(loaded) => {
                            totals.set(Some(loaded));
                            error.set(None);
                        }
                        Err(e) => {
                            Logger::warn_with_component("home", &format!("Dashboard totals failed: {}", e));
                            error.set(Some(format!("Failed to load summary: {}", e.detail())));
                        }
                    }
                    loading.set(false);
                });
            } else {
                totals.set(None);
            }
            || ()
        });
    }

    let go = |route: Route| {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(route))
    };

    if !props.authenticated {
        return html! {
            <div class="home-page">
                <section class="hero">
                    <h1>{"AutoFinanceAI"}</h1>
                    <p>{"Track income and expenses, scan receipts and get monthly insights."}</p>
                    <div class="hero-actions">
                        <button class="btn btn-primary" onclick={go(Route::Signup)}>{"Get Started"}</button>
                        <button class="btn btn-secondary" onclick={go(Route::Login)}>{"Sign In"}</button>
                    </div>
                </section>
            </div>
        };
    }

    let greeting = props
        .user
        .as_ref()
        .map(|user| format!("Welcome back, {}!", user.display_name()))
        .unwrap_or_else(|| "Welcome back!".to_string());

    html! {
        <div class="home-page">
            <h1>{greeting}</h1>
            <ErrorMessage message={(*error).clone()} />
            {if *loading {
                html! { <LoadingSpinner label="Loading summary..." /> }
            } else if let Some(totals) = (*totals).clone() {
                html! {
                    <div class="dashboard-cards">
                        <div class="card income">
                            <span class="card-label">{"Total Income"}</span>
                            <span class="card-value">{format_amount(totals.total_income)}</span>
                        </div>
                        <div class="card expenses">
                            <span class="card-label">{"Total Expenses"}</span>
                            <span class="card-value">{format_amount(totals.total_expenses)}</span>
                        </div>
                        <div class="card net">
                            <span class="card-label">{"Net Amount"}</span>
                            <span class="card-value">{format_signed_amount(totals.net_amount)}</span>
                        </div>
                    </div>
                }
            } else { html! {} }}
            <div class="quick-actions">
                <button class="btn btn-primary" onclick={go(Route::AddTransactions)}>{"Add Transactions"}</button>
                <button class="btn btn-secondary" onclick={go(Route::Transactions)}>{"View Transactions"}</button>
                <button class="btn btn-secondary" onclick={go(Route::Analysis)}>{"Monthly Analysis"}</button>
            </div>
        </div>
    }
}
