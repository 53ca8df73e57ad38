use hooks::{use_router, use_session};
use pages::{AddTransactionsPage, AnalysisPage, HomePage, LoginPage, SignupPage, TransactionsPage};
use services::api::{client, ApiClient};
use services::logging::Logger;
use services::session_storage::LocalCredentialStorage;
use shared::{AuthService, ClientConfig, Route, Session};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod pages;
mod services;

use components::Navigation;

fn build_client() -> ApiClient {
    let config = ClientConfig::from_build_env();
    Logger::init(config.enable_debug_logging);
    let session = Session::init(LocalCredentialStorage);
    client(config, session)
}

#[function_component(App)]
fn app() -> Html {
    let api = use_memo((), |_| build_client());
    let api: ApiClient = (*api).clone();
    let session = use_session(api.session());
    let router = use_router();
    let restoring = use_state(|| api.session().is_authenticated());

    {
        let api = api.clone();
        let restoring = restoring.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match AuthService::new(api).restore().await {
                    Ok(Some(user)) => Logger::info_with_component(
                        "app",
                        &format!("Restored session for {}", user.username),
                    ),
                    Ok(None) => {}
                    Err(e) if e.requires_login() => {
                        Logger::info_with_component("app", "Stored credentials expired")
                    }
                    Err(e) => Logger::error_with_component("app", &format!("Session restore failed: {}", e)),
                }
                restoring.set(false);
            });
            || ()
        });
    }

    let route = router.route.resolve(session.authenticated);

    {
        let navigate = router.navigate.clone();
        let requested = router.route;
        use_effect_with((requested, route), move |(requested, route)| {
            if requested != route {
                navigate.emit(*route);
            }
            || ()
        });
    }

    let on_logout = {
        let api = api.clone();
        let navigate = router.navigate.clone();
        Callback::from(move |_| {
            AuthService::new(api.clone()).logout();
            navigate.emit(Route::Login);
        })
    };

    let page = if *restoring {
        html! { <components::LoadingSpinner label="Restoring session..." /> }
    } else {
        match route {
            Route::Home => html! {
                <HomePage
                    api={api.clone()}
                    authenticated={session.authenticated}
                    user={session.user.clone()}
                    on_navigate={router.navigate.clone()}
                />
            },
            Route::Login => html! {
                <LoginPage api={api.clone()} last_event={session.last_event} on_navigate={router.navigate.clone()} />
            },
            Route::Signup => html! {
                <SignupPage api={api.clone()} on_navigate={router.navigate.clone()} />
            },
            Route::Transactions => html! {
                <TransactionsPage api={api.clone()} authenticated={session.authenticated} />
            },
            Route::AddTransactions => html! {
                <AddTransactionsPage api={api.clone()} on_navigate={router.navigate.clone()} />
            },
            Route::Analysis => html! { <AnalysisPage api={api.clone()} /> },
        }
    };

    html! {
        <div class="app">
            <Navigation
                current={route}
                authenticated={session.authenticated}
                user={session.user.clone()}
                api={api.clone()}
                on_navigate={router.navigate.clone()}
                on_logout={on_logout}
            />
            <main class="content">
                {page}
            </main>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
