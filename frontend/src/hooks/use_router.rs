use gloo::events::EventListener;
use shared::Route;
use yew::prelude::*;

pub struct UseRouterResult {
    pub route: Route,
    pub navigate: Callback<Route>,
}

fn current_route() -> Route {
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    Route::from_hash(&hash)
}

/// Fragment-based routing; follows back/forward through `hashchange`
#[hook]
pub fn use_router() -> UseRouterResult {
    let route = use_state(current_route);

    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "hashchange", move |_| {
                    route.set(current_route());
                })
            });
            move || drop(listener)
        });
    }

    let navigate = {
        let route = route.clone();
        use_callback((), move |target: Route, _| {
            if let Some(window) = web_sys::window() {
                if window.location().set_hash(target.hash()).is_err() {
                    crate::services::logging::Logger::warn_with_component(
                        "router",
                        &format!("Failed to navigate to {}", target.hash()),
                    );
                }
            }
            route.set(target);
        })
    };

    UseRouterResult {
        route: *route,
        navigate,
    }
}
