use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::listing::{self, FetchTicket, TransactionList};
use shared::{Category, SortField};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub struct UseTransactionsResult {
    /// Snapshot of the engine for rendering
    pub list: TransactionList,
    /// Rejected filter input (e.g. a negative amount bound)
    pub filter_error: Option<String>,
    pub actions: UseTransactionsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseTransactionsActions {
    pub on_search_input: Callback<String>,
    pub on_search_commit: Callback<()>,
    pub on_category: Callback<Option<Category>>,
    pub on_date_range: Callback<(Option<NaiveDate>, Option<NaiveDate>)>,
    pub on_amount_range: Callback<(Option<Decimal>, Option<Decimal>)>,
    pub on_sort: Callback<SortField>,
    pub on_page: Callback<u32>,
    pub on_clear_filters: Callback<()>,
    pub refresh: Callback<()>,
    pub dismiss_error: Callback<()>,
}

/// Render the change, then issue the request it produced. The response is
/// applied only if it still belongs to the latest query.
fn dispatch(
    list: &Rc<RefCell<TransactionList>>,
    api: &ApiClient,
    ticket: Option<FetchTicket>,
    rerender: &UseForceUpdateHandle,
) {
    rerender.force_update();
    let Some(ticket) = ticket else {
        return;
    };

    let list = list.clone();
    let api = api.clone();
    let rerender = rerender.clone();
    spawn_local(async move {
        Logger::debug_with_component(
            "use-transactions",
            &format!("Fetching page {:?} (#{})", ticket.params.get("page"), ticket.sequence),
        );
        if !listing::fetch(&list, &api, ticket).await {
            return;
        }
        rerender.force_update();

        let shown = list.borrow().error().map(str::to_string);
        if let Some(shown) = shown {
            // transient: clears itself unless replaced in the meantime
            let delay = api.config().transient_message_ms;
            gloo::timers::future::TimeoutFuture::new(delay).await;
            let still_shown = list.borrow().error() == Some(shown.as_str());
            if still_shown {
                list.borrow_mut().dismiss_error();
                rerender.force_update();
            }
        }
    });
}

#[hook]
pub fn use_transactions(api: &ApiClient, authenticated: bool) -> UseTransactionsResult {
    let list = use_mut_ref(|| TransactionList::new(false));
    let filter_error = use_state(|| Option::<String>::None);
    let rerender = use_force_update();

    // Follow the session: first fetch on login, full reset on logout
    {
        let list = list.clone();
        let api = api.clone();
        let rerender = rerender.clone();
        use_effect_with(authenticated, move |authenticated| {
            let ticket = list.borrow_mut().set_authenticated(*authenticated);
            dispatch(&list, &api, ticket, &rerender);
            || ()
        });
    }

    let on_search_input = {
        let list = list.clone();
        let rerender = rerender.clone();
        use_callback((), move |text: String, _| {
            list.borrow_mut().set_search_input(text);
            rerender.force_update();
        })
    };

    let on_search_commit = {
        let (list, api, rerender) = (list.clone(), api.clone(), rerender.clone());
        use_callback((), move |_: (), _| {
            let ticket = list.borrow_mut().commit_search();
            dispatch(&list, &api, ticket, &rerender);
        })
    };

    let on_category = {
        let (list, api, rerender) = (list.clone(), api.clone(), rerender.clone());
        use_callback((), move |category: Option<Category>, _| {
            let ticket = list.borrow_mut().set_category_filter(category);
            dispatch(&list, &api, ticket, &rerender);
        })
    };

    let on_date_range = {
        let (list, api, rerender) = (list.clone(), api.clone(), rerender.clone());
        use_callback((), move |(from, to): (Option<NaiveDate>, Option<NaiveDate>), _| {
            let ticket = list.borrow_mut().set_date_range(from, to);
            dispatch(&list, &api, ticket, &rerender);
        })
    };

    let on_amount_range = {
        let (list, api, rerender) = (list.clone(), api.clone(), rerender.clone());
        let filter_error = filter_error.clone();
        use_callback((), move |(min, max): (Option<Decimal>, Option<Decimal>), _| {
            let outcome = list.borrow_mut().set_amount_range(min, max);
            match outcome {
                Ok(ticket) => {
                    filter_error.set(None);
                    dispatch(&list, &api, ticket, &rerender);
                }
                Err(e) => filter_error.set(Some(e.detail())),
            }
        })
    };

    let on_sort = {
        let (list, api, rerender) = (list.clone(), api.clone(), rerender.clone());
        use_callback((), move |field: SortField, _| {
            let ticket = list.borrow_mut().set_sort(field);
            dispatch(&list, &api, ticket, &rerender);
        })
    };

    let on_page = {
        let (list, api, rerender) = (list.clone(), api.clone(), rerender.clone());
        use_callback((), move |page: u32, _| {
            let ticket = list.borrow_mut().set_page(page);
            dispatch(&list, &api, ticket, &rerender);
        })
    };

    let on_clear_filters = {
        let (list, api, rerender) = (list.clone(), api.clone(), rerender.clone());
        let filter_error = filter_error.clone();
        use_callback((), move |_: (), _| {
            filter_error.set(None);
            let ticket = list.borrow_mut().clear_filters();
            dispatch(&list, &api, ticket, &rerender);
        })
    };

    let refresh = {
        let (list, api, rerender) = (list.clone(), api.clone(), rerender.clone());
        use_callback((), move |_: (), _| {
            let ticket = list.borrow_mut().refetch();
            dispatch(&list, &api, ticket, &rerender);
        })
    };

    let dismiss_error = {
        let (list, rerender) = (list.clone(), rerender.clone());
        use_callback((), move |_: (), _| {
            list.borrow_mut().dismiss_error();
            rerender.force_update();
        })
    };

    let snapshot = list.borrow().clone();
    UseTransactionsResult {
        list: snapshot,
        filter_error: (*filter_error).clone(),
        actions: UseTransactionsActions {
            on_search_input,
            on_search_commit,
            on_category,
            on_date_range,
            on_amount_range,
            on_sort,
            on_page,
            on_clear_filters,
            refresh,
            dismiss_error,
        },
    }
}
