use super::messages::{ErrorMessage, SuccessMessage};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use gloo::timers::callback::Timeout;
use shared::format::{format_amount, format_date};
use shared::validation::TransactionEdit;
use shared::{Category, Transaction};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionDetailModalProps {
    pub transaction: Option<Transaction>,
    pub api: ApiClient,
    pub on_close: Callback<()>,
    /// Emitted after an update or delete so the list can refetch
    pub on_changed: Callback<()>,
}

#[function_component(TransactionDetailModal)]
pub fn transaction_detail_modal(props: &TransactionDetailModalProps) -> Html {
    let editing = use_state(|| false);
    let edit = use_state(|| Option::<TransactionEdit>::None);
    let busy = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let success_message = use_state(|| Option::<String>::None);

    use_effect_with(props.transaction.clone(), {
        let editing = editing.clone();
        let edit = edit.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        move |transaction| {
            editing.set(false);
            edit.set(transaction.as_ref().map(TransactionEdit::from));
            error_message.set(None);
            success_message.set(None);
            || ()
        }
    });

    let Some(transaction) = props.transaction.clone() else {
        return html! {};
    };
    let Some(id) = transaction.id else {
        return html! {};
    };

    let update_edit = |apply: fn(&mut TransactionEdit, String)| {
        let edit = edit.clone();
        Callback::from(move |value: String| {
            if let Some(mut next) = (*edit).clone() {
                apply(&mut next, value);
                edit.set(Some(next));
            }
        })
    };
    let from_input = |cb: Callback<String>| {
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };

    let on_category = {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let (Some(mut next), Ok(category)) = ((*edit).clone(), select.value().parse::<Category>()) {
                next.category = category;
                edit.set(Some(next));
            }
        })
    };

    let on_recurring = {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(mut next) = (*edit).clone() {
                next.is_recurring = input.checked();
                edit.set(Some(next));
            }
        })
    };

    let on_save = {
        let api = props.api.clone();
        let original = transaction.clone();
        let edit = edit.clone();
        let editing = editing.clone();
        let busy = busy.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        let on_changed = props.on_changed.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(current) = (*edit).clone() else {
                return;
            };
            let update = match current.changes(&original) {
                Ok(update) => update,
                Err(e) => {
                    error_message.set(Some(e.to_string()));
                    return;
                }
            };
            if update.is_empty() {
                editing.set(false);
                return;
            }

            busy.set(true);
            error_message.set(None);
            let api = api.clone();
            let editing = editing.clone();
            let busy = busy.clone();
            let error_message = error_message.clone();
            let success_message = success_message.clone();
            let on_changed = on_changed.clone();

            spawn_local(async move {
                match api.update_transaction(id, &update).await {
                    Ok(()) => {
                        Logger::info_with_component("transaction-detail", &format!("Updated transaction {}", id));
                        editing.set(false);
                        success_message.set(Some("Transaction updated successfully!".to_string()));
                        on_changed.emit(());
                        let clear = success_message.clone();
                        Timeout::new(api.config().success_message_ms, move || clear.set(None)).forget();
                    }
                    Err(e) => {
                        Logger::warn_with_component("transaction-detail", &format!("Update failed: {}", e));
                        error_message.set(Some(format!("Failed to update transaction: {}", e.detail())));
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_delete = {
        let api = props.api.clone();
        let busy = busy.clone();
        let error_message = error_message.clone();
        let on_changed = props.on_changed.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |_: MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Are you sure you want to delete this transaction?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            busy.set(true);
            error_message.set(None);
            let api = api.clone();
            let busy = busy.clone();
            let error_message = error_message.clone();
            let on_changed = on_changed.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                match api.delete_transaction(id).await {
                    Ok(()) => {
                        Logger::info_with_component("transaction-detail", &format!("Deleted transaction {}", id));
                        busy.set(false);
                        on_changed.emit(());
                        on_close.emit(());
                    }
                    Err(e) => {
                        error_message.set(Some(format!("Failed to delete transaction: {}", e.detail())));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let toggle_edit = {
        let editing = editing.clone();
        let edit = edit.clone();
        let original = transaction.clone();
        let error_message = error_message.clone();
        Callback::from(move |_: MouseEvent| {
            if *editing {
                edit.set(Some(TransactionEdit::from(&original)));
                error_message.set(None);
            }
            editing.set(!*editing);
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = match (*editing, (*edit).clone()) {
        (true, Some(current)) => html! {
            <form class="modal-form" onsubmit={on_save}>
                <div class="form-group">
                    <label for="detail-date">{"Date"}</label>
                    <input id="detail-date" type="date" value={current.date.clone()}
                        oninput={from_input(update_edit(|t, v| t.date = v))} disabled={*busy} />
                </div>
                <div class="form-group">
                    <label for="detail-category">{"Category"}</label>
                    <select id="detail-category" onchange={on_category} disabled={*busy}>
                        {for Category::ALL.iter().map(|category| html! {
                            <option value={category.as_str()} selected={*category == current.category}>
                                {category.label()}
                            </option>
                        })}
                    </select>
                </div>
                <div class="form-group">
                    <label for="detail-description">{"Description"}</label>
                    <input id="detail-description" type="text" value={current.description.clone()}
                        oninput={from_input(update_edit(|t, v| t.description = v))} disabled={*busy} />
                </div>
                <div class="form-group">
                    <label for="detail-amount">{"Amount"}</label>
                    <input id="detail-amount" type="number" step="0.01" min="0.01" value={current.amount.clone()}
                        oninput={from_input(update_edit(|t, v| t.amount = v))} disabled={*busy} />
                </div>
                <label class="checkbox-label">
                    <input type="checkbox" checked={current.is_recurring} onchange={on_recurring} disabled={*busy} />
                    {"Recurring"}
                </label>
                <div class="modal-buttons">
                    <button type="submit" class="btn btn-primary" disabled={*busy}>
                        {if *busy { "Saving..." } else { "Save" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={toggle_edit.clone()} disabled={*busy}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        },
        _ => {
            let amount_class = if transaction.category.is_income() { "amount positive" } else { "amount negative" };
            html! {
                <>
                    <dl class="transaction-details">
                        <dt>{"Date"}</dt>
                        <dd>{format_date(transaction.date)}</dd>
                        <dt>{"Category"}</dt>
                        <dd><span class={format!("category-badge {}", transaction.category.as_str())}>{transaction.category.label()}</span></dd>
                        <dt>{"Description"}</dt>
                        <dd>{&transaction.description}</dd>
                        <dt>{"Amount"}</dt>
                        <dd class={amount_class}>{format_amount(transaction.amount)}</dd>
                        <dt>{"Recurring"}</dt>
                        <dd>{if transaction.is_recurring { "Yes" } else { "No" }}</dd>
                    </dl>
                    <div class="modal-buttons">
                        <button type="button" class="btn btn-primary" onclick={toggle_edit.clone()} disabled={*busy}>
                            {"Edit"}
                        </button>
                        <button type="button" class="btn btn-danger" onclick={on_delete} disabled={*busy}>
                            {if *busy { "Deleting..." } else { "Delete" }}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={on_close_click} disabled={*busy}>
                            {"Close"}
                        </button>
                    </div>
                </>
            }
        }
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{"Transaction Details"}</h3>
                    <ErrorMessage message={(*error_message).clone()} />
                    <SuccessMessage message={(*success_message).clone()} />
                    {body}
                </div>
            </div>
        </div>
    }
}
