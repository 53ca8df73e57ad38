use super::transaction_rows::TransactionRow;
use crate::components::messages::{ErrorMessage, SuccessMessage};
use crate::components::receipt_uploader::ReceiptUploader;
use crate::hooks::use_transient;
use crate::services::api::ApiClient;
use crate::services::date_utils::today_string;
use crate::services::logging::Logger;
use shared::validation::{validate_drafts, DraftErrors, TransactionDraft, ValidationError};
use shared::ReceiptLine;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MultiTransactionFormProps {
    pub api: ApiClient,
    /// Emitted after a batch was saved
    pub on_saved: Callback<usize>,
}

fn blank_row() -> TransactionDraft {
    TransactionDraft {
        date: today_string(),
        ..TransactionDraft::default()
    }
}

fn apply_field(draft: &mut TransactionDraft, field: &str, value: String) {
    match field {
        "date" => draft.date = value,
        "category" => draft.category = value,
        "description" => draft.description = value,
        "amount" => draft.amount = value,
        "is_recurring" => draft.is_recurring = value == "true",
        _ => {}
    }
}

/// Several transaction rows saved in one request, optionally prefilled from
/// a receipt
#[function_component(MultiTransactionForm)]
pub fn multi_transaction_form(props: &MultiTransactionFormProps) -> Html {
    let rows = use_state(|| vec![blank_row()]);
    let errors = use_state(|| vec![DraftErrors::default()]);
    let saving = use_state(|| false);
    let receipt_loading = use_state(|| false);
    let general_error = use_state(|| Option::<String>::None);
    let success = use_transient(props.api.config().transient_message_ms);

    let on_change = {
        let rows = rows.clone();
        let errors = errors.clone();
        Callback::from(move |(index, field, value): (usize, &'static str, String)| {
            let mut next = (*rows).clone();
            if let Some(draft) = next.get_mut(index) {
                apply_field(draft, field, value);
                rows.set(next);
            }
            let mut next_errors = (*errors).clone();
            if let Some(row_errors) = next_errors.get_mut(index) {
                row_errors.clear_field(field);
                errors.set(next_errors);
            }
        })
    };

    let on_add_row = {
        let rows = rows.clone();
        let errors = errors.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*rows).clone();
            next.push(blank_row());
            rows.set(next);
            let mut next_errors = (*errors).clone();
            next_errors.push(DraftErrors::default());
            errors.set(next_errors);
        })
    };

    let on_remove = {
        let rows = rows.clone();
        let errors = errors.clone();
        Callback::from(move |index: usize| {
            if rows.len() <= 1 || index >= rows.len() {
                return;
            }
            let mut next = (*rows).clone();
            next.remove(index);
            rows.set(next);
            let mut next_errors = (*errors).clone();
            if index < next_errors.len() {
                next_errors.remove(index);
            }
            errors.set(next_errors);
        })
    };

    let on_parsed = {
        let rows = rows.clone();
        let errors = errors.clone();
        let success = success.clone();
        let general_error = general_error.clone();
        Callback::from(move |lines: Vec<ReceiptLine>| {
            if lines.is_empty() {
                general_error.set(Some("No transactions found on the receipt".to_string()));
                return;
            }
            let drafts: Vec<TransactionDraft> = lines.iter().map(TransactionDraft::from).collect();
            errors.set(vec![DraftErrors::default(); drafts.len()]);
            success.show(format!(
                "Successfully parsed {} transaction(s) from receipt!",
                drafts.len()
            ));
            general_error.set(None);
            rows.set(drafts);
        })
    };

    let on_receipt_loading = {
        let receipt_loading = receipt_loading.clone();
        Callback::from(move |loading: bool| receipt_loading.set(loading))
    };

    let on_save = {
        let api = props.api.clone();
        let rows = rows.clone();
        let errors = errors.clone();
        let saving = saving.clone();
        let general_error = general_error.clone();
        let success = success.clone();
        let on_saved = props.on_saved.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            general_error.set(None);
            success.clear();

            let transactions = match validate_drafts(&rows) {
                Ok(transactions) => transactions,
                Err(row_errors) => {
                    errors.set(row_errors);
                    general_error.set(Some(ValidationError::InvalidRows.to_string()));
                    return;
                }
            };

            saving.set(true);
            let api = api.clone();
            let rows = rows.clone();
            let errors = errors.clone();
            let saving = saving.clone();
            let general_error = general_error.clone();
            let success = success.clone();
            let on_saved = on_saved.clone();

            spawn_local(async move {
                match api.create_transactions(&transactions).await {
                    Ok(_) => {
                        Logger::info_with_component(
                            "multi-transaction-form",
                            &format!("Saved {} transaction(s)", transactions.len()),
                        );
                        success.show(format!("Successfully saved {} transaction(s)!", transactions.len()));
                        rows.set(vec![blank_row()]);
                        errors.set(vec![DraftErrors::default()]);
                        on_saved.emit(transactions.len());
                    }
                    Err(e) => {
                        Logger::warn_with_component("multi-transaction-form", &format!("Save failed: {}", e));
                        general_error.set(Some(format!("Failed to save transactions: {}", e.detail())));
                    }
                }
                saving.set(false);
            });
        })
    };

    let busy = *saving || *receipt_loading;
    let removable = rows.len() > 1;

    html! {
        <section class="multi-transaction-form">
            <ReceiptUploader
                api={props.api.clone()}
                disabled={busy}
                on_parsed={on_parsed}
                on_loading={on_receipt_loading}
            />
            {if *receipt_loading {
                html! { <div class="loading">{"Processing receipt..."}</div> }
            } else { html! {} }}

            <ErrorMessage message={(*general_error).clone()} />
            <SuccessMessage message={success.get()} />

            <form onsubmit={on_save}>
                {for rows.iter().enumerate().map(|(index, draft)| html! {
                    <TransactionRow
                        key={index}
                        index={index}
                        draft={draft.clone()}
                        errors={errors.get(index).cloned().unwrap_or_default()}
                        disabled={busy}
                        removable={removable}
                        on_change={on_change.clone()}
                        on_remove={on_remove.clone()}
                    />
                })}

                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_add_row} disabled={busy}>
                        {"+ Add Another Transaction"}
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={busy}>
                        {if *saving {
                            "Saving...".to_string()
                        } else {
                            format!("Save {} Transaction(s)", rows.len())
                        }}
                    </button>
                </div>
            </form>
        </section>
    }
}
