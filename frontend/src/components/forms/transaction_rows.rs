use shared::validation::{DraftErrors, TransactionDraft};
use shared::Category;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionRowProps {
    pub index: usize,
    pub draft: TransactionDraft,
    pub errors: DraftErrors,
    pub disabled: bool,
    pub removable: bool,
    /// (row, field, value); checkboxes send "true"/"false"
    pub on_change: Callback<(usize, &'static str, String)>,
    pub on_remove: Callback<usize>,
}

fn field_class(error: &Option<String>) -> &'static str {
    if error.is_some() {
        "row-input invalid"
    } else {
        "row-input"
    }
}

#[function_component(TransactionRow)]
pub fn transaction_row(props: &TransactionRowProps) -> Html {
    let index = props.index;
    let text_field = |field: &'static str| {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((index, field, input.value()));
        })
    };

    let on_category = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit((index, "category", select.value()));
        })
    };

    let on_recurring = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((index, "is_recurring", input.checked().to_string()));
        })
    };

    let on_remove = {
        let on_remove = props.on_remove.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(index))
    };

    let draft = &props.draft;
    let errors = &props.errors;

    html! {
        <div class="transaction-row">
            <div class="row-fields">
                <input
                    type="date"
                    class={field_class(&errors.date)}
                    value={draft.date.clone()}
                    oninput={text_field("date")}
                    disabled={props.disabled}
                />
                <select class={field_class(&errors.category)} onchange={on_category} disabled={props.disabled}>
                    <option value="" selected={draft.category.is_empty()}>{"Select Category"}</option>
                    {for Category::ALL.iter().map(|category| html! {
                        <option value={category.as_str()} selected={category.as_str() == draft.category}>
                            {category.label()}
                        </option>
                    })}
                </select>
                <input
                    type="text"
                    class={field_class(&errors.description)}
                    placeholder="Description"
                    value={draft.description.clone()}
                    oninput={text_field("description")}
                    disabled={props.disabled}
                />
                <input
                    type="number"
                    class={field_class(&errors.amount)}
                    placeholder="Amount"
                    step="0.01"
                    min="0.01"
                    value={draft.amount.clone()}
                    oninput={text_field("amount")}
                    disabled={props.disabled}
                />
                <label class="checkbox-label">
                    <input type="checkbox" checked={draft.is_recurring} onchange={on_recurring} disabled={props.disabled} />
                    {"Recurring"}
                </label>
                {if props.removable {
                    html! {
                        <button type="button" class="btn btn-remove" onclick={on_remove} disabled={props.disabled} aria-label="Remove row">
                            {"✕"}
                        </button>
                    }
                } else { html! {} }}
            </div>
            <div class="row-errors">
                {for [&errors.date, &errors.category, &errors.description, &errors.amount]
                    .into_iter()
                    .flatten()
                    .map(|message| html! { <span class="field-error">{message}</span> })}
            </div>
        </div>
    }
}
