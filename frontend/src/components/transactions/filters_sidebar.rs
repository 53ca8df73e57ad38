use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{Category, QueryState};
use std::str::FromStr;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FiltersSidebarProps {
    pub query: QueryState,
    pub error: Option<String>,
    pub on_category: Callback<Option<Category>>,
    pub on_date_range: Callback<(Option<NaiveDate>, Option<NaiveDate>)>,
    pub on_amount_range: Callback<(Option<Decimal>, Option<Decimal>)>,
    pub on_clear: Callback<()>,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Blank means unbounded; anything else must be a number
fn parse_bound(raw: &str) -> Result<Option<Decimal>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(raw).map(Some).map_err(|_| ())
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[function_component(FiltersSidebar)]
pub fn filters_sidebar(props: &FiltersSidebarProps) -> Html {
    let min_text = use_state(|| props.query.amount_min.map(|d| d.to_string()).unwrap_or_default());
    let max_text = use_state(|| props.query.amount_max.map(|d| d.to_string()).unwrap_or_default());
    let input_error = use_state(|| Option::<String>::None);

    // Clearing filters elsewhere empties the amount inputs too
    use_effect_with((props.query.amount_min, props.query.amount_max), {
        let min_text = min_text.clone();
        let max_text = max_text.clone();
        move |(min, max)| {
            if min.is_none() && max.is_none() {
                min_text.set(String::new());
                max_text.set(String::new());
            }
            || ()
        }
    });

    let on_category = {
        let on_category = props.on_category.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_category.emit(select.value().parse::<Category>().ok());
        })
    };

    let on_date_from = {
        let on_date_range = props.on_date_range.clone();
        let to = props.query.date_to;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_date_range.emit((parse_date(&input.value()), to));
        })
    };

    let on_date_to = {
        let on_date_range = props.on_date_range.clone();
        let from = props.query.date_from;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_date_range.emit((from, parse_date(&input.value())));
        })
    };

    let on_min = {
        let min_text = min_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            min_text.set(input.value());
        })
    };

    let on_max = {
        let max_text = max_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            max_text.set(input.value());
        })
    };

    // Bounds apply when an amount input loses focus or on Enter
    let apply_amounts = {
        let on_amount_range = props.on_amount_range.clone();
        let min_text = min_text.clone();
        let max_text = max_text.clone();
        let input_error = input_error.clone();
        Callback::from(move |_: Event| {
            match (parse_bound(&min_text), parse_bound(&max_text)) {
                (Ok(min), Ok(max)) => {
                    input_error.set(None);
                    on_amount_range.emit((min, max));
                }
                _ => input_error.set(Some("Enter a valid amount".to_string())),
            }
        })
    };

    let on_clear = {
        let on_clear = props.on_clear.clone();
        let input_error = input_error.clone();
        Callback::from(move |_: MouseEvent| {
            input_error.set(None);
            on_clear.emit(());
        })
    };

    let selected_category = props.query.category.map(|c| c.as_str()).unwrap_or("");
    let error = (*input_error).clone().or_else(|| props.error.clone());

    html! {
        <aside class="filters-sidebar">
            <h3>{"Filters"}</h3>

            <div class="form-group">
                <label for="filter-category">{"Category"}</label>
                <select id="filter-category" onchange={on_category}>
                    <option value="" selected={selected_category.is_empty()}>{"All Categories"}</option>
                    {for Category::ALL.iter().map(|category| html! {
                        <option value={category.as_str()} selected={category.as_str() == selected_category}>
                            {category.label()}
                        </option>
                    })}
                </select>
            </div>

            <div class="form-group">
                <label for="filter-date-from">{"From"}</label>
                <input id="filter-date-from" type="date" value={date_value(props.query.date_from)} onchange={on_date_from} />
            </div>
            <div class="form-group">
                <label for="filter-date-to">{"To"}</label>
                <input id="filter-date-to" type="date" value={date_value(props.query.date_to)} onchange={on_date_to} />
            </div>

            <div class="form-group">
                <label for="filter-amount-min">{"Min Amount (৳)"}</label>
                <input
                    id="filter-amount-min"
                    type="number"
                    min="0"
                    step="0.01"
                    value={(*min_text).clone()}
                    oninput={on_min}
                    onchange={apply_amounts.clone()}
                />
            </div>
            <div class="form-group">
                <label for="filter-amount-max">{"Max Amount (৳)"}</label>
                <input
                    id="filter-amount-max"
                    type="number"
                    min="0"
                    step="0.01"
                    value={(*max_text).clone()}
                    oninput={on_max}
                    onchange={apply_amounts}
                />
            </div>

            {if let Some(error) = error {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <button type="button" class="btn btn-secondary" onclick={on_clear}>{"Clear Filters"}</button>
        </aside>
    }
}
