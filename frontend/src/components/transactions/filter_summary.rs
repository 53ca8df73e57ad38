use shared::QueryState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FilterSummaryProps {
    pub query: QueryState,
    pub on_clear: Callback<()>,
}

#[function_component(FilterSummary)]
pub fn filter_summary(props: &FilterSummaryProps) -> Html {
    if !props.query.has_active_filters() {
        return html! {};
    }

    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    html! {
        <div class="filter-summary">
            <span class="filter-summary-title">{"Active filters:"}</span>
            {for props.query.filter_labels().into_iter().map(|label| html! {
                <span class="filter-chip">{label}</span>
            })}
            <button type="button" class="btn btn-link" onclick={on_clear}>{"Clear all"}</button>
        </div>
    }
}
