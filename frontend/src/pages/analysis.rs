use crate::components::{ErrorMessage, LoadingSpinner};
use crate::services::api::ApiClient;
use crate::services::date_utils::today;
use crate::services::logging::Logger;
use chrono::Datelike;
use shared::format::{format_period, month_name, recent_years};
use shared::FinancialAnalysis;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AnalysisPageProps {
    pub api: ApiClient,
}

fn score_class(score: i32) -> &'static str {
    match score {
        80.. => "score excellent",
        60..=79 => "score good",
        40..=59 => "score fair",
        _ => "score poor",
    }
}

fn bullet_section(title: &str, class: &'static str, items: &[String]) -> Html {
    if items.is_empty() {
        return html! {};
    }
    html! {
        <section class={classes!("analysis-section", class)}>
            <h3>{title}</h3>
            <ul>
                {for items.iter().map(|item| html! { <li>{item}</li> })}
            </ul>
        </section>
    }
}

fn render_analysis(analysis: &FinancialAnalysis) -> Html {
    html! {
        <div class="analysis-result">
            {if let Some(score) = &analysis.financial_score {
                html! {
                    <div class={score_class(score.score)}>
                        <span class="score-value">{score.score}</span>
                        <span class="score-status">{&score.status}</span>
                    </div>
                }
            } else { html! {} }}
            {if let Some(overview) = &analysis.overview {
                html! {
                    <section class="analysis-section overview">
                        <h3>{"Overview"}</h3>
                        <p>{overview}</p>
                    </section>
                }
            } else { html! {} }}
            {bullet_section("Quick Tips", "tips", &analysis.quick_tips)}
            {bullet_section("Warnings", "warnings", &analysis.warnings)}
            {bullet_section("Good Habits", "habits", &analysis.good_habits)}
            {if let Some(raw) = &analysis.analysis {
                html! {
                    <section class="analysis-section raw">
                        <pre>{raw}</pre>
                    </section>
                }
            } else { html! {} }}
        </div>
    }
}

#[function_component(AnalysisPage)]
pub fn analysis_page(props: &AnalysisPageProps) -> Html {
    let now = today();
    let year = use_state(|| now.year());
    let month = use_state(|| now.month());
    let analysis = use_state(|| Option::<FinancialAnalysis>::None);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let on_year = {
        let year = year.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(value) = select.value().parse() {
                year.set(value);
            }
        })
    };
    let on_month = {
        let month = month.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(value) = select.value().parse() {
                month.set(value);
            }
        })
    };

    let on_analyze = {
        let api = props.api.clone();
        let year = year.clone();
        let month = month.clone();
        let analysis = analysis.clone();
        let loading = loading.clone();
        let error = error.clone();

        Callback::from(move |_: MouseEvent| {
            let (selected_year, selected_month) = (*year, *month);
            let api = api.clone();
            let analysis = analysis.clone();
            let loading = loading.clone();
            let error = error.clone();

            loading.set(true);
            error.set(None);
            analysis.set(None);
            spawn_local(async move {
                match api.analysis(selected_year, selected_month).await {
                    Ok(result) if result.is_failure() => {
                        error.set(result.error.clone());
                    }
                    Ok(result) => analysis.set(Some(result)),
                    Err(e) => {
                        Logger::warn_with_component("analysis", &format!("Analysis failed: {}", e));
                        error.set(Some(format!("Failed to analyze transactions: {}", e.detail())));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="analysis-page">
            <h1>{"Monthly Analysis"}</h1>
            <div class="analysis-controls">
                <select onchange={on_month} disabled={*loading}>
                    {for (1..=12u32).map(|m| html! {
                        <option value={m.to_string()} selected={m == *month}>{month_name(m)}</option>
                    })}
                </select>
                <select onchange={on_year} disabled={*loading}>
                    {for recent_years(now.year(), 10).into_iter().map(|y| html! {
                        <option value={y.to_string()} selected={y == *year}>{y}</option>
                    })}
                </select>
                <button class="btn btn-primary" onclick={on_analyze} disabled={*loading}>
                    {if *loading { "Analyzing..." } else { "Analyze" }}
                </button>
            </div>

            <ErrorMessage message={(*error).clone()} />

            {if *loading {
                html! { <LoadingSpinner label={format!("Analyzing {}...", format_period(*year, *month))} /> }
            } else if let Some(result) = &*analysis {
                html! {
                    <>
                        <h2>{format_period(*year, *month)}</h2>
                        {render_analysis(result)}
                    </>
                }
            } else { html! {} }}
        </div>
    }
}
