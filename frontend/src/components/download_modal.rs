use super::messages::ErrorMessage;
use crate::hooks::use_transient;
use crate::services::api::ApiClient;
use crate::services::date_utils::today;
use crate::services::download::save_pdf;
use crate::services::logging::Logger;
use chrono::Datelike;
use shared::format::{month_name, recent_years};
use shared::validation::ReportRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DownloadModalProps {
    pub is_open: bool,
    pub api: ApiClient,
    pub on_close: Callback<()>,
}

/// Monthly PDF report export
#[function_component(DownloadModal)]
pub fn download_modal(props: &DownloadModalProps) -> Html {
    let request = use_state(|| ReportRequest::for_month_of(today()));
    let is_downloading = use_state(|| false);
    let error_message = use_transient(props.api.config().transient_message_ms);

    use_effect_with(props.is_open, {
        let request = request.clone();
        let error_message = error_message.clone();
        move |is_open| {
            if *is_open {
                request.set(ReportRequest::for_month_of(today()));
                error_message.clear();
            }
            || ()
        }
    });

    let on_filename = {
        let request = request.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            request.set(ReportRequest {
                filename: input.value(),
                ..(*request).clone()
            });
        })
    };

    let on_year = {
        let request = request.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(year) = select.value().parse() {
                request.set(ReportRequest {
                    year,
                    ..(*request).clone()
                });
            }
        })
    };

    let on_month = {
        let request = request.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(month) = select.value().parse() {
                request.set(ReportRequest {
                    month,
                    ..(*request).clone()
                });
            }
        })
    };

    let on_download = {
        let api = props.api.clone();
        let request = request.clone();
        let is_downloading = is_downloading.clone();
        let error_message = error_message.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let report = (*request).clone();
            if let Err(e) = report.validate() {
                error_message.show(e.to_string());
                return;
            }

            is_downloading.set(true);
            error_message.clear();

            let api = api.clone();
            let is_downloading = is_downloading.clone();
            let error_message = error_message.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                Logger::debug_with_component(
                    "download-modal",
                    &format!("Requesting report for {}-{:02}", report.year, report.month),
                );
                match api.download_report(report.year, report.month).await {
                    Ok(bytes) => match save_pdf(&bytes, &report.output_filename()) {
                        Ok(()) => on_close.emit(()),
                        Err(e) => error_message.show(e.to_string()),
                    },
                    Err(e) => {
                        Logger::warn_with_component("download-modal", &format!("Download failed: {}", e));
                        error_message.show(e.detail());
                    }
                }
                is_downloading.set(false);
            });
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

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">
                        <svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">
                            <path d="M14 2H6c-1.1 0-1.99.9-1.99 2L4 20c0 1.1.89 2 2 2h10c1.1 0 2-.9 2-2V8l-6-6zm4 18H6V4h7v5h5v11z" fill="currentColor"/>
                        </svg>
                        {" Download Monthly Transcript"}
                    </h3>

                    <ErrorMessage message={error_message.get()} />

                    <form class="modal-form" onsubmit={on_download}>
                        <div class="form-group">
                            <label for="report-filename">{"Filename:"}</label>
                            <input
                                id="report-filename"
                                type="text"
                                placeholder="Enter filename (without extension)"
                                value={request.filename.clone()}
                                oninput={on_filename}
                                disabled={*is_downloading}
                            />
                        </div>

                        <div class="form-row">
                            <div class="form-group">
                                <label for="report-year">{"Year:"}</label>
                                <select id="report-year" onchange={on_year} disabled={*is_downloading}>
                                    {for recent_years(today().year(), 10).into_iter().map(|year| html! {
                                        <option value={year.to_string()} selected={year == request.year}>{year}</option>
                                    })}
                                </select>
                            </div>
                            <div class="form-group">
                                <label for="report-month">{"Month:"}</label>
                                <select id="report-month" onchange={on_month} disabled={*is_downloading}>
                                    {for (1..=12u32).map(|month| html! {
                                        <option value={month.to_string()} selected={month == request.month}>
                                            {month_name(month)}
                                        </option>
                                    })}
                                </select>
                            </div>
                        </div>

                        <div class="modal-buttons">
                            <button type="submit" class="btn btn-primary" disabled={*is_downloading}>
                                {if *is_downloading { "Downloading..." } else { "Download PDF" }}
                            </button>
                            <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_downloading}>
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
