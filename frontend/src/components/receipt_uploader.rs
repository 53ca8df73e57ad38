use super::messages::ErrorMessage;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use gloo::file::futures::read_as_bytes;
use gloo::file::File;
use shared::validation::validate_receipt;
use shared::{ReceiptLine, ReceiptUpload};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReceiptUploaderProps {
    pub api: ApiClient,
    pub disabled: bool,
    pub on_parsed: Callback<Vec<ReceiptLine>>,
    pub on_loading: Callback<bool>,
}

#[function_component(ReceiptUploader)]
pub fn receipt_uploader(props: &ReceiptUploaderProps) -> Html {
    let error = use_state(|| Option::<String>::None);
    let file_input = use_node_ref();

    let on_file = {
        let api = props.api.clone();
        let error = error.clone();
        let on_parsed = props.on_parsed.clone();
        let on_loading = props.on_loading.clone();

        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(selected) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // allow re-selecting the same file
            input.set_value("");

            let file = File::from(selected);
            let max_bytes = api.config().max_receipt_bytes;
            if let Err(e) = validate_receipt(&file.raw_mime_type(), file.size() as usize, max_bytes) {
                error.set(Some(e.to_string()));
                return;
            }

            error.set(None);
            on_loading.emit(true);
            let api = api.clone();
            let error = error.clone();
            let on_parsed = on_parsed.clone();
            let on_loading = on_loading.clone();

            spawn_local(async move {
                let upload = match read_as_bytes(&file).await {
                    Ok(bytes) => ReceiptUpload {
                        file_name: file.name(),
                        content_type: file.raw_mime_type(),
                        bytes,
                    },
                    Err(e) => {
                        error.set(Some(format!("Failed to read file: {}", e)));
                        on_loading.emit(false);
                        return;
                    }
                };

                match api.parse_receipt(&upload).await {
                    Ok(lines) => {
                        Logger::info_with_component(
                            "receipt-uploader",
                            &format!("Parsed {} transaction(s) from {}", lines.len(), upload.file_name),
                        );
                        on_parsed.emit(lines);
                    }
                    Err(e) => {
                        Logger::warn_with_component("receipt-uploader", &format!("Receipt parsing failed: {}", e));
                        error.set(Some(e.detail()));
                    }
                }
                on_loading.emit(false);
            });
        })
    };

    let open_picker = {
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    html! {
        <div class="receipt-uploader">
            <input
                ref={file_input}
                type="file"
                accept="image/*"
                class="hidden"
                onchange={on_file}
                disabled={props.disabled}
            />
            <button type="button" class="btn btn-receipt" onclick={open_picker} disabled={props.disabled}>
                {"📄 Add Receipt"}
            </button>
            <ErrorMessage message={(*error).clone()} />
            <p class="form-text">{"Upload a receipt image to automatically extract transactions"}</p>
        </div>
    }
}
