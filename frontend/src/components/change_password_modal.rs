use super::messages::{ErrorMessage, SuccessMessage};
use crate::services::api::ApiClient;
use gloo::timers::callback::Timeout;
use shared::{AuthService, PasswordChange};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ChangePasswordModalProps {
    pub is_open: bool,
    pub api: ApiClient,
    pub on_close: Callback<()>,
}

#[function_component(ChangePasswordModal)]
pub fn change_password_modal(props: &ChangePasswordModalProps) -> Html {
    let form = use_state(PasswordChange::default);
    let saving = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let success_message = use_state(|| Option::<String>::None);

    use_effect_with(props.is_open, {
        let form = form.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        move |is_open| {
            if *is_open {
                form.set(PasswordChange::default());
                error_message.set(None);
                success_message.set(None);
            }
            || ()
        }
    });

    let on_field = |apply: fn(&mut PasswordChange, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            apply(&mut next, input.value());
            form.set(next);
        })
    };

    let on_submit = {
        let api = props.api.clone();
        let form = form.clone();
        let saving = saving.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error_message.set(None);
            success_message.set(None);
            saving.set(true);

            let api = api.clone();
            let change = (*form).clone();
            let saving = saving.clone();
            let error_message = error_message.clone();
            let success_message = success_message.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                let delay = api.config().success_message_ms;
                match AuthService::new(api).change_password(&change).await {
                    Ok(()) => {
                        success_message.set(Some("Password changed successfully!".to_string()));
                        Timeout::new(delay, move || on_close.emit(())).forget();
                    }
                    Err(e) => error_message.set(Some(e.detail())),
                }
                saving.set(false);
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
                    <h3 class="modal-title">{"Change Password"}</h3>
                    <ErrorMessage message={(*error_message).clone()} />
                    <SuccessMessage message={(*success_message).clone()} />

                    <form class="modal-form" onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="current-password">{"Current Password"}</label>
                            <input
                                id="current-password"
                                type="password"
                                value={form.current_password.clone()}
                                oninput={on_field(|f, v| f.current_password = v)}
                                disabled={*saving}
                                required=true
                            />
                        </div>
                        <div class="form-group">
                            <label for="new-password">{"New Password"}</label>
                            <input
                                id="new-password"
                                type="password"
                                value={form.new_password.clone()}
                                oninput={on_field(|f, v| f.new_password = v)}
                                disabled={*saving}
                                required=true
                            />
                        </div>
                        <div class="form-group">
                            <label for="confirm-password">{"Confirm New Password"}</label>
                            <input
                                id="confirm-password"
                                type="password"
                                value={form.re_new_password.clone()}
                                oninput={on_field(|f, v| f.re_new_password = v)}
                                disabled={*saving}
                                required=true
                            />
                        </div>

                        <div class="modal-buttons">
                            <button type="submit" class="btn btn-primary" disabled={*saving}>
                                {if *saving { "Changing..." } else { "Change Password" }}
                            </button>
                            <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*saving}>
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
