use super::messages::{ErrorMessage, SuccessMessage};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use gloo::timers::callback::Timeout;
use shared::{AuthService, ProfileUpdate, User};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProfileModalProps {
    pub is_open: bool,
    pub api: ApiClient,
    pub user: Option<User>,
    pub on_close: Callback<()>,
}

#[function_component(ProfileModal)]
pub fn profile_modal(props: &ProfileModalProps) -> Html {
    let form = use_state(ProfileUpdate::default);
    let saving = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let success_message = use_state(|| Option::<String>::None);

    // Reset the form from the current user whenever the modal opens
    use_effect_with((props.is_open, props.user.clone()), {
        let form = form.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        move |(is_open, user)| {
            if *is_open {
                form.set(user.as_ref().map(ProfileUpdate::from).unwrap_or_default());
                error_message.set(None);
                success_message.set(None);
            }
            || ()
        }
    });

    let on_field = |apply: fn(&mut ProfileUpdate, String)| {
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
            saving.set(true);
            error_message.set(None);
            success_message.set(None);

            let api = api.clone();
            let update = (*form).clone();
            let saving = saving.clone();
            let error_message = error_message.clone();
            let success_message = success_message.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                let delay = api.config().success_message_ms;
                match AuthService::new(api).update_profile(&update).await {
                    Ok(_) => {
                        Logger::info_with_component("profile-modal", "Profile updated");
                        success_message.set(Some("Profile updated successfully!".to_string()));
                        Timeout::new(delay, move || on_close.emit(())).forget();
                    }
                    Err(e) => {
                        Logger::warn_with_component("profile-modal", &format!("Profile update failed: {}", e));
                        error_message.set(Some(e.detail()));
                    }
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
                    <h3 class="modal-title">{"Edit Profile"}</h3>
                    <ErrorMessage message={(*error_message).clone()} />
                    <SuccessMessage message={(*success_message).clone()} />

                    <form class="modal-form" onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="profile-first-name">{"First Name"}</label>
                            <input
                                id="profile-first-name"
                                type="text"
                                value={form.first_name.clone()}
                                oninput={on_field(|f, v| f.first_name = v)}
                                disabled={*saving}
                                required=true
                            />
                        </div>
                        <div class="form-group">
                            <label for="profile-last-name">{"Last Name"}</label>
                            <input
                                id="profile-last-name"
                                type="text"
                                value={form.last_name.clone()}
                                oninput={on_field(|f, v| f.last_name = v)}
                                disabled={*saving}
                                required=true
                            />
                        </div>
                        <div class="form-group">
                            <label for="profile-email">{"Email"}</label>
                            <input
                                id="profile-email"
                                type="email"
                                value={form.email.clone()}
                                oninput={on_field(|f, v| f.email = v)}
                                disabled={*saving}
                                required=true
                            />
                        </div>

                        <div class="modal-buttons">
                            <button type="submit" class="btn btn-primary" disabled={*saving}>
                                {if *saving { "Saving..." } else { "Save Changes" }}
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
