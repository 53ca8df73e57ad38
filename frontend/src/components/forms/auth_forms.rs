use crate::components::messages::{ErrorMessage, SuccessMessage};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use gloo::timers::callback::Timeout;
use shared::{AuthService, Credentials, Registration};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub api: ApiClient,
    /// Shown above the form, e.g. after the session expired
    #[prop_or_default]
    pub notice: Option<String>,
    pub on_success: Callback<()>,
    pub on_switch_to_signup: Callback<()>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let credentials = use_state(Credentials::default);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let on_field = |apply: fn(&mut Credentials, String)| {
        let credentials = credentials.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*credentials).clone();
            apply(&mut next, input.value());
            credentials.set(next);
        })
    };

    let on_submit = {
        let api = props.api.clone();
        let credentials = credentials.clone();
        let loading = loading.clone();
        let error = error.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            loading.set(true);
            error.set(None);

            let api = api.clone();
            let credentials = (*credentials).clone();
            let loading = loading.clone();
            let error = error.clone();
            let on_success = on_success.clone();

            spawn_local(async move {
                match AuthService::new(api).login(&credentials).await {
                    Ok(_) => on_success.emit(()),
                    Err(e) => {
                        Logger::warn_with_component("login-form", &format!("Login failed: {}", e));
                        error.set(Some(e.detail()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_switch = {
        let on_switch = props.on_switch_to_signup.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_switch.emit(());
        })
    };

    html! {
        <div class="auth-card">
            <h2>{"Welcome Back"}</h2>
            <p class="auth-subtitle">{"Sign in to your AutoFinanceAI account"}</p>
            <form onsubmit={on_submit}>
                <ErrorMessage message={(*error).clone().or_else(|| props.notice.clone())} />
                <div class="form-group">
                    <label for="login-username">{"Username"}</label>
                    <input
                        id="login-username"
                        type="text"
                        placeholder="Enter your username"
                        value={credentials.username.clone()}
                        oninput={on_field(|c, v| c.username = v)}
                        disabled={*loading}
                        required=true
                    />
                </div>
                <div class="form-group">
                    <label for="login-password">{"Password"}</label>
                    <input
                        id="login-password"
                        type="password"
                        placeholder="Enter your password"
                        value={credentials.password.clone()}
                        oninput={on_field(|c, v| c.password = v)}
                        disabled={*loading}
                        required=true
                    />
                </div>
                <button type="submit" class="btn btn-primary btn-block" disabled={*loading}>
                    {if *loading { "Signing In..." } else { "Sign In" }}
                </button>
            </form>
            <div class="auth-footer">
                <p>{"Don't have an account? "}<a href="#signup" onclick={on_switch}>{"Sign up"}</a></p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SignupFormProps {
    pub api: ApiClient,
    pub on_switch_to_login: Callback<()>,
}

const REDIRECT_DELAY_MS: u32 = 2000;

#[function_component(SignupForm)]
pub fn signup_form(props: &SignupFormProps) -> Html {
    let registration = use_state(Registration::default);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let success = use_state(|| false);

    let on_field = |apply: fn(&mut Registration, String)| {
        let registration = registration.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*registration).clone();
            apply(&mut next, input.value());
            registration.set(next);
        })
    };

    let on_submit = {
        let api = props.api.clone();
        let registration = registration.clone();
        let loading = loading.clone();
        let error = error.clone();
        let success = success.clone();
        let on_switch_to_login = props.on_switch_to_login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            loading.set(true);
            error.set(None);
            success.set(false);

            let api = api.clone();
            let registration = (*registration).clone();
            let loading = loading.clone();
            let error = error.clone();
            let success = success.clone();
            let on_switch_to_login = on_switch_to_login.clone();

            spawn_local(async move {
                match AuthService::new(api).register(&registration).await {
                    Ok(_) => {
                        success.set(true);
                        Timeout::new(REDIRECT_DELAY_MS, move || on_switch_to_login.emit(())).forget();
                    }
                    Err(e) => error.set(Some(e.detail())),
                }
                loading.set(false);
            });
        })
    };

    let on_switch = {
        let on_switch = props.on_switch_to_login.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_switch.emit(());
        })
    };

    let field = |id: &'static str, label: &'static str, kind: &'static str, value: &str, oninput: Callback<InputEvent>| {
        html! {
            <div class="form-group">
                <label for={id}>{label}</label>
                <input
                    id={id}
                    type={kind}
                    value={value.to_string()}
                    oninput={oninput}
                    disabled={*loading}
                    required=true
                />
            </div>
        }
    };

    html! {
        <div class="auth-card">
            <h2>{"Join AutoFinanceAI"}</h2>
            <p class="auth-subtitle">{"Create your account to get started"}</p>
            <form onsubmit={on_submit}>
                <ErrorMessage message={(*error).clone()} />
                <SuccessMessage message={success.then(|| "Account created successfully! Redirecting to login...".to_string())} />
                {field("signup-username", "Username", "text", &registration.username, on_field(|r, v| r.username = v))}
                {field("signup-first-name", "First Name", "text", &registration.first_name, on_field(|r, v| r.first_name = v))}
                {field("signup-last-name", "Last Name", "text", &registration.last_name, on_field(|r, v| r.last_name = v))}
                {field("signup-email", "Email Address", "email", &registration.email, on_field(|r, v| r.email = v))}
                {field("signup-password", "Password", "password", &registration.password, on_field(|r, v| r.password = v))}
                <button type="submit" class="btn btn-primary btn-block" disabled={*loading}>
                    {if *loading { "Creating Account..." } else { "Sign Up" }}
                </button>
            </form>
            <div class="auth-footer">
                <p>{"Already have an account? "}<a href="#login" onclick={on_switch}>{"Sign in"}</a></p>
            </div>
        </div>
    }
}
