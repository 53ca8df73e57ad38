use crate::components::forms::LoginForm;
use crate::services::api::ApiClient;
use shared::{Route, SessionEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub api: ApiClient,
    pub last_event: Option<SessionEvent>,
    pub on_navigate: Callback<Route>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let notice = (props.last_event == Some(SessionEvent::Expired))
        .then(|| "Your session has expired. Please sign in again.".to_string());

    let on_success = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Route::Home))
    };
    let on_switch_to_signup = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Route::Signup))
    };

    html! {
        <div class="auth-page">
            <LoginForm
                api={props.api.clone()}
                notice={notice}
                on_success={on_success}
                on_switch_to_signup={on_switch_to_signup}
            />
        </div>
    }
}
