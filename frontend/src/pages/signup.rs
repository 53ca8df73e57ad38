use crate::components::forms::SignupForm;
use crate::services::api::ApiClient;
use shared::Route;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SignupPageProps {
    pub api: ApiClient,
    pub on_navigate: Callback<Route>,
}

#[function_component(SignupPage)]
pub fn signup_page(props: &SignupPageProps) -> Html {
    let on_switch_to_login = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Route::Login))
    };

    html! {
        <div class="auth-page">
            <SignupForm api={props.api.clone()} on_switch_to_login={on_switch_to_login} />
        </div>
    }
}
