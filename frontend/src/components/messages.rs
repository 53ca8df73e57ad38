use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MessageProps {
    pub message: Option<String>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(ErrorMessage)]
pub fn error_message(props: &MessageProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };

    html! {
        <div class="form-message error" role="alert">
            <svg width="16" height="16" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">
                <path d="M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10s10-4.48 10-10S17.52 2 12 2zm1 15h-2v-2h2v2zm0-4h-2V7h2v6z" fill="currentColor"/>
            </svg>
            <span>{message}</span>
            {if let Some(on_dismiss) = props.on_dismiss.clone() {
                html! {
                    <button
                        type="button"
                        class="message-dismiss"
                        aria-label="Dismiss"
                        onclick={Callback::from(move |_: MouseEvent| on_dismiss.emit(()))}
                    >
                        {"×"}
                    </button>
                }
            } else { html! {} }}
        </div>
    }
}

#[function_component(SuccessMessage)]
pub fn success_message(props: &MessageProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };

    html! {
        <div class="form-message success">
            <svg width="16" height="16" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">
                <path d="M9 16.17L4.83 12l-1.42 1.41L9 19 21 7l-1.41-1.41z" fill="currentColor"/>
            </svg>
            <span>{message}</span>
        </div>
    }
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &LoadingSpinnerProps) -> Html {
    html! {
        <div class="loading">
            <svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" class="spinner">
                <circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4" fill="none" opacity="0.25"/>
                <path d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z" fill="currentColor"/>
            </svg>
            <span>{&props.label}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingSpinnerProps {
    #[prop_or_else(|| "Loading...".to_string())]
    pub label: String,
}
