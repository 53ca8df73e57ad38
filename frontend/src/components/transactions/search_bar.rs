use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
    /// Live buffer, not yet applied
    pub value: String,
    pub on_input: Callback<String>,
    /// Enter applies the buffer as the search term
    pub on_commit: Callback<()>,
}

#[function_component(SearchBar)]
pub fn search_bar(props: &SearchBarProps) -> Html {
    let on_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    let on_keydown = {
        let on_commit = props.on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                on_commit.emit(());
            }
        })
    };

    html! {
        <div class="search-bar">
            <input
                type="search"
                placeholder="Search transactions... (press Enter)"
                value={props.value.clone()}
                oninput={on_input}
                onkeydown={on_keydown}
            />
        </div>
    }
}
