use super::change_password_modal::ChangePasswordModal;
use super::profile_modal::ProfileModal;
use crate::services::api::ApiClient;
use shared::{Route, User};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub current: Route,
    pub authenticated: bool,
    pub user: Option<User>,
    pub api: ApiClient,
    pub on_navigate: Callback<Route>,
    pub on_logout: Callback<()>,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    let menu_open = use_state(|| false);
    let show_profile = use_state(|| false);
    let show_password = use_state(|| false);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let open_modal = |flag: &UseStateHandle<bool>| {
        let flag = flag.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
            flag.set(true);
        })
    };
    let close_modal = |flag: &UseStateHandle<bool>| {
        let flag = flag.clone();
        Callback::from(move |_: ()| flag.set(false))
    };

    let on_logout = {
        let on_logout = props.on_logout.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
            on_logout.emit(());
        })
    };

    let links = Route::navigation(props.authenticated).iter().map(|route| {
        let route = *route;
        let on_navigate = props.on_navigate.clone();
        let class = if route == props.current { "nav-link active" } else { "nav-link" };
        html! {
            <a
                href={route.hash()}
                class={class}
                onclick={Callback::from(move |e: MouseEvent| {
                    e.prevent_default();
                    on_navigate.emit(route);
                })}
            >
                {route.title()}
            </a>
        }
    });

    html! {
        <header class="header">
            <div class="container">
                <h1 class="brand">{"AutoFinanceAI"}</h1>
                <nav class="nav-links">
                    {for links}
                </nav>
                {if let (true, Some(user)) = (props.authenticated, props.user.as_ref()) {
                    html! {
                        <div class="profile-dropdown">
                            <button type="button" class="profile-button" onclick={toggle_menu}>
                                {user.display_name()}
                            </button>
                            {if *menu_open {
                                html! {
                                    <>
                                        <div class="dropdown-backdrop" onclick={close_menu}></div>
                                        <div class="dropdown-menu">
                                            <div class="dropdown-header">
                                                <strong>{user.display_name()}</strong>
                                                <small>{&user.email}</small>
                                            </div>
                                            <button type="button" class="dropdown-item" onclick={open_modal(&show_profile)}>
                                                {"Edit Profile"}
                                            </button>
                                            <button type="button" class="dropdown-item" onclick={open_modal(&show_password)}>
                                                {"Change Password"}
                                            </button>
                                            <button type="button" class="dropdown-item danger" onclick={on_logout}>
                                                {"Logout"}
                                            </button>
                                        </div>
                                    </>
                                }
                            } else { html! {} }}
                        </div>
                    }
                } else { html! {} }}
            </div>

            <ProfileModal
                is_open={*show_profile}
                api={props.api.clone()}
                user={props.user.clone()}
                on_close={close_modal(&show_profile)}
            />
            <ChangePasswordModal
                is_open={*show_password}
                api={props.api.clone()}
                on_close={close_modal(&show_password)}
            />
        </header>
    }
}
