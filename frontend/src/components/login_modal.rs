use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::{AppServices, Logger};

use super::bind_input;

#[derive(Properties, PartialEq)]
pub struct LoginModalProps {
    pub services: AppServices,
    pub on_close: Callback<()>,
    pub on_signed_in: Callback<()>,
}

#[function_component(LoginModal)]
pub fn login_modal(props: &LoginModalProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let loading = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let auth = props.services.auth.clone();
        let on_signed_in = props.on_signed_in.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            error.set(None);
            loading.set(true);

            let email_value = (*email).clone();
            let password_value = (*password).clone();
            let auth = auth.clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_signed_in = on_signed_in.clone();

            spawn_local(async move {
                match auth.sign_in(&email_value, &password_value).await {
                    Ok(_) => {
                        loading.set(false);
                        on_signed_in.emit(());
                    }
                    Err(e) => {
                        Logger::warn_with_component("login-modal", &format!("Sign in failed: {}", e));
                        error.set(Some(e.user_message()));
                        loading.set(false);
                    }
                }
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

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="fixed inset-0 flex items-center justify-center z-50 bg-black bg-opacity-50 p-4" onclick={on_backdrop_click}>
            <div class="bg-white p-8 rounded-xl shadow-2xl w-full max-w-md relative" onclick={on_modal_click}>
                <button
                    type="button"
                    onclick={on_close_click}
                    class="absolute top-4 right-4 text-gray-500 hover:text-gray-700 text-2xl font-bold"
                >
                    {"×"}
                </button>

                <h2 class="text-2xl font-bold mb-6 text-center">{"Login"}</h2>

                {if let Some(message) = error.as_ref() {
                    html! { <div class="bg-red-100 text-red-700 px-4 py-2 mb-4 rounded">{message}</div> }
                } else { html! {} }}

                <form onsubmit={on_submit}>
                    <div class="mb-4">
                        <label class="block text-gray-700 mb-2" for="email">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            value={(*email).clone()}
                            oninput={bind_input(&email)}
                            class="w-full px-3 py-2 border rounded-lg focus:outline-none focus:border-blue-500"
                            placeholder="Enter your email"
                            disabled={*loading}
                        />
                    </div>

                    <div class="mb-6">
                        <label class="block text-gray-700 mb-2" for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            value={(*password).clone()}
                            oninput={bind_input(&password)}
                            class="w-full px-3 py-2 border rounded-lg focus:outline-none focus:border-blue-500"
                            placeholder="Enter your password"
                            disabled={*loading}
                        />
                    </div>

                    <button
                        type="submit"
                        disabled={*loading}
                        class="w-full bg-blue-600 text-white py-2 px-4 rounded-lg hover:bg-blue-700 transition-colors disabled:bg-blue-400"
                    >
                        {if *loading { "Logging In..." } else { "Log In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
