use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_auth;
use crate::services::{encode_component, AppServices, Logger};

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub services: AppServices,
}

#[derive(Clone, PartialEq)]
enum EmbedState {
    Loading,
    Ready(String),
    Failed(String),
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let auth = use_auth();
    let embed = use_state(|| EmbedState::Loading);

    {
        let embed = embed.clone();
        let dashboard = props.services.dashboard.clone();
        let user_id = auth.session.as_ref().map(|s| s.user.id.clone());

        use_effect_with(user_id, move |user_id| {
            if user_id.is_some() {
                embed.set(EmbedState::Loading);
                spawn_local(async move {
                    let now_ms = js_sys::Date::now() as i64;
                    match dashboard.embed_url(now_ms, encode_component).await {
                        Ok(url) => embed.set(EmbedState::Ready(url)),
                        Err(e) => {
                            Logger::error_with_component("dashboard", &format!("Could not fetch client_id: {}", e));
                            embed.set(EmbedState::Failed(e.user_message()));
                        }
                    }
                });
            }
            || ()
        });
    }

    if auth.loading {
        return html! { <div>{"Loading..."}</div> };
    }
    if !auth.is_signed_in() {
        return html! { <div>{"Please log in to see your dashboard."}</div> };
    }

    html! {
        <div style="height: 100vh">
            {match &*embed {
                EmbedState::Ready(src) => html! {
                    <iframe
                        src={src.clone()}
                        title="Recoverly Dashboard"
                        style="width: 100%; height: 100%; border: 0"
                        allow="fullscreen"
                    />
                },
                EmbedState::Loading => html! { <div>{"Loading dashboard..."}</div> },
                EmbedState::Failed(message) => html! {
                    <div class="bg-red-100 text-red-700 px-4 py-2 rounded">{message}</div>
                },
            }}
        </div>
    }
}
