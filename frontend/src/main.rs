mod components;
mod hooks;
mod pages;
mod services;

use anyhow::Context;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::config::{AppConfig, DASHBOARD_EMBED_URL, SUPABASE_ANON_KEY, SUPABASE_URL};

use components::{Header, LoginModal, Page, Sidebar};
use hooks::{use_auth, AuthProvider};
use pages::{Account, Dashboard, Home, Settings};
use services::{AppServices, ConsoleLogger, Logger, SessionStore};

/// Values baked in by `trunk build` from the build environment
fn build_env(key: &str) -> Option<String> {
    match key {
        SUPABASE_URL => option_env!("SUPABASE_URL"),
        SUPABASE_ANON_KEY => option_env!("SUPABASE_ANON_KEY"),
        DASHBOARD_EMBED_URL => option_env!("DASHBOARD_EMBED_URL"),
        _ => None,
    }
    .map(str::to_string)
}

fn load_config() -> anyhow::Result<AppConfig> {
    AppConfig::from_lookup(build_env)
        .context("Set SUPABASE_URL and SUPABASE_ANON_KEY when building the app")
}

#[derive(Properties, PartialEq)]
struct AppProps {
    services: AppServices,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let auth = use_auth();
    let active_page = use_state(Page::default);
    let show_login = use_state(|| false);

    let on_navigate = {
        let active_page = active_page.clone();
        let show_login = show_login.clone();
        let signed_in = auth.is_signed_in();
        Callback::from(move |page: Page| match page.resolve(signed_in) {
            Some(page) => active_page.set(page),
            None => {
                Logger::debug_with_component("app", &format!("{} needs a login", page.label()));
                show_login.set(true);
            }
        })
    };

    let on_login = {
        let show_login = show_login.clone();
        Callback::from(move |_: ()| show_login.set(true))
    };

    let on_logout = {
        let auth_service = props.services.auth.clone();
        let active_page = active_page.clone();
        Callback::from(move |_: ()| {
            let auth_service = auth_service.clone();
            let active_page = active_page.clone();
            spawn_local(async move {
                auth_service.sign_out().await;
                active_page.set(Page::Home);
            });
        })
    };

    let close_login = {
        let show_login = show_login.clone();
        let active_page = active_page.clone();
        Callback::from(move |_: ()| {
            show_login.set(false);
            active_page.set(Page::Home);
        })
    };

    if auth.loading {
        return html! {
            <div class="flex items-center justify-center min-h-screen bg-[#f1f5f9]">
                <p class="text-gray-600 text-lg">{"Loading..."}</p>
            </div>
        };
    }

    let services = props.services.clone();
    let content = match *active_page {
        Page::Home => html! { <Home services={services} /> },
        Page::Dashboard => html! { <Dashboard services={services} /> },
        Page::Settings => html! { <Settings services={services} /> },
        Page::Account => html! { <Account services={services} /> },
    };

    html! {
        <div class="font-sans antialiased bg-[#f1f5f9] min-h-screen flex text-gray-900">
            <Sidebar active={*active_page} on_navigate={on_navigate} />
            <main class="flex-1 p-8 overflow-y-auto transition-all duration-300 ease-in-out">
                <Header on_login={on_login} on_logout={on_logout} />
                {content}
            </main>

            if *show_login {
                <LoginModal
                    services={props.services.clone()}
                    on_close={close_login.clone()}
                    on_signed_in={close_login}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct RootProps {
    services: AppServices,
}

/// Owns the session persistence subscription for the lifetime of the app
#[function_component(Root)]
fn root(props: &RootProps) -> Html {
    {
        let hub = props.services.hub.clone();
        use_effect_with((), move |_| {
            let subscription = SessionStore::attach(&hub);
            move || drop(subscription)
        });
    }

    html! {
        <AuthProvider services={props.services.clone()}>
            <App services={props.services.clone()} />
        </AuthProvider>
    }
}

#[derive(Properties, PartialEq)]
struct FatalProps {
    message: String,
}

#[function_component(ConfigurationError)]
fn configuration_error(props: &FatalProps) -> Html {
    html! {
        <div class="flex items-center justify-center min-h-screen bg-[#f1f5f9]">
            <div class="p-6 bg-white rounded-xl shadow-md max-w-lg">
                <h2 class="text-2xl font-semibold text-red-700 mb-2">{"Configuration error"}</h2>
                <p class="text-gray-700">{&props.message}</p>
            </div>
        </div>
    }
}

fn main() {
    ConsoleLogger::init();

    match load_config() {
        Ok(config) => {
            Logger::info_with_component("main", &format!("Starting with backend {}", config.supabase_url));
            let services = AppServices::new(&config, SessionStore::restore());
            yew::Renderer::<Root>::with_props(RootProps { services }).render();
        }
        Err(e) => {
            Logger::error_with_component("main", &format!("{:#}", e));
            yew::Renderer::<ConfigurationError>::with_props(FatalProps {
                message: format!("{:#}", e),
            })
            .render();
        }
    }
}
