use yew::prelude::*;

use shared::session::AuthState;

use crate::services::AppServices;

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub services: AppServices,
    pub children: Children,
}

/// Provides [`AuthState`] to everything below it and keeps it in sync with
/// the session hub until unmounted
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let state = use_state(AuthState::default);

    {
        let state = state.clone();
        let auth = props.services.auth.clone();
        let hub = props.services.hub.clone();
        use_effect_with((), move |_| {
            state.set(AuthState::ready(auth.current_session()));

            let setter = state.clone();
            let subscription = hub.subscribe(move |event| {
                setter.set(AuthState::ready(event.session().cloned()));
            });

            move || drop(subscription)
        });
    }

    html! {
        <ContextProvider<AuthState> context={(*state).clone()}>
            {props.children.clone()}
        </ContextProvider<AuthState>>
    }
}

/// Current auth state; `loading` until the provider has restored the session
#[hook]
pub fn use_auth() -> AuthState {
    use_context::<AuthState>().unwrap_or_default()
}
