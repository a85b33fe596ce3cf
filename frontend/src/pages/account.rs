use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::domain::account_service::{EMAIL_CONFIRMATION_SENT, PASSWORD_UPDATED, PROFILE_UPDATED};
use shared::models::ClientId;

use crate::components::bind_input;
use crate::hooks::use_auth;
use crate::services::{AppServices, Logger};

#[derive(Properties, PartialEq)]
pub struct AccountProps {
    pub services: AppServices,
}

const INPUT_CLASS: &str = "mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-blue-500 focus:ring-blue-500 sm:text-sm p-2";

fn success_banner(message: &Option<String>) -> Html {
    match message {
        Some(text) => html! { <div class="bg-green-100 text-green-700 px-4 py-2 mb-4 rounded">{text}</div> },
        None => html! {},
    }
}

fn error_banner(message: &Option<String>) -> Html {
    match message {
        Some(text) => html! { <div class="bg-red-100 text-red-700 px-4 py-2 mb-4 rounded">{text}</div> },
        None => html! {},
    }
}

/// Outcome of loading or saving the business profile
#[derive(Clone, PartialEq, Debug)]
enum ProfileStatus {
    Idle,
    Saved,
    LoadFailed(String),
    SaveFailed(String),
}

impl ProfileStatus {
    /// Only a failed load is fixed by fetching the profile again
    fn offers_retry(&self) -> bool {
        matches!(self, ProfileStatus::LoadFailed(_))
    }

    fn error(&self) -> Option<&str> {
        match self {
            ProfileStatus::LoadFailed(message) | ProfileStatus::SaveFailed(message) => Some(message),
            ProfileStatus::Idle | ProfileStatus::Saved => None,
        }
    }
}

fn profile_banner(status: &ProfileStatus, on_retry: Callback<MouseEvent>) -> Html {
    if *status == ProfileStatus::Saved {
        return success_banner(&Some(PROFILE_UPDATED.to_string()));
    }
    let Some(text) = status.error() else {
        return html! {};
    };
    html! {
        <div class="bg-red-100 text-red-700 px-4 py-2 mb-4 rounded">
            <div class="flex items-start justify-between">
                <span>{text.to_string()}</span>
                if status.offers_retry() {
                    <button onclick={on_retry} class="ml-4 text-sm text-blue-700 underline" title="Retry">
                        {"Retry"}
                    </button>
                }
            </div>
        </div>
    }
}

#[function_component(Account)]
pub fn account(props: &AccountProps) -> Html {
    let auth = use_auth();

    let loading = use_state(|| true);
    let reload_count = use_state(|| 0u32);
    let client_id = use_state(|| Option::<ClientId>::None);
    let business_name = use_state(String::new);
    let saving = use_state(|| false);
    let profile_status = use_state(|| ProfileStatus::Idle);

    let new_email = use_state(String::new);
    let email_message = use_state(|| Option::<String>::None);
    let email_error = use_state(|| Option::<String>::None);

    let new_password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let password_message = use_state(|| Option::<String>::None);
    let password_error = use_state(|| Option::<String>::None);

    {
        let loading = loading.clone();
        let client_id = client_id.clone();
        let business_name = business_name.clone();
        let profile_status = profile_status.clone();
        let service = props.services.account.clone();
        let user_id = auth.session.as_ref().map(|s| s.user.id.clone());

        use_effect_with((user_id, *reload_count), move |(user_id, _)| {
            if user_id.is_none() {
                loading.set(false);
            } else {
                loading.set(true);
                profile_status.set(ProfileStatus::Idle);
                spawn_local(async move {
                    match service.load().await {
                        Ok(profile) => {
                            client_id.set(Some(profile.client_id));
                            business_name.set(profile.business_name);
                        }
                        Err(e) => {
                            client_id.set(None);
                            profile_status.set(ProfileStatus::LoadFailed(e.to_string()));
                        }
                    }
                    loading.set(false);
                });
            }
            || ()
        });
    }

    let on_retry = {
        let reload_count = reload_count.clone();
        Callback::from(move |_: MouseEvent| reload_count.set(*reload_count + 1))
    };

    let on_update_profile = {
        let service = props.services.account.clone();
        let client_id = client_id.clone();
        let business_name = business_name.clone();
        let saving = saving.clone();
        let profile_status = profile_status.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(id) = (*client_id).clone() else {
                return;
            };
            if *saving {
                return;
            }
            saving.set(true);
            profile_status.set(ProfileStatus::Idle);

            let service = service.clone();
            let name = (*business_name).clone();
            let business_name = business_name.clone();
            let saving = saving.clone();
            let profile_status = profile_status.clone();

            spawn_local(async move {
                match service.update_business_name(&id, &name).await {
                    Ok(stored) => {
                        business_name.set(stored);
                        profile_status.set(ProfileStatus::Saved);
                    }
                    Err(e) => {
                        Logger::error_with_component("account", &format!("Error updating profile: {}", e));
                        profile_status.set(ProfileStatus::SaveFailed(e.user_message()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_change_email = {
        let service = props.services.account.clone();
        let new_email = new_email.clone();
        let email_message = email_message.clone();
        let email_error = email_error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            email_message.set(None);
            email_error.set(None);

            let service = service.clone();
            let email = (*new_email).clone();
            let new_email = new_email.clone();
            let email_message = email_message.clone();
            let email_error = email_error.clone();

            spawn_local(async move {
                match service.change_email(&email).await {
                    Ok(()) => {
                        email_message.set(Some(EMAIL_CONFIRMATION_SENT.to_string()));
                        new_email.set(String::new());
                    }
                    Err(e) => {
                        let message = e.user_message();
                        email_error.set(Some(if message.is_empty() {
                            "Error changing email. Please try again.".to_string()
                        } else {
                            message
                        }));
                    }
                }
            });
        })
    };

    let on_change_password = {
        let service = props.services.account.clone();
        let new_password = new_password.clone();
        let confirm_password = confirm_password.clone();
        let password_message = password_message.clone();
        let password_error = password_error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            password_message.set(None);
            password_error.set(None);

            let service = service.clone();
            let password = (*new_password).clone();
            let confirmation = (*confirm_password).clone();
            let new_password = new_password.clone();
            let confirm_password = confirm_password.clone();
            let password_message = password_message.clone();
            let password_error = password_error.clone();

            spawn_local(async move {
                match service.change_password(&password, &confirmation).await {
                    Ok(()) => {
                        password_message.set(Some(PASSWORD_UPDATED.to_string()));
                        new_password.set(String::new());
                        confirm_password.set(String::new());
                    }
                    Err(e) => {
                        let message = e.user_message();
                        password_error.set(Some(if message.is_empty() {
                            "Error changing password. Please try again.".to_string()
                        } else {
                            message
                        }));
                    }
                }
            });
        })
    };

    if *loading {
        return html! { <p class="p-6 text-center">{"Loading your account..."}</p> };
    }

    let Some(session) = auth.session.as_ref() else {
        return html! {
            <div class="p-6 bg-white rounded-xl shadow-md">
                <h2 class="text-2xl font-semibold text-gray-800 mb-2">{"Account"}</h2>
                <p class="text-gray-600">{"Please log in to view your account."}</p>
            </div>
        };
    };
    let user = &session.user;

    html! {
        <div class="p-6 bg-white rounded-xl shadow-md">
            <h2 class="text-2xl font-semibold text-gray-800 mb-4">{"Account Information"}</h2>
            <p class="text-gray-600">{"View and update your personal and account details."}</p>

            {profile_banner(&profile_status, on_retry)}

            <div class="mt-4">
                <h3 class="text-lg font-medium text-gray-700 mb-3">{"User Profile"}</h3>
                <p class="text-gray-600 mb-4">
                    <strong>{"Current Email:"}</strong>{" "}{user.email.clone().unwrap_or_else(|| "N/A".to_string())}
                </p>

                <div class="mb-4">
                    <label for="business-name" class="block text-sm font-medium text-gray-700 mb-2">{"Business name"}</label>
                    <input
                        type="text"
                        id="business-name"
                        class={INPUT_CLASS}
                        value={(*business_name).clone()}
                        oninput={bind_input(&business_name)}
                        placeholder="e.g., Your Business Name"
                    />
                </div>

                <button
                    onclick={on_update_profile}
                    disabled={*saving || client_id.is_none()}
                    class="mt-2 px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 transition-colors disabled:bg-blue-400"
                >
                    {if *saving { "Saving..." } else { "Update Profile" }}
                </button>
            </div>

            <div class="mt-8">
                <h3 class="text-lg font-medium text-gray-700 mb-3">{"Change Email"}</h3>
                {success_banner(&email_message)}
                {error_banner(&email_error)}

                <form onsubmit={on_change_email}>
                    <label for="new-email" class="block text-sm font-medium text-gray-700 mb-2">{"New Email Address"}</label>
                    <input
                        type="email"
                        id="new-email"
                        class={INPUT_CLASS}
                        value={(*new_email).clone()}
                        oninput={bind_input(&new_email)}
                        placeholder="Enter new email"
                    />
                    <button type="submit" class="mt-2 px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 transition-colors">
                        {"Change Email"}
                    </button>
                </form>
            </div>

            <div class="mt-8">
                <h3 class="text-lg font-medium text-gray-700 mb-3">{"Change Password"}</h3>
                {success_banner(&password_message)}
                {error_banner(&password_error)}

                <form onsubmit={on_change_password}>
                    <label for="new-password" class="block text-sm font-medium text-gray-700 mb-2">{"New password"}</label>
                    <input
                        type="password"
                        id="new-password"
                        class={INPUT_CLASS}
                        value={(*new_password).clone()}
                        oninput={bind_input(&new_password)}
                        placeholder="Enter new password"
                    />

                    <label for="confirm-new-password" class="block text-sm font-medium text-gray-700 mt-4 mb-2">
                        {"Confirm new password"}
                    </label>
                    <input
                        type="password"
                        id="confirm-new-password"
                        class={INPUT_CLASS}
                        value={(*confirm_password).clone()}
                        oninput={bind_input(&confirm_password)}
                        placeholder="Confirm new password"
                    />

                    <button type="submit" class="mt-2 px-4 py-2 bg-purple-600 text-white rounded-lg hover:bg-purple-700 transition-colors">
                        {"Change Password"}
                    </button>
                </form>

                <div class="mt-6">
                    <label class="block text-sm font-medium text-gray-700 mb-2">{"Last Login"}</label>
                    <p class="text-gray-600 p-2 border border-gray-200 rounded-md bg-gray-50">
                        {user.last_login_label()}
                    </p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_load_failures_offer_retry() {
        let load = ProfileStatus::LoadFailed("User query failed: timeout".to_string());
        assert!(load.offers_retry());
        assert_eq!(load.error(), Some("User query failed: timeout"));

        let save = ProfileStatus::SaveFailed("Business name cannot be empty.".to_string());
        assert!(!save.offers_retry());
        assert_eq!(save.error(), Some("Business name cannot be empty."));

        assert!(!ProfileStatus::Saved.offers_retry());
        assert_eq!(ProfileStatus::Saved.error(), None);
        assert_eq!(ProfileStatus::Idle.error(), None);
    }
}
