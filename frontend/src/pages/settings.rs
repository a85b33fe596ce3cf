use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use shared::domain::settings_service::{SETTINGS_LOAD_FAILED, SETTINGS_SAVED};
use shared::models::{ReportFrequency, ReportSettings, SettingsPatch};

use crate::hooks::use_auth;
use crate::services::{AppServices, Logger};

#[derive(Properties, PartialEq)]
pub struct SettingsProps {
    pub services: AppServices,
}

const INPUT_CLASS: &str = "mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-blue-500 focus:ring-blue-500 sm:text-sm p-2";

/// Callback writing an input's value into one field of the form
fn edit_text(
    form: &UseStateHandle<ReportSettings>,
    apply: fn(&mut ReportSettings, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, input.value());
        form.set(next);
    })
}

#[function_component(Settings)]
pub fn settings(props: &SettingsProps) -> Html {
    let auth = use_auth();
    let form = use_state(ReportSettings::default);
    let loading = use_state(|| true);
    let saving = use_state(|| false);
    let in_flight = use_mut_ref(|| false);
    let message = use_state(|| Option::<String>::None);
    let error = use_state(|| Option::<String>::None);

    {
        let form = form.clone();
        let loading = loading.clone();
        let error = error.clone();
        let service = props.services.settings.clone();
        let user_id = auth.session.as_ref().map(|s| s.user.id.clone());

        use_effect_with(user_id, move |user_id| {
            if user_id.is_none() {
                loading.set(false);
            } else {
                loading.set(true);
                spawn_local(async move {
                    match service.read().await {
                        Ok(settings) => form.set(settings),
                        Err(e) => {
                            Logger::error_with_component("settings", &format!("Error loading settings: {}", e));
                            error.set(Some(SETTINGS_LOAD_FAILED.to_string()));
                        }
                    }
                    loading.set(false);
                });
            }
            || ()
        });
    }

    let on_save = {
        let form = form.clone();
        let saving = saving.clone();
        let in_flight = in_flight.clone();
        let message = message.clone();
        let error = error.clone();
        let service = props.services.settings.clone();
        let signed_in = auth.is_signed_in();

        Callback::from(move |_: MouseEvent| {
            if !signed_in || *in_flight.borrow() {
                return;
            }
            *in_flight.borrow_mut() = true;
            saving.set(true);
            message.set(None);
            error.set(None);

            let patch = SettingsPatch::from(&*form);
            let service = service.clone();
            let saving = saving.clone();
            let in_flight = in_flight.clone();
            let message = message.clone();
            let error = error.clone();

            spawn_local(async move {
                match service.update(&patch).await {
                    Ok(()) => message.set(Some(SETTINGS_SAVED.to_string())),
                    Err(e) => {
                        Logger::error_with_component("settings", &format!("Error saving settings: {}", e));
                        error.set(Some(e.user_message()));
                    }
                }
                *in_flight.borrow_mut() = false;
                saving.set(false);
            });
        })
    };

    let frequency_option = |frequency: ReportFrequency, label: &'static str| {
        let onchange = {
            let form = form.clone();
            Callback::from(move |_: Event| {
                form.set(ReportSettings {
                    report_frequency: frequency,
                    ..(*form).clone()
                });
            })
        };
        html! {
            <label class="inline-flex items-center">
                <input
                    type="radio"
                    class="form-radio text-blue-600"
                    name="report-frequency"
                    value={frequency.as_str()}
                    checked={form.report_frequency == frequency}
                    onchange={onchange}
                />
                <span class="ml-2 text-gray-700">{label}</span>
            </label>
        }
    };

    let on_include_charts = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(ReportSettings {
                include_charts: input.checked(),
                ..(*form).clone()
            });
        })
    };

    if *loading {
        return html! { <p class="p-6 text-center">{"Loading your settings..."}</p> };
    }

    html! {
        <div class="p-6 bg-white rounded-xl shadow-md">
            <h2 class="text-2xl font-semibold text-gray-800 mb-4">{"Settings"}</h2>
            <p class="text-gray-600">
                {"Manage your application settings here. You can customize preferences, notifications, and integrations."}
            </p>

            {if let Some(text) = message.as_ref() {
                html! { <div class="bg-green-100 text-green-700 px-4 py-2 my-4 rounded-lg">{text}</div> }
            } else { html! {} }}
            {if let Some(text) = error.as_ref() {
                html! { <div class="bg-red-100 text-red-700 px-4 py-2 my-4 rounded-lg">{text}</div> }
            } else { html! {} }}

            <div class="mt-6">
                <h3 class="text-lg font-medium text-gray-700 mb-3">{"Reporting Preferences"}</h3>

                <div class="mb-4">
                    <label class="block text-sm font-medium text-gray-700 mb-2">{"Report Frequency"}</label>
                    <div class="flex items-center space-x-4">
                        {frequency_option(ReportFrequency::Weekly, "Weekly")}
                        {frequency_option(ReportFrequency::Monthly, "Monthly")}
                    </div>
                </div>

                <div class="mb-4 flex items-center">
                    <input
                        type="checkbox"
                        id="include-charts"
                        class="form-checkbox text-blue-600 h-5 w-5 rounded focus:ring-blue-500"
                        checked={form.include_charts}
                        onchange={on_include_charts}
                    />
                    <label for="include-charts" class="ml-2 text-sm font-medium text-gray-700">
                        {"Include charts in the reporting"}
                    </label>
                </div>

                <div class="mb-4">
                    <label for="report-email" class="block text-sm font-medium text-gray-700 mb-2">
                        {"Send report to email address"}
                    </label>
                    <input
                        type="email"
                        id="report-email"
                        class={INPUT_CLASS}
                        value={form.report_email.clone()}
                        oninput={edit_text(&form, |s, v| s.report_email = v)}
                        placeholder="e.g., reports@example.com"
                    />
                </div>
            </div>

            <div class="mt-6">
                <h3 class="text-lg font-medium text-gray-700 mb-3">{"Email Settings"}</h3>

                <div class="mb-4">
                    <label for="sender-email" class="block text-sm font-medium text-gray-700 mb-2">{"Sender email"}</label>
                    <input
                        type="email"
                        id="sender-email"
                        class={INPUT_CLASS}
                        value={form.sender_email.clone()}
                        oninput={edit_text(&form, |s, v| s.sender_email = v)}
                        placeholder="e.g., info@yourcompany.com"
                    />
                </div>

                <div class="mb-4">
                    <label for="sender-name" class="block text-sm font-medium text-gray-700 mb-2">{"Sender name"}</label>
                    <input
                        type="text"
                        id="sender-name"
                        class={INPUT_CLASS}
                        value={form.sender_name.clone()}
                        oninput={edit_text(&form, |s, v| s.sender_name = v)}
                        placeholder="e.g., Your Company Name"
                    />
                </div>

                <div class="mb-4">
                    <label for="reply-to-email" class="block text-sm font-medium text-gray-700 mb-2">{"Reply-to email"}</label>
                    <input
                        type="email"
                        id="reply-to-email"
                        class={INPUT_CLASS}
                        value={form.reply_to_email.clone()}
                        oninput={edit_text(&form, |s, v| s.reply_to_email = v)}
                        placeholder="e.g., support@yourcompany.com"
                    />
                </div>
            </div>

            <div class="mt-6">
                <h3 class="text-lg font-medium text-gray-700 mb-3">{"Recovery Flow"}</h3>
                <dl class="grid grid-cols-2 gap-4 text-sm">
                    <div>
                        <dt class="font-medium text-gray-500">{"Abandonment timeout"}</dt>
                        <dd class="mt-1 text-gray-900">{format!("{} minutes", form.abandonment_timeout_minutes)}</dd>
                    </div>
                    <div>
                        <dt class="font-medium text-gray-500">{"Attribution window"}</dt>
                        <dd class="mt-1 text-gray-900">{format!("{} days", form.attribution_window_days)}</dd>
                    </div>
                </dl>
            </div>

            <button
                onclick={on_save}
                disabled={*saving}
                class="mt-6 px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 transition-colors duration-200 disabled:bg-blue-400"
            >
                {if *saving { "Saving..." } else { "Save Settings" }}
            </button>
        </div>
    }
}
