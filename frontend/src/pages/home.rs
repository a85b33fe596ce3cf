use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use shared::domain::contact_service::CONTACT_THANKS;
use shared::kpi::demo_kpis;
use shared::window::TimeWindow;

use crate::components::{bind_input, KpiCard};
use crate::services::{AppServices, Logger};

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub services: AppServices,
}

const STATS: [(&str, &str); 3] = [
    ("€ 2883.21", "Average revenue recovered / month"),
    ("12.4%", "Average recovery rate"),
    ("15", "Average setup time (minutes)"),
];

const STEPS: [(&str, &str, &str, &str); 3] = [
    (
        "🛒",
        "1. Cart Abandonment Detection",
        "Our system automatically detects when a customer leaves items in their cart without completing a purchase.",
        "bg-blue-50",
    ),
    (
        "📧",
        "2. Automated Email Campaigns",
        "We send a series of personalized, conversion-optimized emails to gently remind customers and encourage them to complete their order.",
        "bg-green-50",
    ),
    (
        "💰",
        "3. Revenue Recovery",
        "Watch your recovered revenue grow as abandoned carts are turned into completed sales, all managed by our expert team.",
        "bg-purple-50",
    ),
];

const OFFERS: [(&str, &str, &str, &str); 4] = [
    (
        "✨",
        "Fully Managed Service",
        "Our team handles everything from email design to campaign optimization, so you can focus on your business.",
        "bg-yellow-50",
    ),
    (
        "📈",
        "Conversion Optimization",
        "Emails are continuously A/B tested and refined to ensure the highest possible recovery rates.",
        "bg-red-50",
    ),
    (
        "📊",
        "Detailed Analytics",
        "Access a comprehensive dashboard to track your recovered revenue, email performance, and more.",
        "bg-teal-50",
    ),
    (
        "🔒",
        "Secure & Reliable",
        "Your data and customer information are handled with the highest security standards.",
        "bg-indigo-50",
    ),
];

#[function_component(Home)]
pub fn home(props: &HomeProps) -> Html {
    let window = use_state(TimeWindow::default);
    let cards = use_memo(*window, |window| demo_kpis(*window));

    let on_window_change = {
        let window = window.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<TimeWindow>() {
                Ok(value) => window.set(value),
                Err(e) => Logger::warn_with_component("home", &e.to_string()),
            }
        })
    };

    let show_contact_form = use_state(|| false);
    let contact_email = use_state(String::new);
    let sending = use_state(|| false);
    let submission_message = use_state(|| Option::<String>::None);
    let submission_error = use_state(|| Option::<String>::None);

    let on_show_form = {
        let show_contact_form = show_contact_form.clone();
        Callback::from(move |_: MouseEvent| show_contact_form.set(true))
    };

    let on_contact_submit = {
        let contact = props.services.contact.clone();
        let contact_email = contact_email.clone();
        let sending = sending.clone();
        let submission_message = submission_message.clone();
        let submission_error = submission_error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *sending || contact_email.trim().is_empty() {
                return;
            }
            sending.set(true);
            submission_message.set(None);
            submission_error.set(None);

            let contact = contact.clone();
            let email = (*contact_email).clone();
            let contact_email = contact_email.clone();
            let sending = sending.clone();
            let submission_message = submission_message.clone();
            let submission_error = submission_error.clone();

            spawn_local(async move {
                match contact.submit(&email).await {
                    Ok(()) => {
                        submission_message.set(Some(CONTACT_THANKS.to_string()));
                        contact_email.set(String::new());
                    }
                    Err(e) => {
                        Logger::error_with_component("home", &format!("Error adding contact: {}", e));
                        let message = e.user_message();
                        submission_error.set(Some(if message.is_empty() {
                            "Something went wrong. Please try again.".to_string()
                        } else {
                            message
                        }));
                    }
                }
                sending.set(false);
            });
        })
    };

    html! {
        <div class="p-6 bg-white rounded-xl shadow-md text-center">
            <h2 class="text-4xl font-bold text-gray-900 mb-4">{"Recover more revenue. Effortlessly."}</h2>
            <p class="text-lg text-gray-700 max-w-2xl mx-auto">
                {"We automatically email your customers after they abandon their cart, fully managed by our team and optimized for conversions. No hidden costs."}
            </p>

            <div class="mt-12">
                <h3 class="text-3xl font-bold text-gray-900 mb-2">{"Proven Results Across All Stores"}</h3>
                <p class="text-lg text-gray-700 max-w-2xl mx-auto mb-8">
                    {"Real revenue recovery data across all of our clients."}
                </p>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-6 max-w-4xl mx-auto">
                    {for STATS.iter().map(|(value, label)| html! {
                        <div class="bg-white p-6 rounded-xl shadow-md flex flex-col">
                            <p class="text-4xl font-bold text-gray-900 mb-2 text-left">{*value}</p>
                            <p class="text-lg font-medium text-gray-700 text-left">{*label}</p>
                        </div>
                    })}
                </div>

                <div class="mt-10 max-w-5xl mx-auto">
                    <div class="flex justify-end mb-4">
                        <label for="time-window" class="sr-only">{"Time period"}</label>
                        <select
                            id="time-window"
                            class="px-3 py-1 rounded-md text-sm bg-gray-100 text-gray-700"
                            onchange={on_window_change}
                        >
                            {for TimeWindow::ALL.iter().map(|&option| html! {
                                <option value={option.token()} selected={option == *window}>
                                    {option.label()}
                                </option>
                            })}
                        </select>
                    </div>
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 text-left">
                        {for cards.iter().map(|snapshot| html! {
                            <KpiCard snapshot={snapshot.clone()} />
                        })}
                    </div>
                </div>

                <div class="mt-6">
                    {if let Some(message) = submission_message.as_ref() {
                        html! { <div class="bg-green-100 text-green-700 px-4 py-2 mb-4 rounded">{message}</div> }
                    } else { html! {} }}
                    {if let Some(message) = submission_error.as_ref() {
                        html! { <div class="bg-red-100 text-red-700 px-4 py-2 mb-4 rounded">{message}</div> }
                    } else { html! {} }}

                    {if !*show_contact_form {
                        html! {
                            <button
                                onclick={on_show_form}
                                class="px-6 py-3 bg-blue-600 text-white rounded-lg hover:bg-blue-700 transition"
                            >
                                {"Get in Contact"}
                            </button>
                        }
                    } else {
                        html! {
                            <form onsubmit={on_contact_submit} class="mt-4 flex flex-col items-center space-y-3">
                                <input
                                    type="email"
                                    placeholder="Enter your email"
                                    value={(*contact_email).clone()}
                                    oninput={bind_input(&contact_email)}
                                    required=true
                                    class="border p-2 rounded w-64"
                                />
                                <button
                                    type="submit"
                                    disabled={*sending}
                                    class="px-4 py-2 bg-green-600 text-white rounded hover:bg-green-700 transition disabled:bg-gray-400"
                                >
                                    {if *sending { "Sending..." } else { "Send" }}
                                </button>
                            </form>
                        }
                    }}
                </div>

                <div class="mt-12 max-w-3xl mx-auto p-6 bg-gray-50 rounded-xl shadow-inner">
                    <p class="text-lg italic text-gray-700">
                        {"\"Recoverly has been a game-changer for our online store. They take care of everything and we saw an immediate increase in our revenue coming from recovered revenue.\""}
                    </p>
                    <p class="text-md font-semibold text-gray-800 mt-4">{"- Claudia, Hibou"}</p>
                </div>
            </div>

            <div class="mt-16 pt-8 border-t border-gray-200">
                <h3 class="text-3xl font-bold text-gray-900 mb-6">{"How Recoverly Works"}</h3>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-8 max-w-5xl mx-auto">
                    {for STEPS.iter().map(|(icon, title, text, tint)| html! {
                        <div class={format!("flex flex-col items-center p-6 {} rounded-xl shadow-sm", tint)}>
                            <div class="text-5xl mb-4">{*icon}</div>
                            <h4 class="text-xl font-semibold text-gray-800 mb-2">{*title}</h4>
                            <p class="text-gray-700 text-center">{*text}</p>
                        </div>
                    })}
                </div>
            </div>

            <div class="mt-16 pt-8 border-t border-gray-200">
                <h3 class="text-3xl font-bold text-gray-900 mb-6">{"What Recoverly Offers"}</h3>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-8 max-w-4xl mx-auto text-left">
                    {for OFFERS.iter().map(|(icon, title, text, tint)| html! {
                        <div class={format!("flex items-start p-4 {} rounded-xl shadow-sm", tint)}>
                            <div class="text-3xl mr-4">{*icon}</div>
                            <div>
                                <h4 class="text-xl font-semibold text-gray-800 mb-1">{*title}</h4>
                                <p class="text-gray-700">{*text}</p>
                            </div>
                        </div>
                    })}
                </div>
            </div>
        </div>
    }
}
