use yew::prelude::*;

use crate::hooks::use_auth;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub on_login: Callback<()>,
    pub on_logout: Callback<()>,
}

pub fn welcome_line(email: Option<&str>) -> String {
    match email {
        Some(email) => format!("Welcome back, {} 👋", email),
        None => "Welcome! 👋".to_string(),
    }
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let auth = use_auth();
    let signed_in = auth.is_signed_in();

    let on_login = {
        let on_login = props.on_login.clone();
        Callback::from(move |_: MouseEvent| on_login.emit(()))
    };
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    let status_class = if signed_in {
        "text-sm font-medium text-green-600"
    } else {
        "text-sm font-medium text-red-600"
    };
    let button_class = "px-3 py-1 bg-blue-500 text-white rounded-md text-sm hover:bg-blue-600 transition-colors duration-200";

    html! {
        <header class="flex justify-between items-center mb-8">
            <h2 class="text-3xl font-bold text-gray-800">
                {welcome_line(if signed_in { auth.email() } else { None })}
            </h2>
            <div class="flex items-center space-x-2">
                <span class={status_class}>
                    {if signed_in { "Logged In" } else { "Not Logged In" }}
                </span>
                {if signed_in {
                    html! { <button onclick={on_logout} class={button_class}>{"Logout"}</button> }
                } else {
                    html! { <button onclick={on_login} class={button_class}>{"Login"}</button> }
                }}
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_line() {
        assert_eq!(welcome_line(Some("a@shop.nl")), "Welcome back, a@shop.nl 👋");
        assert_eq!(welcome_line(None), "Welcome! 👋");
    }
}
