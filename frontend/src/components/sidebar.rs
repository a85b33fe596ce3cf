use yew::prelude::*;

/// Top-level sections of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Dashboard,
    Settings,
    Account,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Dashboard, Page::Settings, Page::Account];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Dashboard => "Dashboard",
            Page::Settings => "Settings",
            Page::Account => "Account",
        }
    }

    /// Sections that need a signed-in user
    pub fn requires_login(&self) -> bool {
        !matches!(self, Page::Home)
    }

    /// Where navigation lands given the auth state; `None` means ask for login
    pub fn resolve(self, signed_in: bool) -> Option<Page> {
        if self.requires_login() && !signed_in {
            None
        } else {
            Some(self)
        }
    }

    fn icon_paths(&self) -> &'static [&'static str] {
        match self {
            Page::Home => &["M3 12l2-2m0 0l7-7 7 7M5 10v10a1 1 0 001 1h3m10-11l2 2m-2 2v10a1 1 0 01-1 1h-3m-6 0a1 1 0 001-1v-4a1 1 0 011-1h2a1 1 0 011 1v4a1 1 0 001 1m-6-4h4"],
            Page::Dashboard => &[
                "M11 3.055A9.001 9.001 0 1020.945 13H11V3.055z",
                "M20.488 9H15V3.512A9.025 9.025 0 0120.488 9z",
            ],
            Page::Settings => &[
                "M10.325 4.317c.426-1.756 2.924-1.756 3.35 0a1.724 1.724 0 002.573 1.066c1.543-.94 3.31.826 2.37 2.37a1.724 1.724 0 001.065 2.572c1.756.426 1.756 2.924 0 3.35a1.724 1.724 0 00-1.066 2.573c.94 1.543-.826 3.31-2.37 2.37a1.724 1.724 0 00-2.572 1.065c-.426 1.756-2.924 1.756-3.35 0a1.724 1.724 0 00-2.573-1.066c-1.543.94-3.31-.826-2.37-2.37a1.724 1.724 0 00-1.065-2.572c-1.756-.426-1.756-2.924 0-3.35a1.724 1.724 0 001.066-2.573c-.94-1.543.826-3.31 2.37-2.37.568.356 1.334.232 1.724-.065z",
                "M15 12a3 3 0 11-6 0 3 3 0 016 0z",
            ],
            Page::Account => &["M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z"],
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub active: Page,
    pub on_navigate: Callback<Page>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let expanded = use_state(|| false);

    let on_toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    let aside_class = format!(
        "bg-gray-800 text-white p-6 flex flex-col rounded-r-xl shadow-lg transition-all duration-300 ease-in-out {}",
        if *expanded { "w-64" } else { "w-20 items-center" }
    );

    html! {
        <aside class={aside_class}>
            <div class={classes!("flex", "items-center", "mb-8", (!*expanded).then_some("justify-center"))}>
                <button
                    onclick={on_toggle}
                    class="p-2 rounded-md hover:bg-gray-700 focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-gray-600"
                >
                    <svg class="w-6 h-6 text-gray-300" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16" />
                    </svg>
                </button>
                if *expanded {
                    <h1 class="text-2xl font-bold ml-4">{"Recoverly"}</h1>
                }
            </div>
            <nav class="flex-grow">
                <ul>
                    {for Page::ALL.iter().map(|&page| {
                        let on_click = {
                            let on_navigate = props.on_navigate.clone();
                            Callback::from(move |_: MouseEvent| on_navigate.emit(page))
                        };
                        let state_class = if page == props.active {
                            "bg-blue-600 text-white shadow-md"
                        } else {
                            "hover:bg-gray-700 text-gray-300"
                        };
                        let button_class = format!(
                            "flex items-center w-full py-2 px-4 rounded-lg text-left transition-colors duration-200 {} {}",
                            state_class,
                            if *expanded { "" } else { "justify-center px-2" }
                        );
                        html! {
                            <li class="mb-3">
                                <button class={button_class} onclick={on_click} title={page.label()}>
                                    <svg class="w-5 h-5 mr-3" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                        {for page.icon_paths().iter().map(|d| html! {
                                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d={*d} />
                                        })}
                                    </svg>
                                    if *expanded {
                                        {page.label()}
                                    }
                                </button>
                            </li>
                        }
                    })}
                </ul>
            </nav>
            <div class={classes!("mt-auto", "pt-6", "border-t", "border-gray-700", "text-gray-400", "text-sm", (!*expanded).then_some("hidden"))}>
                <p>{"© 2025 Recoverly"}</p>
                <p>{"Version 1.0"}</p>
            </div>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_pages_need_login() {
        assert_eq!(Page::Home.resolve(false), Some(Page::Home));
        assert_eq!(Page::Dashboard.resolve(false), None);
        assert_eq!(Page::Settings.resolve(false), None);
        assert_eq!(Page::Account.resolve(true), Some(Page::Account));
    }

    #[test]
    fn test_every_page_has_an_icon() {
        for page in Page::ALL {
            assert!(!page.icon_paths().is_empty(), "{} has no icon", page.label());
        }
    }
}
