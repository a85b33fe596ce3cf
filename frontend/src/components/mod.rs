pub mod header;
pub mod kpi_card;
pub mod line_graph;
pub mod login_modal;
pub mod sidebar;

pub use header::Header;
pub use kpi_card::KpiCard;
pub use line_graph::LineGraph;
pub use login_modal::LoginModal;
pub use sidebar::{Page, Sidebar};

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Keeps a text state in sync with an input's value
pub fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}
