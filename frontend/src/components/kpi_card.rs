use yew::prelude::*;

use shared::kpi::KpiSnapshot;

use super::line_graph::LineGraph;

#[derive(Properties, PartialEq)]
pub struct KpiCardProps {
    pub snapshot: KpiSnapshot,
    /// Day keys for date-keyed series; positional alignment when absent
    #[prop_or_default]
    pub current_days: Option<Vec<String>>,
    #[prop_or_default]
    pub previous_days: Option<Vec<String>>,
}

#[function_component(KpiCard)]
pub fn kpi_card(props: &KpiCardProps) -> Html {
    let snapshot = &props.snapshot;
    let trend_class = format!("text-xs {}", snapshot.tone().css_class());

    html! {
        <div class="p-4 bg-white rounded-xl shadow border border-gray-100">
            <div class="flex items-start justify-between">
                <div>
                    <h3 class="text-sm font-medium text-gray-500">{&snapshot.title}</h3>
                    <div class="mt-1 text-2xl font-semibold text-gray-900">
                        {snapshot.headline_text()}
                    </div>
                </div>
                <div class={trend_class}>{snapshot.trend_label()}</div>
            </div>

            <LineGraph
                current={snapshot.current.clone()}
                previous={snapshot.previous.clone()}
                current_days={props.current_days.clone()}
                previous_days={props.previous_days.clone()}
                config={snapshot.chart.clone()}
            />
        </div>
    }
}
