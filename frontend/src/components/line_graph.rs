use chrono::Utc;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

use shared::calendar::FrameAnchor;
use shared::chart::{
    ChartConfig, ChartGeometry, ChartInput, ChartModel, HoverReadout, HoverState, PointerEvent,
    PointerPosition, PADDING, VIEW_BOX_HEIGHT, VIEW_BOX_WIDTH,
};

#[derive(Properties, PartialEq, Clone)]
pub struct LineGraphProps {
    pub current: Vec<f64>,
    #[prop_or_default]
    pub previous: Vec<f64>,
    /// Day keys parallel to `current`
    #[prop_or_default]
    pub current_days: Option<Vec<String>>,
    /// Day keys parallel to `previous`
    #[prop_or_default]
    pub previous_days: Option<Vec<String>>,
    #[prop_or_default]
    pub config: ChartConfig,
}

pub enum Msg {
    Pointer(PointerEvent),
}

/// Current period against the previous one, with a hover readout
pub struct LineGraph {
    svg_ref: NodeRef,
    model: ChartModel,
    hover: HoverState,
}

fn build_model(props: &LineGraphProps) -> ChartModel {
    let input = ChartInput {
        current: &props.current,
        previous: &props.previous,
        current_days: props.current_days.as_deref(),
        previous_days: props.previous_days.as_deref(),
    };
    ChartModel::build(&input, &props.config, &FrameAnchor::new(Utc::now()))
}

impl Component for LineGraph {
    type Message = Msg;
    type Properties = LineGraphProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            svg_ref: NodeRef::default(),
            model: build_model(ctx.props()),
            hover: HoverState::Idle,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Msg::Pointer(event) = msg;
        let Some(geometry) = self.model.geometry() else {
            return false;
        };
        let next = self.hover.clone().transition(event, geometry);
        if next == self.hover {
            return false;
        }
        self.hover = next;
        true
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props() == old_props {
            return false;
        }
        // New data invalidates whatever index was hovered
        self.model = build_model(ctx.props());
        self.hover = HoverState::Idle;
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.model {
            ChartModel::Empty => placeholder("No data to display."),
            ChartModel::Unsupported(_) => placeholder("Daily chart not available for this period."),
            ChartModel::Ready(geometry) => self.view_chart(ctx, geometry),
        }
    }
}

fn placeholder(text: &str) -> Html {
    html! {
        <div class="text-gray-400 text-sm h-24 flex items-center justify-center">
            {text.to_string()}
        </div>
    }
}

impl LineGraph {
    fn view_chart(&self, ctx: &Context<Self>, geometry: &ChartGeometry) -> Html {
        let on_move = {
            let svg_ref = self.svg_ref.clone();
            ctx.link().batch_callback(move |e: MouseEvent| {
                let svg = svg_ref.cast::<Element>()?;
                let rect = svg.get_bounding_client_rect();
                Some(Msg::Pointer(PointerEvent::Move(PointerPosition {
                    client_x: e.client_x() as f64,
                    rect_left: rect.left(),
                    rect_width: rect.width(),
                    rect_height: rect.height(),
                })))
            })
        };
        let on_leave = ctx
            .link()
            .callback(|_: MouseEvent| Msg::Pointer(PointerEvent::Leave));

        let config = &geometry.config;

        html! {
            <div class="relative w-full h-24 mt-2 flex items-center justify-center">
                <svg
                    ref={self.svg_ref.clone()}
                    width="100%"
                    height="100%"
                    viewBox={format!("0 0 {} {}", VIEW_BOX_WIDTH, VIEW_BOX_HEIGHT)}
                    preserveAspectRatio="xMidYMid meet"
                    onmousemove={on_move}
                    onmouseleave={on_leave}
                >
                    {for geometry.grid_lines.iter().map(|line| html! {
                        <>
                            <line
                                x1={line.x1.to_string()}
                                y1={line.y.to_string()}
                                x2={line.x2.to_string()}
                                y2={line.y.to_string()}
                                stroke="#e0e0e0"
                                stroke-dasharray="2 2"
                                stroke-width="0.5"
                            />
                            <text
                                x={(PADDING.left - 20.0).to_string()}
                                y={(line.y + 3.0).to_string()}
                                text-anchor="end"
                                class="text-xs fill-gray-500"
                            >
                                {line.label.clone()}
                            </text>
                        </>
                    })}
                    {for geometry.x_labels.iter().map(|label| html! {
                        <text
                            x={label.x.to_string()}
                            y={label.y.to_string()}
                            text-anchor="middle"
                            class="text-xs fill-gray-500"
                        >
                            {label.text.clone()}
                        </text>
                    })}
                    {series_path(geometry.previous_line.path_data(), &config.light_color)}
                    {series_path(geometry.current_line.path_data(), &config.color)}
                    {match self.hover.readout() {
                        Some(readout) => view_tooltip(readout, geometry),
                        None => html! {},
                    }}
                </svg>
            </div>
        }
    }
}

fn series_path(d: Option<String>, color: &str) -> Html {
    match d {
        Some(d) => html! {
            <path
                d={d}
                fill="none"
                stroke={color.to_string()}
                stroke-width="2"
                stroke-linecap="round"
                stroke-linejoin="round"
            />
        },
        None => html! {},
    }
}

fn view_tooltip(readout: &HoverReadout, geometry: &ChartGeometry) -> Html {
    let config = &geometry.config;
    let (x, y) = (readout.x, readout.y);

    html! {
        <>
            <line
                x1={x.to_string()}
                y1={PADDING.top.to_string()}
                x2={x.to_string()}
                y2={(VIEW_BOX_HEIGHT - PADDING.bottom).to_string()}
                stroke="#888"
                stroke-dasharray="3 3"
                stroke-width="1"
            />
            <rect
                x={(x - 45.0).to_string()}
                y={(y - 20.0).to_string()}
                width="90"
                height="40"
                fill="rgba(255,255,255,0.95)"
                stroke="#ccc"
                stroke-width="0.5"
                rx="4"
                ry="4"
            />
            <text x={x.to_string()} y={(y - 7.0).to_string()} text-anchor="middle" font-size="8" fill="#666">
                {readout.date_label.clone()}
            </text>
            <circle cx={(x - 30.0).to_string()} cy={(y + 5.0).to_string()} r="2" fill={config.color.clone()} />
            <text
                x={(x - 20.0).to_string()}
                y={(y + 5.0).to_string()}
                text-anchor="start"
                font-size="10"
                font-weight="bold"
                fill="#333"
            >
                {readout.value_text(geometry)}
            </text>
            {match readout.previous_text(geometry) {
                Some(previous) => html! {
                    <>
                        <circle
                            cx={(x - 30.0).to_string()}
                            cy={(y + 17.0).to_string()}
                            r="2"
                            fill={config.light_color.clone()}
                        />
                        <text
                            x={(x - 20.0).to_string()}
                            y={(y + 17.0).to_string()}
                            text-anchor="start"
                            font-size="8"
                            fill="#888"
                        >
                            {previous}
                        </text>
                    </>
                },
                None => html! {},
            }}
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::window::TimeWindow;

    fn props(current: Vec<f64>, window: TimeWindow) -> LineGraphProps {
        LineGraphProps {
            current,
            previous: Vec::new(),
            current_days: None,
            previous_days: None,
            config: ChartConfig {
                window,
                ..ChartConfig::default()
            },
        }
    }

    #[test]
    fn test_build_model_for_each_window() {
        let values = vec![3.0; 7];
        assert!(matches!(
            build_model(&props(values.clone(), TimeWindow::Last24Hours)),
            ChartModel::Unsupported(TimeWindow::Last24Hours)
        ));

        let model = build_model(&props(values, TimeWindow::Last7Days));
        let geometry = model.geometry().expect("7-day chart");
        assert_eq!(geometry.current.len(), 7);
        assert_eq!(geometry.previous.len(), 7);
    }

    #[test]
    fn test_build_model_without_data_is_empty() {
        assert_eq!(build_model(&props(Vec::new(), TimeWindow::Last30Days)), ChartModel::Empty);
    }
}
