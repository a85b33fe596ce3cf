//! # KPI cards
//!
//! Headline value, trend label and tone for one metric, plus the seeded demo
//! metrics shown on the public home page.

use serde::{Deserialize, Serialize};

use crate::chart::{fixed, format_value, with_unit, ChartConfig, Unit};
use crate::trend::{period_split, TrendSummary};
use crate::window::TimeWindow;

/// `+12.3%`, `-4.0%`, `0.0%`; blank when the trend is unknown
pub fn trend_label(trend: Option<f64>) -> String {
    match trend {
        Some(t) if !t.is_nan() => {
            let sign = if t > 0.0 { "+" } else { "" };
            format!("{}{}%", sign, fixed(t, 1))
        }
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendTone {
    Positive,
    Negative,
    Unknown,
}

impl TrendTone {
    pub fn from_trend(trend: Option<f64>) -> Self {
        match trend {
            Some(t) if t.is_nan() => TrendTone::Unknown,
            Some(t) if t >= 0.0 => TrendTone::Positive,
            Some(_) => TrendTone::Negative,
            None => TrendTone::Unknown,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            TrendTone::Positive => "text-green-600",
            TrendTone::Negative => "text-red-600",
            TrendTone::Unknown => "text-gray-500",
        }
    }
}

/// How the current window collapses into the headline number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Aggregation {
    #[default]
    Sum,
    Average,
}

impl Aggregation {
    pub fn apply(&self, values: &[f64]) -> f64 {
        let sum: f64 = values.iter().sum();
        match self {
            Aggregation::Sum => sum,
            Aggregation::Average if values.is_empty() => 0.0,
            Aggregation::Average => sum / values.len() as f64,
        }
    }
}

/// Everything a KPI card renders
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSnapshot {
    pub title: String,
    pub headline: f64,
    pub trend: Option<f64>,
    pub current: Vec<f64>,
    pub previous: Vec<f64>,
    pub chart: ChartConfig,
}

impl KpiSnapshot {
    /// Summarise a chronological daily series for `window`
    pub fn from_series(
        title: &str,
        rows: &[f64],
        window: TimeWindow,
        aggregation: Aggregation,
        chart: ChartConfig,
    ) -> Self {
        let split = period_split(rows, window);
        let summary = TrendSummary::from_split(&split);
        Self {
            title: title.to_string(),
            headline: aggregation.apply(split.current),
            trend: (!rows.is_empty()).then_some(summary.percent),
            current: split.current.to_vec(),
            previous: split.previous.to_vec(),
            chart: ChartConfig { window, ..chart },
        }
    }

    pub fn headline_text(&self) -> String {
        with_unit(
            &format_value(self.headline, &self.chart.unit),
            &self.chart.unit,
            self.chart.unit_position,
        )
    }

    pub fn trend_label(&self) -> String {
        trend_label(self.trend)
    }

    pub fn tone(&self) -> TrendTone {
        TrendTone::from_trend(self.trend)
    }
}

/// Small xorshift generator so demo charts look the same on every load
#[derive(Debug, Clone)]
pub struct DemoRng(u64);

impl DemoRng {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    /// Uniform in `[0, 1)`
    pub fn next_unit(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Random walk around `base`, rounded and never negative
pub fn demo_series(count: usize, base: f64, variance: f64, seed: u64) -> Vec<f64> {
    let mut rng = DemoRng::new(seed);
    let mut current = base;
    (0..count)
        .map(|_| {
            current += (rng.next_unit() - 0.5) * variance;
            current.round().max(0.0)
        })
        .collect()
}

/// Days of demo history; two full 30-day windows
pub const DEMO_HISTORY_DAYS: usize = 60;

struct DemoMetric {
    title: &'static str,
    base: f64,
    variance: f64,
    aggregation: Aggregation,
    unit: fn() -> Unit,
    color: &'static str,
    light_color: &'static str,
}

fn plain() -> Unit {
    Unit::None
}

fn percent() -> Unit {
    Unit::Percent
}

const PURPLE: (&str, &str) = ("#8525b2", "#e2ceed");
const ORANGE: (&str, &str) = ("#f59e0b", "#fef3c7");

const DEMO_METRICS: [DemoMetric; 4] = [
    DemoMetric {
        title: "Recovered Revenue",
        base: 5500.0,
        variance: 700.0,
        aggregation: Aggregation::Sum,
        unit: Unit::euro,
        color: PURPLE.0,
        light_color: PURPLE.1,
    },
    DemoMetric {
        title: "Emails Sent",
        base: 350.0,
        variance: 50.0,
        aggregation: Aggregation::Sum,
        unit: plain,
        color: ORANGE.0,
        light_color: ORANGE.1,
    },
    DemoMetric {
        title: "Click-through Rate",
        base: 20.0,
        variance: 3.0,
        aggregation: Aggregation::Average,
        unit: percent,
        color: PURPLE.0,
        light_color: PURPLE.1,
    },
    DemoMetric {
        title: "Average Cart Value",
        base: 70.0,
        variance: 10.0,
        aggregation: Aggregation::Average,
        unit: Unit::euro,
        color: ORANGE.0,
        light_color: ORANGE.1,
    },
];

/// The home page sample cards for `window`
pub fn demo_kpis(window: TimeWindow) -> Vec<KpiSnapshot> {
    DEMO_METRICS
        .iter()
        .enumerate()
        .map(|(i, metric)| {
            let rows = demo_series(DEMO_HISTORY_DAYS, metric.base, metric.variance, 7 + i as u64);
            let unit = (metric.unit)();
            let chart = ChartConfig {
                color: metric.color.to_string(),
                light_color: metric.light_color.to_string(),
                unit_position: unit.default_position(),
                unit,
                window,
            };
            KpiSnapshot::from_series(metric.title, &rows, window, metric.aggregation, chart)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::UnitPosition;

    #[test]
    fn test_trend_label() {
        assert_eq!(trend_label(Some(12.34)), "+12.3%");
        assert_eq!(trend_label(Some(-4.0)), "-4.0%");
        assert_eq!(trend_label(Some(0.0)), "0.0%");
        assert_eq!(trend_label(Some(f64::NAN)), "");
        assert_eq!(trend_label(None), "");
    }

    #[test]
    fn test_trend_tone() {
        assert_eq!(TrendTone::from_trend(Some(0.0)), TrendTone::Positive);
        assert_eq!(TrendTone::from_trend(Some(-0.1)), TrendTone::Negative);
        assert_eq!(TrendTone::from_trend(None), TrendTone::Unknown);
        assert_eq!(TrendTone::from_trend(Some(f64::NAN)).css_class(), "text-gray-500");
    }

    #[test]
    fn test_aggregation() {
        assert_eq!(Aggregation::Sum.apply(&[1.0, 2.0, 3.0]), 6.0);
        assert_eq!(Aggregation::Average.apply(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(Aggregation::Average.apply(&[]), 0.0);
    }

    #[test]
    fn test_snapshot_from_series() {
        let mut rows = vec![10.0; 7];
        rows.extend(vec![15.0; 7]);
        let chart = ChartConfig {
            unit: Unit::euro(),
            unit_position: UnitPosition::Prefix,
            ..ChartConfig::default()
        };
        let kpi = KpiSnapshot::from_series("Revenue", &rows, TimeWindow::Last7Days, Aggregation::Sum, chart);
        assert_eq!(kpi.headline, 105.0);
        assert_eq!(kpi.headline_text(), "€105.00");
        assert_eq!(kpi.trend_label(), "+50.0%");
        assert_eq!(kpi.tone(), TrendTone::Positive);
        assert_eq!(kpi.current.len(), 7);
        assert_eq!(kpi.chart.window, TimeWindow::Last7Days);
    }

    #[test]
    fn test_snapshot_of_empty_series_has_no_trend() {
        let kpi = KpiSnapshot::from_series(
            "Empty",
            &[],
            TimeWindow::Last30Days,
            Aggregation::Average,
            ChartConfig::default(),
        );
        assert_eq!(kpi.headline, 0.0);
        assert_eq!(kpi.trend_label(), "");
        assert_eq!(kpi.tone(), TrendTone::Unknown);
    }

    #[test]
    fn test_demo_series_is_deterministic_and_non_negative() {
        let a = demo_series(60, 20.0, 300.0, 3);
        let b = demo_series(60, 20.0, 300.0, 3);
        assert_eq!(a, b);
        assert_eq!(a.len(), 60);
        assert!(a.iter().all(|v| *v >= 0.0 && v.fract() == 0.0));
        assert_ne!(a, demo_series(60, 20.0, 300.0, 4));
    }

    #[test]
    fn test_demo_kpis_follow_window() {
        let cards = demo_kpis(TimeWindow::Last7Days);
        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Recovered Revenue", "Emails Sent", "Click-through Rate", "Average Cart Value"]
        );
        assert!(cards.iter().all(|c| c.current.len() == 7 && c.previous.len() == 7));
        assert!(cards[0].headline_text().starts_with('€'));
        assert!(cards[2].headline_text().ends_with('%'));
    }
}
