//! # Shared
//!
//! Platform-neutral core of the Recoverly dashboard: calendar frames, series
//! alignment, trend math, chart geometry, KPI formatting, the session hub,
//! and the domain services that talk to the hosted backend through the
//! [`storage`] traits. Everything here builds and tests natively; the browser
//! frontend only adds HTTP and rendering.

pub mod calendar;
pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod kpi;
pub mod models;
pub mod series;
pub mod session;
pub mod storage;
pub mod trend;
pub mod window;

pub use calendar::{CalendarDay, DateFrame, FrameAnchor, REFERENCE_TZ};
pub use chart::{ChartConfig, ChartError, ChartGeometry, ChartInput, ChartModel, Unit, UnitPosition};
pub use config::{AppConfig, ConfigError};
pub use error::{DashboardError, Result};
pub use kpi::{Aggregation, KpiSnapshot, TrendTone};
pub use models::{
    AccountProfile, AuthUser, Client, ClientId, ClientSettingsRow, Contact, ReportFrequency,
    ReportSettings, Session, SettingsPatch, UserUpdate,
};
pub use series::{align, AlignedSeries};
pub use session::{AuthEvent, AuthState, SessionHub, Subscription};
pub use trend::{pct_change, period_split, PeriodSplit, TrendSummary};
pub use window::TimeWindow;
