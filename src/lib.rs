//! Room and CPU telemetry derivation for the lab monitoring dashboard.
//!
//! Raw readings flow one way: source events are appended to a bounded
//! [`store::ReadingStore`], and every change recomputes a
//! [`view::DashboardView`] from an immutable snapshot.

pub mod classify;
pub mod config;
pub mod fleet;
pub mod metrics;
pub mod models;
pub mod sampling;
pub mod source;
pub mod store;
pub mod utils;
pub mod view;

pub use classify::{ActuatorAction, Status};
pub use config::MonitorConfig;
pub use models::{ChartPoint, Field, Reading, RollingStats, Sample};
pub use store::ReadingStore;
pub use view::DashboardView;
