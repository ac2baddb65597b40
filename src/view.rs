/// Dashboard views recomputed from a single history snapshot
use time::Duration;

use crate::config::MonitorConfig;
use crate::metrics::{rolling_stats, sample_stats, window_len, FIXED_CADENCE};
use crate::models::{ChartPoint, Reading, RollingStats, Sample};
use crate::sampling::{chart_series, table_rows};
use crate::store::{ReadingStore, Snapshot};

/// Span of the trend chart
pub const CHART_SPAN: Duration = Duration::hours(24);

/// Everything the presentation layer reads, derived from one store revision
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub revision: u64,
    pub current: Option<Reading>,
    pub connected: bool,
    pub chart: Vec<ChartPoint>,
    pub table: Vec<Sample>,
    pub rolling: RollingStats,
    /// Averages over all fixed-cadence samples in history
    pub sample_stats: RollingStats,
}

impl DashboardView {
    /// Recompute all views from the store's current state
    pub fn compute(store: &ReadingStore, config: &MonitorConfig) -> Self {
        let snapshot: Snapshot = store.snapshot();

        // Last day of fixed-cadence points, counted after filtering
        let mut chart = chart_series(&snapshot);
        let stale = chart
            .len()
            .saturating_sub(window_len(CHART_SPAN, FIXED_CADENCE));
        chart.drain(..stale);

        DashboardView {
            revision: store.revision(),
            current: store.current().cloned(),
            connected: store.is_connected(),
            chart,
            table: table_rows(&snapshot, config.table_limit),
            rolling: rolling_stats(&snapshot, config.rolling_window),
            sample_stats: sample_stats(&snapshot),
        }
    }

    /// False once the store has received readings this view has not seen
    pub fn is_current(&self, store: &ReadingStore) -> bool {
        self.revision == store.revision()
    }

    /// Recompute only when stale; returns true if the view changed
    pub fn refresh(&mut self, store: &ReadingStore, config: &MonitorConfig) -> bool {
        if self.is_current(store) && self.connected == store.is_connected() {
            return false;
        }
        *self = DashboardView::compute(store, config);
        true
    }
}
