/// Rolling averages and history window selection
use time::Duration;

use crate::models::{Field, Reading, RollingStats};
use crate::sampling::qualifies;

/// Cadence of the fixed-cadence samples the duration window is keyed to
pub const FIXED_CADENCE: Duration = Duration::minutes(10);

/// Arithmetic mean of `field` over `readings`.
///
/// Returns None for an empty slice so callers can tell "no data" apart from a
/// zero average. Non-finite values contribute zero but still count, which
/// keeps NaN out of the result for raw, unfiltered windows.
pub fn average(field: Field, readings: &[Reading]) -> Option<f32> {
    mean(readings.iter().map(|r| r.value(field)))
}

/// Mean accumulated in f64 so large finite inputs cannot overflow the sum
fn mean(values: impl Iterator<Item = f32>) -> Option<f32> {
    let (sum, count) = values
        .map(|v| if v.is_finite() { v as f64 } else { 0.0 })
        .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return None;
    }

    let avg = (sum / count as f64) as f32;
    avg.is_finite().then_some(avg)
}

/// The last `min(n, len)` entries, in chronological order
pub fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Suffix of `history` approximating the most recent `span`.
///
/// This is a fixed-count slice, `span / cadence` entries, and assumes the
/// history holds one entry per cadence step with no gaps. Timestamps are not
/// inspected, so gaps or a faster cadence shorten the real time covered.
pub fn last_duration_window(history: &[Reading], span: Duration, cadence: Duration) -> &[Reading] {
    last_n(history, window_len(span, cadence))
}

/// Number of cadence steps in `span`; zero for non-positive inputs
pub fn window_len(span: Duration, cadence: Duration) -> usize {
    if span <= Duration::ZERO || cadence <= Duration::ZERO {
        return 0;
    }
    (span.whole_seconds() / cadence.whole_seconds().max(1)) as usize
}

/// Temperature and humidity averages over the last `window_size` raw readings
pub fn rolling_stats(history: &[Reading], window_size: usize) -> RollingStats {
    let window = last_n(history, window_size);
    RollingStats {
        avg_temperature: average(Field::Temperature, window),
        avg_humidity: average(Field::Humidity, window),
        samples: window.len(),
    }
}

/// Averages over every fixed-cadence sample in `history`, as shown beside the
/// sample table. Unlike [`rolling_stats`] only qualifying readings count.
pub fn sample_stats(history: &[Reading]) -> RollingStats {
    let samples = || history.iter().filter(|r| qualifies(r));
    RollingStats {
        avg_temperature: mean(samples().map(|r| r.temperature)),
        avg_humidity: mean(samples().map(|r| r.humidity)),
        samples: samples().count(),
    }
}
