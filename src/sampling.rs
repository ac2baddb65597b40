/// Fixed-cadence sample selection over a history snapshot
use crate::classify::classify;
use crate::models::{ChartPoint, Reading, Sample};

/// Minutes of the hour that count as a fixed-cadence sample
pub const CADENCE_MINUTES: [i64; 6] = [0, 10, 20, 30, 40, 50];

/// Parse the minute component of a time label such as `10:20` or `10:20:05`.
///
/// The second colon-delimited field is read the lenient way: leading
/// whitespace and an optional sign, then as many digits as present.
/// Returns None when there is no second field or it has no leading digits.
pub fn parse_minute(time_label: &str) -> Option<i64> {
    let mut parts = time_label.split(':');
    let _hour = parts.next()?;
    let field = parts.next()?.trim_start();

    let (negative, digits) = match field.as_bytes().first() {
        Some(b'-') => (true, &field[1..]),
        Some(b'+') => (false, &field[1..]),
        _ => (false, field),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// True when the label falls on a ten-minute mark
pub fn is_ten_minute_mark(time_label: &str) -> bool {
    parse_minute(time_label)
        .map(|minute| CADENCE_MINUTES.contains(&minute))
        .unwrap_or(false)
}

/// Cadence and validity combined; the single gate for both fixed-cadence outputs
pub fn qualifies(reading: &Reading) -> bool {
    is_ten_minute_mark(&reading.time_label) && reading.is_valid()
}

/// Chronological chart series of qualifying readings
pub fn chart_series(history: &[Reading]) -> Vec<ChartPoint> {
    history
        .iter()
        .filter(|r| qualifies(r))
        .map(|r| ChartPoint {
            time_label: r.time_label.clone(),
            temperature: r.temperature,
            humidity: r.humidity,
        })
        .collect()
}

/// Classified table rows, most recent first, truncated to `limit`.
///
/// `index` is the 0-based position in the reversed output.
pub fn table_rows(history: &[Reading], limit: usize) -> Vec<Sample> {
    history
        .iter()
        .rev()
        .filter(|r| qualifies(r))
        .take(limit)
        .enumerate()
        .map(|(index, r)| {
            let (actuator_action, status) = classify(r.temperature);
            Sample {
                index,
                time_label: r.time_label.clone(),
                temperature: r.temperature,
                humidity: r.humidity,
                actuator_action,
                status,
            }
        })
        .collect()
}
