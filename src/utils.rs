/// Utility functions for time labels and display formatting
use time::macros::format_description;
use time::OffsetDateTime;

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    let format = format_description!("[day].[month].[year] - [hour]:[minute]:[second]");
    dt.format(&format).unwrap_or_else(|_| dt.to_string())
}

/// HH:MM label used for display and as the sampling cadence key
pub fn time_label(dt: &OffsetDateTime) -> String {
    let format = format_description!("[hour]:[minute]");
    dt.format(&format)
        .unwrap_or_else(|_| format!("{:02}:{:02}", dt.hour(), dt.minute()))
}

/// One decimal place, or `-` when there is no data
pub fn format_average(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}
