/// Inbound event decoding for the line-oriented data source bridge
///
/// Each line is one event:
/// - `reading,<rfc3339>,<temperature>,<humidity>[,<time label>]`
/// - `cpu,<host>,<rfc3339>,<temperature>`
/// - `disconnected`
///
/// Blank lines and lines starting with `#` are ignored.
use futures_util::stream::{self, Stream};
use log::{error, warn};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::fleet::CpuRecord;
use crate::models::Reading;
use crate::utils::time_label;

#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    Reading(Reading),
    Cpu(CpuRecord),
    Disconnected,
}

/// Decode one line. Ok(None) for blank and comment lines.
///
/// Values are not range-checked; NaN and infinities are accepted so that the
/// store receives readings exactly as the source sent them.
pub fn parse_line(line: &str) -> Result<Option<SourceEvent>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let event = match fields.as_slice() {
        ["disconnected"] => SourceEvent::Disconnected,
        ["reading", ts, temp, humidity] => {
            let timestamp = parse_timestamp(ts)?;
            SourceEvent::Reading(Reading::new(
                timestamp,
                time_label(&timestamp),
                parse_value("temperature", temp)?,
                parse_value("humidity", humidity)?,
            ))
        }
        ["reading", ts, temp, humidity, label] => SourceEvent::Reading(Reading::new(
            parse_timestamp(ts)?,
            *label,
            parse_value("temperature", temp)?,
            parse_value("humidity", humidity)?,
        )),
        ["cpu", host, ts, temp] if !host.is_empty() => SourceEvent::Cpu(CpuRecord {
            host: host.to_string(),
            timestamp: parse_timestamp(ts)?,
            temperature: parse_value("temperature", temp)?,
        }),
        _ => return Err(format!("Unrecognised event: '{}'", line)),
    };

    Ok(Some(event))
}

fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(raw, &Rfc3339).map_err(|e| format!("Invalid timestamp '{}': {}", raw, e))
}

fn parse_value(name: &str, raw: &str) -> Result<f32, String> {
    raw.parse::<f32>()
        .map_err(|e| format!("Invalid {} '{}': {}", name, raw, e))
}

/// Stream of events read line by line from `reader`.
///
/// Malformed lines are logged and skipped. The stream ends at end of input or
/// on the first read error.
pub fn events<R>(reader: R) -> impl Stream<Item = SourceEvent>
where
    R: AsyncBufRead + Unpin,
{
    stream::unfold(reader.lines(), |mut lines| async move {
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_line(&line) {
                    Ok(Some(event)) => return Some((event, lines)),
                    Ok(None) => continue,
                    Err(e) => warn!("Skipping line: {}", e),
                },
                Ok(None) => return None,
                Err(e) => {
                    error!("Failed to read from source: {}", e);
                    return None;
                }
            }
        }
    })
}
