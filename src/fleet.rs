/// CPU temperature tracking for the lab computers
use log::warn;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use time::OffsetDateTime;

// CPU status thresholds in °C
pub const CPU_CRITICAL_C: f32 = 80.0;
pub const CPU_WARNING_C: f32 = 70.0;
pub const CPU_COOL_C: f32 = 50.0;

/// Maximum number of hosts listed in a snapshot
pub const MAX_LISTED_HOSTS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct CpuRecord {
    pub host: String,
    pub temperature: f32,
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuStatus {
    Critical,
    Warning,
    Normal,
    Cool,
}

impl CpuStatus {
    pub fn from_temperature(temperature: f32) -> Self {
        if temperature > CPU_CRITICAL_C {
            CpuStatus::Critical
        } else if temperature > CPU_WARNING_C {
            CpuStatus::Warning
        } else if temperature < CPU_COOL_C {
            CpuStatus::Cool
        } else {
            CpuStatus::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CpuStatus::Critical => "CRITICAL",
            CpuStatus::Warning => "WARNING",
            CpuStatus::Normal => "NORMAL",
            CpuStatus::Cool => "COOL",
        }
    }
}

impl fmt::Display for CpuStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest record of one host, classified
#[derive(Debug, Clone, PartialEq)]
pub struct HostStatus {
    pub record: CpuRecord,
    pub status: CpuStatus,
}

#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    pub latest: Vec<HostStatus>,
    pub hosts: Vec<String>,
    pub all_temperatures: Vec<f32>,
}

impl FleetSnapshot {
    pub fn average_temperature(&self) -> Option<f32> {
        let temps: Vec<f32> = self.latest_temperatures().collect();
        if temps.is_empty() {
            return None;
        }
        Some(temps.iter().sum::<f32>() / temps.len() as f32)
    }

    pub fn max_temperature(&self) -> Option<f32> {
        self.latest_temperatures().reduce(f32::max)
    }

    fn latest_temperatures(&self) -> impl Iterator<Item = f32> + '_ {
        self.latest
            .iter()
            .map(|h| h.record.temperature)
            .filter(|t| t.is_finite())
    }
}

/// Per-host record history, bounded per host
#[derive(Debug)]
pub struct FleetStore {
    records: BTreeMap<String, VecDeque<CpuRecord>>,
    capacity_per_host: usize,
    connected: bool,
}

impl FleetStore {
    pub fn new(capacity_per_host: usize) -> Self {
        FleetStore {
            records: BTreeMap::new(),
            capacity_per_host,
            connected: false,
        }
    }

    pub fn record(&mut self, record: CpuRecord) {
        let entries = self.records.entry(record.host.clone()).or_default();
        entries.push_back(record);
        while entries.len() > self.capacity_per_host {
            entries.pop_front();
        }
        self.connected = true;
    }

    pub fn disconnect(&mut self) {
        if self.connected {
            warn!("CPU source disconnected, keeping data for {} host(s)", self.records.len());
        }
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        let mut snapshot = FleetSnapshot::default();

        for (host, entries) in &self.records {
            snapshot.hosts.push(host.clone());
            snapshot.all_temperatures.extend(
                entries
                    .iter()
                    .map(|r| r.temperature)
                    .filter(|t| t.is_finite()),
            );

            // Ties keep the first record seen
            let latest = entries.iter().fold(None::<&CpuRecord>, |best, r| match best {
                Some(b) if r.timestamp <= b.timestamp => Some(b),
                _ => Some(r),
            });

            if let Some(record) = latest {
                snapshot.latest.push(HostStatus {
                    status: CpuStatus::from_temperature(record.temperature),
                    record: record.clone(),
                });
            }
        }

        snapshot.latest.truncate(MAX_LISTED_HOSTS);
        snapshot
    }
}
