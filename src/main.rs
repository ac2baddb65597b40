use futures_util::StreamExt;
use log::{debug, error, info, warn};
use tokio::io::BufReader;
use tokio::time::{interval, Duration, MissedTickBehavior};

use lab_telemetry::config::MonitorConfig;
use lab_telemetry::fleet::FleetStore;
use lab_telemetry::source::{events, SourceEvent};
use lab_telemetry::store::ReadingStore;
use lab_telemetry::utils::{format_average, format_datetime};
use lab_telemetry::view::DashboardView;

fn log_summary(view: &DashboardView, fleet: &FleetStore) {
    info!(
        "Room sensor: {} ({} reading(s) in rolling window)",
        if view.connected { "connected" } else { "disconnected" },
        view.rolling.samples
    );
    info!(
        "  Average temperature: {}°C",
        format_average(view.rolling.avg_temperature)
    );
    info!("  Average humidity: {}%", format_average(view.rolling.avg_humidity));
    info!(
        "  Fixed-cadence averages over {} sample(s): {}°C, {}%",
        view.sample_stats.samples,
        format_average(view.sample_stats.avg_temperature),
        format_average(view.sample_stats.avg_humidity)
    );

    match view.table.first() {
        Some(latest) => info!(
            "  Latest sample {}: {:.1}°C, {:.1}% -> {} / {}",
            latest.time_label,
            latest.temperature,
            latest.humidity,
            latest.status,
            latest.actuator_action
        ),
        None => info!("  No fixed-cadence samples yet"),
    }

    let snapshot = fleet.snapshot();
    if snapshot.hosts.is_empty() {
        return;
    }
    info!(
        "CPU fleet: {} host(s), average {}°C, max {}°C",
        snapshot.hosts.len(),
        format_average(snapshot.average_temperature()),
        format_average(snapshot.max_temperature())
    );
    for host in &snapshot.latest {
        info!(
            "  {}: {:.1}°C ({}) at {}",
            host.record.host,
            host.record.temperature,
            host.status,
            format_datetime(&host.record.timestamp)
        );
    }
}

async fn main_loop(config: MonitorConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Starting lab telemetry monitor (history capacity {} readings)",
        config.history_capacity()
    );

    let mut store = ReadingStore::new(config.history_capacity());
    let mut fleet = FleetStore::new(config.history_capacity());
    let mut view = DashboardView::compute(&store, &config);

    let source = events(BufReader::new(tokio::io::stdin()));
    tokio::pin!(source);

    let mut summary = interval(Duration::from_secs(config.summary_interval_secs));
    summary.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            event = source.next() => {
                match event {
                    Some(SourceEvent::Reading(reading)) => {
                        if !reading.is_valid() {
                            debug!("Stored invalid reading at {}", reading.time_label);
                        }
                        store.append(reading);
                    }
                    Some(SourceEvent::Cpu(record)) => fleet.record(record),
                    Some(SourceEvent::Disconnected) => {
                        store.mark_disconnected();
                        fleet.disconnect();
                    }
                    None => {
                        info!("Source closed");
                        break;
                    }
                }

                // Recompute against the newest revision before anything reads the view
                if view.refresh(&store, &config) {
                    debug!(
                        "Recomputed view at revision {}: {} chart point(s), {} table row(s)",
                        view.revision,
                        view.chart.len(),
                        view.table.len()
                    );
                }
            }
            _ = summary.tick() => log_summary(&view, &fleet),
        }
    }

    log_summary(&view, &fleet);
    if store.is_empty() {
        warn!("No readings received from source!");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match MonitorConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        let _ = tx.send(());
    });

    // Run main loop or wait for shutdown signal
    tokio::select! {
        result = main_loop(config) => {
            match result {
                Ok(_) => info!("Program completed successfully"),
                Err(e) => error!("Fatal error: {}", e),
            }
        }
        _ = &mut rx => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
