use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::command::Command;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total commands executed. Labels: command, status.
pub const COMMANDS_TOTAL: &str = "roomsched_commands_total";

/// Histogram: command latency in seconds. Labels: command.
pub const COMMAND_DURATION_SECONDS: &str = "roomsched_command_duration_seconds";

/// Counter: reservation requests. Labels: outcome.
pub const RESERVATIONS_TOTAL: &str = "roomsched_reservations_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: registered rooms.
pub const ROOMS_REGISTERED: &str = "roomsched_rooms_registered";

/// Gauge: active TCP connections.
pub const CONNECTIONS_ACTIVE: &str = "roomsched_connections_active";

/// Counter: total connections accepted.
pub const CONNECTIONS_TOTAL: &str = "roomsched_connections_total";

/// Counter: connections rejected due to limit.
pub const CONNECTIONS_REJECTED_TOTAL: &str = "roomsched_connections_rejected_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), BuildError> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Map a Command variant to a short label for metrics.
pub fn command_label(cmd: &Command) -> &'static str {
    match cmd {
        Command::AddRoom { .. } => "add_room",
        Command::Reserve { .. } => "reserve",
        Command::Check { .. } => "check",
        Command::List { .. } => "list",
        Command::Rooms => "rooms",
        Command::Export => "export",
        Command::Usage(_) => "usage",
        Command::Help => "help",
        Command::Quit => "quit",
    }
}
