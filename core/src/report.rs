//! Text rendering of a run, in the classic single-server report layout.

use crate::{config::SimConfig, error::SimError, stats::SimReport};

/// Report heading and echoed input parameters.
pub fn format_heading(config: &SimConfig) -> String {
    format!(
        "Single-server queueing system\n\n\
         Mean interarrival time{:11.3} minutes\n\n\
         Mean service time{:16.3} minutes\n\n\
         Number of customers{:14}\n\n",
        config.mean_interarrival, config.mean_service, config.num_delays_required,
    )
}

/// Full report for a completed run.
pub fn format_report(config: &SimConfig, report: &SimReport) -> String {
    let mut out = format_heading(config);
    out.push_str(&format!(
        "\n\nAverage delay in queue{:11.3} minutes\n\n\
         Average number in queue{:10.3}\n\n\
         Server utilization{:15.3}\n\n\
         Time simulation ended{:12.3} minutes",
        report.average_delay,
        report.average_queue_length,
        report.server_utilization,
        report.simulation_end_time,
    ));
    out
}

/// Diagnostic appended after the heading when a run aborts.
/// No statistics are ever rendered for a failed run.
pub fn format_failure(config: &SimConfig, err: &SimError) -> String {
    let diagnostic = match err {
        SimError::QueueOverflow { time, .. } => {
            format!("\nOverflow of the array time_arrival at time {time:.6}")
        }
        SimError::CalendarEmpty { time } => format!("\nEvent list empty at time {time:.6}"),
        other => format!("\nSimulation failed: {other}"),
    };
    let mut out = format_heading(config);
    out.push_str(&diagnostic);
    out
}
