//! mm1-runner: headless runner for the single-server queue simulation.
//!
//! Usage:
//!   mm1-runner --input mml.in --output mml.out
//!   mm1-runner --seed 12345 --queue-limit 50 --json
//!   mm1-runner --config run.json --trace events.jsonl

use anyhow::{anyhow, Context, Result};
use mm1_core::{
    engine::TraceEntry,
    report::{format_failure, format_report},
    SimConfig, SimEngine, SimReport,
};
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

#[derive(serde::Serialize)]
struct JsonSummary<'a> {
    config: &'a SimConfig,
    report: &'a SimReport,
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<mm1_core::SimError>()
                .map(|sim| sim.exit_code())
                .unwrap_or(1);
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(code as u8)
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let input = string_arg(&args, "--input").unwrap_or("mml.in");
    let output = string_arg(&args, "--output").unwrap_or("mml.out");
    let json = args.iter().any(|a| a == "--json");
    let trace_path = string_arg(&args, "--trace");

    let mut config = match string_arg(&args, "--config") {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::load_or_create(input)?,
    };
    if let Some(seed) = parse_arg::<u64>(&args, "--seed")? {
        config.seed = Some(seed);
    }
    if let Some(limit) = parse_arg::<usize>(&args, "--queue-limit")? {
        config.queue_limit = limit;
    }
    if trace_path.is_some() {
        config.record_trace = true;
    }

    let mut engine = SimEngine::new(config)?;
    let outcome = engine.run();

    if let Some(path) = trace_path {
        write_trace(path, engine.trace())?;
    }

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            // Heading plus diagnostic only; a failed run has no statistics.
            std::fs::write(output, format_failure(engine.config(), &e))
                .with_context(|| format!("Cannot write {output}"))?;
            return Err(e.into());
        }
    };

    if json {
        let summary = JsonSummary { config: engine.config(), report: &report };
        std::fs::write(output, serde_json::to_string_pretty(&summary)?)
            .with_context(|| format!("Cannot write {output}"))?;
    } else {
        std::fs::write(output, format_report(engine.config(), &report))
            .with_context(|| format!("Cannot write {output}"))?;
    }

    println!(
        "Simulation complete ({} customers, ended at {:.3}). Results written to {output}",
        report.customers_delayed, report.simulation_end_time
    );
    Ok(())
}

fn write_trace(path: &str, trace: &[TraceEntry]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create {path}"))?;
    let mut out = BufWriter::new(file);
    for entry in trace {
        writeln!(out, "{}", serde_json::to_string(entry)?)?;
    }
    out.flush()?;
    log::info!("wrote {} trace entries to {path}", trace.len());
    Ok(())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// None when the flag is absent; an error when its value does not parse.
fn parse_arg<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    string_arg(args, flag)
        .map(|v| {
            v.parse()
                .map_err(|e| anyhow!("invalid value {v:?} for {flag}: {e}"))
        })
        .transpose()
}
