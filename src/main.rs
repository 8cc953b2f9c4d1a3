//! Connor-Stevens simulator - Entry point
//!
//! Runs the model headless at a fixed host period and prints a summary.
//!
//! CLI Usage:
//!   cargo run                                  # 1 s at default parameters
//!   cargo run -- -t 5 --csv                    # 5 s, export the trace
//!   cargo run -- --set Iapp=0 --pulse -2e-7    # Edit parameters, add a pulse
//!   cargo run -- --show-parameters             # Print the parameter table

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use connor_stevens_sim::{
    export::{export_metrics_json, CsvExporter},
    host::{apply_edit, ParameterTable, RunConfig, SimulationRunner},
    IntegrationMethod, ModelParameters, Stimulus,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Euler,
    Rk4,
}

impl From<Method> for IntegrationMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::Euler => IntegrationMethod::ForwardEuler,
            Method::Rk4 => IntegrationMethod::RungeKutta4,
        }
    }
}

/// Headless Connor-Stevens neuron simulation
#[derive(Debug, Parser)]
#[command(name = "connor-stevens-sim", version, about)]
struct Cli {
    /// Model parameter file (JSON, internal units)
    #[arg(short, long)]
    parameters: Option<PathBuf>,

    /// Run configuration file (JSON)
    #[arg(short, long)]
    run_config: Option<PathBuf>,

    /// Simulated duration in seconds
    #[arg(short = 't', long)]
    duration: Option<f64>,

    /// Host tick period in microseconds
    #[arg(long)]
    period_us: Option<u64>,

    /// Integration scheme
    #[arg(long, value_enum)]
    method: Option<Method>,

    /// Parameter edit in display units, e.g. `--set Iapp=30` (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    edits: Vec<String>,

    /// Constant stimulus current in amperes (negative depolarizes)
    #[arg(long, conflicts_with = "pulse")]
    constant: Option<f64>,

    /// 50 ms stimulus pulse at t = 100 ms, amplitude in amperes
    #[arg(long)]
    pulse: Option<f64>,

    /// Write the per-tick trace to CSV
    #[arg(long)]
    csv: bool,

    /// CSV sample interval in seconds, rounded to whole ticks (0 = every tick)
    #[arg(long, default_value_t = 0.0)]
    csv_interval: f64,

    /// Write a JSON summary
    #[arg(long)]
    json: bool,

    /// Export directory
    #[arg(long, default_value = "exports")]
    out_dir: PathBuf,

    /// Print the parameter table and exit
    #[arg(long)]
    show_parameters: bool,
}

fn parse_edit(edit: &str) -> Result<(&str, f64)> {
    let (name, value) = edit
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got {:?}", edit))?;
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid value in {:?}", edit))?;
    Ok((name.trim(), value))
}

fn build_parameters(cli: &Cli) -> Result<ModelParameters> {
    let mut params = match &cli.parameters {
        Some(path) => ModelParameters::load(path)?,
        None => ModelParameters::default(),
    };
    for edit in &cli.edits {
        let (name, value) = parse_edit(edit)?;
        let key = apply_edit(&mut params, name, value)?;
        log::info!("{} = {} {}", key.name(), value, key.display_unit());
    }
    Ok(params)
}

fn build_run_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = match &cli.run_config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(duration) = cli.duration {
        config.duration_sec = duration;
    }
    if let Some(period_us) = cli.period_us {
        config.period_us = period_us;
    }
    if let Some(method) = cli.method {
        config.method = method.into();
    }
    if let Some(amplitude_A) = cli.constant {
        config.stimulus = Stimulus::Constant { amplitude_A };
    }
    if let Some(amplitude_A) = cli.pulse {
        config.stimulus = Stimulus::Pulse {
            onset_sec: 0.1,
            duration_sec: 0.05,
            amplitude_A,
        };
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = build_parameters(&cli)?;
    let config = build_run_config(&cli)?;
    let mut runner = SimulationRunner::new(params.clone(), config)?;

    if cli.show_parameters {
        print!("{}", ParameterTable::from_driver(runner.driver()));
        return Ok(());
    }

    println!("=== Connor-Stevens Simulation ===\n");
    let driver = runner.driver();
    let stability = driver.stability();
    println!("Host period: {:?}", driver.period());
    println!(
        "Integration: {:?}, {} sub-steps of {:.2} µs per tick",
        driver.integration_method(),
        driver.steps(),
        driver.sub_step_sec() * 1e6
    );
    println!(
        "Fastest gate: tau_{} = {:.2} µs at {:.1} mV (Euler needs >= {:.0} Hz)",
        stability.fastest_gate.symbol(),
        stability.fastest_tau_sec * 1e6,
        stability.at_v_mV,
        stability.recommended_min_rate_hz
    );
    println!("Stimulus: {:?}", runner.config().stimulus);
    println!("\n--- Running {} ticks ---\n", runner.config().n_ticks());

    let start_time = Instant::now();
    let metrics = if cli.csv {
        let every = runner.config().ticks_in(cli.csv_interval);
        let mut exporter = CsvExporter::new(&cli.out_dir, every)?;
        let metrics = runner.run_with_sink(&mut exporter)?;
        let path = exporter.finish()?;
        println!("Trace written to {}", path.display());
        metrics
    } else {
        runner.run()
    };
    let elapsed = start_time.elapsed();

    println!("\n=== Results ===");
    println!("Elapsed time: {:.2?}", elapsed);
    println!(
        "Real-time factor: {:.1}x",
        metrics.simulation_time_sec / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("Simulation time: {:.4} s", metrics.simulation_time_sec);
    println!("Final V: {:.3} mV", metrics.v_mV);
    println!(
        "Gates: m={:.4} h={:.4} n={:.4} a={:.4} b={:.4}",
        metrics.m, metrics.h, metrics.n, metrics.a, metrics.b
    );
    println!("IKA: {:.4e} A", metrics.ika_A);
    println!("Spikes: {} ({:.2} Hz)", metrics.spike_count, metrics.mean_rate_hz);
    if let Some(t) = metrics.first_spike_sec {
        println!("First spike: {:.4} s", t);
    }
    if let Some(isi) = metrics.mean_isi_sec {
        println!("Mean ISI: {:.4} s", isi);
    }

    println!("\n=== Diagnostic Checks ===");
    if metrics.state_valid {
        println!("✓ State finite, gating variables within their steady-state range");
    } else {
        println!("⚠️  WARNING: State left the physical range - integration is unstable");
        println!("   Raise the integration rate (--set Rate=...) or shorten the period");
    }

    if cli.json {
        let path = export_metrics_json(&params, &metrics, &cli.out_dir)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
