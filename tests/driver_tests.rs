//! Tick driver tests
//!
//! Tests verify that:
//! - Sub-step counts follow ceil(period * rate) with at least one step
//! - Configuration resets the state to rest without touching the clock
//! - Default parameters fire about once per second
//! - Runs are deterministic for a given input sequence
//! - Forward Euler diverges below the stability bound instead of being clamped

use std::time::Duration;

use connor_stevens_sim::driver::{drive, steps_per_tick, HostModel, TickDriver};
use connor_stevens_sim::host::{RunConfig, SimulationRunner};
use connor_stevens_sim::kinetics::Gate;
use connor_stevens_sim::{IntegrationMethod, ModelParameters, NeuronState, Stimulus};

fn run_for(params: ModelParameters, config: RunConfig) -> SimulationRunner {
    let mut runner = SimulationRunner::new(params, config).unwrap();
    runner.run();
    runner
}

#[test]
fn test_steps_per_tick() {
    assert_eq!(steps_per_tick(Duration::from_millis(1), 40_000), 40);
    assert_eq!(steps_per_tick(Duration::from_micros(50), 1_000), 1);
    assert_eq!(steps_per_tick(Duration::from_micros(100), 40_000), 4);
    assert_eq!(steps_per_tick(Duration::from_micros(30), 40_000), 2);
    assert_eq!(steps_per_tick(Duration::ZERO, 40_000), 1);
    assert_eq!(steps_per_tick(Duration::from_millis(1), 0), 1);
}

#[test]
fn test_configure_resets_to_new_rest() {
    let mut driver = TickDriver::new(ModelParameters::default(), Duration::from_millis(1));
    for _ in 0..20 {
        driver.on_tick(-1e-7);
    }
    let elapsed = driver.elapsed_sec();

    let params = ModelParameters {
        v0_mV: -55.0,
        ..Default::default()
    };
    driver.on_configure(params);

    let state = driver.state();
    assert_eq!(state.v_mV, -55.0);
    for gate in Gate::ALL {
        assert!(
            (state.gate(gate) - gate.steady_state(-55.0)).abs() < 1e-15,
            "gate {}",
            gate.symbol()
        );
    }
    assert_eq!(driver.elapsed_sec(), elapsed, "configure must not reset the clock");
}

#[test]
fn test_period_change_keeps_state() {
    let mut driver = TickDriver::default();
    for _ in 0..50 {
        driver.on_tick(0.0);
    }
    let before: NeuronState = *driver.state();
    driver.on_period_change(Duration::from_millis(2));
    assert_eq!(*driver.state(), before);
    assert_eq!(driver.steps(), 80);
}

#[test]
fn test_output_is_voltage_in_volts() {
    let mut driver = TickDriver::default();
    let outputs = drive(&mut driver, std::iter::repeat(0.0).take(10));
    assert_eq!(outputs.len(), 10);
    let last = *outputs.last().unwrap();
    assert!((last - driver.state().v_mV * 1e-3).abs() < 1e-15);
    assert!(last > -0.1 && last < 0.0, "output {} V", last);
}

#[test]
fn test_drive_through_trait_object() {
    let mut driver = TickDriver::default();
    let host: &mut dyn HostModel = &mut driver;
    host.on_period_change(Duration::from_micros(250));
    let outputs = drive(host, [0.0, 0.0, 0.0]);
    assert_eq!(outputs.len(), 3);
    assert_eq!(driver.steps(), 10);
    assert_eq!(driver.tick_count(), 3);
}

#[test]
fn test_deterministic_outputs() {
    let inputs: Vec<f64> = (0..2000).map(|i| if i % 400 < 50 { -2e-7 } else { 0.0 }).collect();

    let mut first = TickDriver::default();
    let mut second = TickDriver::default();
    let a = drive(&mut first, inputs.iter().copied());
    let b = drive(&mut second, inputs.iter().copied());

    assert_eq!(a, b);
    assert_eq!(first.state(), second.state());
}

#[test]
fn test_runner_trace_deterministic() {
    let config = RunConfig {
        duration_sec: 0.05,
        stimulus: Stimulus::Noise {
            mean_A: -1e-7,
            std_A: 1e-7,
            seed: 7,
        },
        ..Default::default()
    };
    let mut first = SimulationRunner::new(ModelParameters::default(), config.clone()).unwrap();
    let mut second = SimulationRunner::new(ModelParameters::default(), config).unwrap();
    let a = first.output_trace();
    let b = second.output_trace();

    assert_eq!(a.len(), 500);
    assert_eq!(a, b);
}

#[test]
fn test_default_parameters_fire_once_per_second() {
    let runner = run_for(ModelParameters::default(), RunConfig::default());
    let metrics = runner.metrics();

    assert!(metrics.state_valid);
    assert_eq!(metrics.spike_count, 1, "spikes at {:?}", runner.spikes().spike_times_sec());
    let first = metrics.first_spike_sec.unwrap();
    assert!((first - 0.905).abs() < 0.01, "first spike at {} s", first);
}

#[test]
fn test_repetitive_firing() {
    let config = RunConfig {
        duration_sec: 3.0,
        ..Default::default()
    };
    let runner = run_for(ModelParameters::default(), config);
    let metrics = runner.metrics();

    assert_eq!(metrics.spike_count, 3);
    let isi = metrics.mean_isi_sec.unwrap();
    assert!(isi > 0.5 && isi < 1.5, "mean ISI {} s", isi);
}

#[test]
fn test_no_bias_stays_silent() {
    let params = ModelParameters {
        i_app_uA_per_mm2: 0.0,
        ..Default::default()
    };
    let runner = run_for(params, RunConfig::default());
    let metrics = runner.metrics();

    assert_eq!(metrics.spike_count, 0);
    assert!(metrics.state_valid);
    assert!(metrics.v_mV < -60.0, "settled at {} mV", metrics.v_mV);
}

#[test]
fn test_euler_close_to_rk4() {
    let euler = run_for(ModelParameters::default(), RunConfig::default());
    let rk4 = run_for(
        ModelParameters::default(),
        RunConfig {
            method: IntegrationMethod::RungeKutta4,
            ..Default::default()
        },
    );

    let t_euler = euler.metrics().first_spike_sec.unwrap();
    let t_rk4 = rk4.metrics().first_spike_sec.unwrap();
    assert!(
        (t_euler - t_rk4).abs() < 1e-3,
        "first spike: Euler {} s, RK4 {} s",
        t_euler,
        t_rk4
    );
    assert_eq!(rk4.driver().integration_steps(), 40_000);
}

#[test]
fn test_euler_diverges_at_low_rate() {
    let params = ModelParameters {
        rate_hz: 10_000,
        ..Default::default()
    };
    let mut runner = SimulationRunner::new(params, RunConfig::default()).unwrap();
    assert_eq!(runner.driver().steps(), 1);
    assert!(!runner.driver().stability().is_rate_stable(10_000));

    let mut left_physical_range = false;
    for _ in 0..runner.config().n_ticks() {
        runner.tick();
        let state = runner.driver().state();
        if !state.is_physical() {
            left_physical_range = true;
            break;
        }
    }
    assert!(left_physical_range, "Euler at 10 kHz should not stay bounded");
}

#[test]
fn test_depolarization_block_stays_valid() {
    // Strong inward current holds V above +40 mV, where a_inf exceeds 1
    let params = ModelParameters {
        rate_hz: 200_000,
        ..Default::default()
    };
    let config = RunConfig {
        duration_sec: 0.2,
        stimulus: Stimulus::Constant { amplitude_A: -2e-5 },
        method: IntegrationMethod::RungeKutta4,
        ..Default::default()
    };
    let runner = run_for(params, config);
    let metrics = runner.metrics();

    assert!(metrics.v_mV > 40.4, "held at {} mV", metrics.v_mV);
    assert!(metrics.a > 1.0, "a = {}", metrics.a);
    assert!(metrics.state_valid, "stable run flagged invalid: {:?}", metrics);
}
