//! Host-side tests: parameter table, stimulus protocols and export
//!
//! Tests verify that:
//! - Display units are per cm² and convert back exactly to per mm²
//! - Edits by name or label reconfigure the driver, unknown names are rejected
//! - Seeded noise stimuli are reproducible
//! - CSV traces and JSON summaries are written and readable

use std::path::PathBuf;

use connor_stevens_sim::export::{export_metrics_json_to, CsvExporter, RunExport};
use connor_stevens_sim::host::{apply_edits, ParameterTable, RunConfig, SimulationRunner};
use connor_stevens_sim::driver::HostModel;
use connor_stevens_sim::{ModelParameters, ParameterKey, Stimulus, StimulusSource, TickDriver};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("connor_stevens_{}_{}", std::process::id(), name))
}

#[test]
fn test_display_round_trip() {
    let mut params = ModelParameters::default();
    for key in ParameterKey::ALL {
        let display = params.get_display(key);
        params.set_display(key, display).unwrap();
    }
    let defaults = ModelParameters::default();
    for key in ParameterKey::ALL {
        let diff = (params.get(key) - defaults.get(key)).abs();
        assert!(diff <= 1e-12 * defaults.get(key).abs().max(1.0), "{} drifted by {}", key, diff);
    }

    assert!((defaults.get_display(ParameterKey::GNaMax) - 120.0).abs() < 1e-9);
    assert!((defaults.get_display(ParameterKey::Iapp) - 24.04).abs() < 1e-9);
    assert_eq!(defaults.get_display(ParameterKey::Rate), 40_000.0);
}

#[test]
fn test_parse_key_by_name_or_label() {
    assert_eq!("G_Na_max".parse::<ParameterKey>().unwrap(), ParameterKey::GNaMax);
    assert_eq!("cm".parse::<ParameterKey>().unwrap(), ParameterKey::Cm);
    assert_eq!(
        ParameterKey::Iapp.label().parse::<ParameterKey>().unwrap(),
        ParameterKey::Iapp
    );
    assert!("G_Ca_max".parse::<ParameterKey>().is_err());
}

#[test]
fn test_edits_reconfigure_driver() {
    let mut driver = TickDriver::default();
    for _ in 0..100 {
        driver.on_tick(0.0);
    }
    apply_edits(&mut driver, &[("Iapp", 0.0), ("V0", -70.0), ("Rate", 80_000.0)]).unwrap();

    assert_eq!(driver.parameters().i_app_uA_per_mm2, 0.0);
    assert_eq!(driver.parameters().rate_hz, 80_000);
    assert_eq!(driver.state().v_mV, -70.0);
    assert_eq!(driver.steps(), 8);

    let table = ParameterTable::from_driver(&driver);
    assert_eq!(table.get("Iapp").unwrap().value, 0.0);
    assert!((table.get("Vm").unwrap().value - (-0.07)).abs() < 1e-15);
}

#[test]
fn test_edits_between_runs() {
    let config = RunConfig {
        duration_sec: 0.01,
        ..Default::default()
    };
    let mut runner = SimulationRunner::new(ModelParameters::default(), config).unwrap();
    runner.run();
    apply_edits(runner.driver_mut(), &[("V0", -60.0)]).unwrap();

    assert_eq!(runner.driver().state().v_mV, -60.0);
    assert_eq!(runner.driver().tick_count(), 100);
    let metrics = runner.run();
    assert_eq!(metrics.tick_count, 200);
}

#[test]
fn test_table_display_lists_every_parameter() {
    let table = ParameterTable::from_driver(&TickDriver::default());
    let text = table.to_string();
    for key in ParameterKey::ALL {
        assert!(text.contains(key.name()), "missing {} in\n{}", key, text);
    }
    assert!(text.contains("IKA"));
}

#[test]
fn test_seeded_noise_reproducible() {
    let stimulus = Stimulus::Noise {
        mean_A: -1e-7,
        std_A: 5e-8,
        seed: 42,
    };
    let mut a = StimulusSource::new(stimulus.clone()).unwrap();
    let mut b = StimulusSource::new(stimulus).unwrap();
    let xs: Vec<f64> = (0..100).map(|i| a.sample(i as f64 * 1e-4)).collect();
    let ys: Vec<f64> = (0..100).map(|i| b.sample(i as f64 * 1e-4)).collect();
    assert_eq!(xs, ys);
    assert!(xs.iter().any(|&x| x != xs[0]));

    let invalid = Stimulus::Noise {
        mean_A: 0.0,
        std_A: -1.0,
        seed: 0,
    };
    assert!(StimulusSource::new(invalid).is_err());
}

#[test]
fn test_pulse_triggers_early_spike() {
    let config = RunConfig {
        duration_sec: 0.3,
        stimulus: Stimulus::Pulse {
            onset_sec: 0.1,
            duration_sec: 0.05,
            amplitude_A: -5e-7,
        },
        ..Default::default()
    };
    let mut runner = SimulationRunner::new(ModelParameters::default(), config).unwrap();
    let metrics = runner.run();

    assert!(metrics.spike_count >= 1, "pulse should evoke a spike");
    let first = metrics.first_spike_sec.unwrap();
    assert!(first > 0.1 && first < 0.16, "first spike at {} s", first);
}

#[test]
fn test_csv_export() {
    let path = temp_path("trace.csv");
    let config = RunConfig {
        duration_sec: 0.01,
        ..Default::default()
    };
    let mut runner = SimulationRunner::new(ModelParameters::default(), config).unwrap();
    let mut exporter = CsvExporter::create(&path, 1).unwrap();
    runner.run_with_sink(&mut exporter).unwrap();
    assert_eq!(exporter.rows(), 100);
    let written = exporter.finish().unwrap();

    let mut reader = csv::Reader::from_path(&written).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "tick");
    assert_eq!(&headers[1], "time_sec");
    assert!(headers.iter().any(|h| h == "ika_A"));
    assert_eq!(reader.records().count(), 100);

    std::fs::remove_file(&written).ok();
}

#[test]
fn test_csv_sample_interval() {
    let path = temp_path("sparse.csv");
    let config = RunConfig {
        duration_sec: 0.01,
        ..Default::default()
    };
    let mut runner = SimulationRunner::new(ModelParameters::default(), config).unwrap();
    // 1 ms is an exact multiple of the 100 µs period
    let every = runner.config().ticks_in(1e-3);
    assert_eq!(every, 10);
    let mut exporter = CsvExporter::create(&path, every).unwrap();
    runner.run_with_sink(&mut exporter).unwrap();
    assert_eq!(exporter.rows(), 10);
    let written = exporter.finish().unwrap();

    let mut reader = csv::Reader::from_path(&written).unwrap();
    let ticks: Vec<u64> = reader
        .records()
        .map(|r| r.unwrap()[0].parse().unwrap())
        .collect();
    assert_eq!(ticks, vec![1, 11, 21, 31, 41, 51, 61, 71, 81, 91]);

    std::fs::remove_file(&written).ok();
}

#[test]
fn test_json_summary_export() {
    let path = temp_path("summary.json");
    let params = ModelParameters::default();
    let mut runner = SimulationRunner::new(
        params.clone(),
        RunConfig {
            duration_sec: 0.05,
            ..Default::default()
        },
    )
    .unwrap();
    let metrics = runner.run();
    export_metrics_json_to(&params, &metrics, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let export: RunExport = serde_json::from_str(&contents).unwrap();
    assert_eq!(export.parameters, params);
    assert_eq!(export.metrics.tick_count, 500);
    assert_eq!(export.metrics.spike_count, 0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_parameter_file_round_trip() {
    let path = temp_path("params.json");
    let params = ModelParameters {
        i_app_uA_per_mm2: 0.3,
        rate_hz: 50_000,
        ..Default::default()
    };
    params.save(&path).unwrap();
    assert_eq!(ModelParameters::load(&path).unwrap(), params);

    std::fs::write(&path, r#"{ "v0_mV": -70.0 }"#).unwrap();
    let partial = ModelParameters::load(&path).unwrap();
    assert_eq!(partial.v0_mV, -70.0);
    assert_eq!(partial.rate_hz, 40_000);

    std::fs::remove_file(&path).ok();
    let fallback = ModelParameters::load_or_default(&path);
    assert_eq!(fallback, ModelParameters::default());
}
