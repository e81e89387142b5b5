// tests/config_loader_tests.rs
//! Layered configuration loading through the public API

use ecg_synth::{synthesize, ConfigLoader, EcgError, Lead};
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
#[serial]
fn test_file_then_local_then_environment() {
    let dir = TempDir::new().unwrap();
    let base = write_file(
        &dir,
        "ecg-synth.toml",
        r#"
heart_rate = 60
duration = 2.0

[st_segment.elevation]
V2 = 0.3
"#,
    );
    let local = write_file(
        &dir,
        "ecg-synth.local.toml",
        r#"
duration = 1.0

[st_segment.elevation]
V3 = 0.4
"#,
    );

    std::env::set_var("ECG_LAYERS_AMPLITUDE", "1.5");
    let mut loader = ConfigLoader::with_paths(vec![base, local]).with_env_prefix("ECG_LAYERS_");
    let loaded = loader.load();
    std::env::remove_var("ECG_LAYERS_AMPLITUDE");

    let config = loaded.unwrap();
    assert_eq!(config.heart_rate, 60.0);
    assert_eq!(config.duration, 1.0);
    assert_eq!(config.amplitude, 1.5);
    assert_eq!(config.st_segment.elevation(Lead::V2), 0.3);
    assert_eq!(config.st_segment.elevation(Lead::V3), 0.4);

    assert_eq!(synthesize(&config).unwrap().leads.len(), 12);
}

#[test]
#[serial]
fn test_pattern_from_environment() {
    std::env::set_var("ECG_PATTERN_ENV_PATTERN", "rbbb");
    let mut loader = ConfigLoader::with_paths(Vec::new()).with_env_prefix("ECG_PATTERN_ENV_");
    let loaded = loader.load();
    std::env::remove_var("ECG_PATTERN_ENV_PATTERN");

    let config = loaded.unwrap();
    assert_eq!(config.qrs_complex.duration, 0.12);
    assert_eq!(config.t_wave.amplitude, -0.2);
}

#[test]
#[serial]
fn test_unreadable_toml_is_source_error() {
    let dir = TempDir::new().unwrap();
    let broken = write_file(&dir, "broken.toml", "heart_rate = = 3\n");

    let mut loader = ConfigLoader::with_paths(vec![broken]).with_env_prefix("ECG_BROKEN_");
    match loader.load() {
        Err(EcgError::ConfigSource { path, .. }) => assert!(path.ends_with("broken.toml")),
        other => panic!("Expected source error, got {other:?}"),
    }
}

#[test]
fn test_export_then_reload() {
    let config = ConfigLoader::from_toml_str(
        r#"
pattern = "stemi-lateral"
sampling_rate = 500

[noise]
white_noise_mv = 0.01
seed = 7
"#,
    )
    .unwrap();
    assert_eq!(config.noise.seed, 7);
    assert_eq!(config.st_segment.elevation(Lead::AVL), 0.4);

    let exported = NamedTempFile::new().unwrap();
    let mut source = NamedTempFile::new().unwrap();
    write!(source, "{}", toml::to_string(&config).unwrap()).unwrap();

    let mut loader =
        ConfigLoader::with_paths(vec![source.path().to_path_buf()]).with_env_prefix("ECG_EXPORT_IT_");
    let loaded = loader.load().unwrap();
    loader.export_config(exported.path()).unwrap();

    let reloaded = ConfigLoader::from_toml_str(&std::fs::read_to_string(exported.path()).unwrap()).unwrap();
    assert_eq!(reloaded.st_segment, loaded.st_segment);
    assert_eq!(reloaded.sampling_rate, 500.0);
    assert_eq!(reloaded.noise, loaded.noise);
}
