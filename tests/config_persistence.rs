//! Config persistence integration tests: YAML file I/O and option conversion.

use encoding_rs::{SHIFT_JIS, UTF_8};
use utau_codec::config::{load_config, save_config, Config, ConfigError};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("absent.yaml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_yaml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut config = Config::default();
    config.ust.fallback_encoding = Some("utf-8".into());
    config.oto.encoding = Some("shift_jis".into());
    config.oto.float_precision = Some(3);
    config.prefix_map.sharps = true;

    save_config(&path, &config).unwrap();
    assert!(path.exists());
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);

    assert_eq!(loaded.ust_options().unwrap().fallback_encoding, UTF_8);
    let oto = loaded.oto_options().unwrap();
    assert_eq!(oto.encoding, SHIFT_JIS);
    assert_eq!(oto.float_precision, Some(3));
    assert!(loaded.prefix_map_options().unwrap().sharps);
}

#[test]
fn invalid_yaml_is_an_error() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "ust: [not, a, map]\n").unwrap();
    assert!(matches!(load_config(file.path()), Err(ConfigError::Yaml(_))));
}
