use live_url_config::{
    errors::SyncConfigError, get_config_from_file, get_config_from_str,
    HistoryMode, SyncOptions,
};
use std::{fs::File, io::Write, path::Path};
use tempfile::NamedTempFile;

const ENV_VARS: [&str; 3] = [
    "LIVE_URL_QUERY_KEY",
    "LIVE_URL_DEDUPE_PUBLISH",
    "LIVE_URL_HISTORY_MODE",
];

const CARGO_TOML_CONTENT_OK: &str = r#"
[package]
name = "url-editor"

[package.metadata.live-url]
query-key = "target"
dedupe-publish = false
history-mode = "replace"

[dependencies]
live_url = "0.1"
"#;

const CARGO_TOML_CONTENT_EMPTY_SECTION: &str = r#"
[package.metadata.live-url]

[dependencies]
query-key = "not-this-one"
"#;

const CARGO_TOML_CONTENT_ERR: &str = r#"
[package.metadata.live-url]
- invalid toml -
"#;

#[test]
fn history_mode_default() {
    assert!(matches!(HistoryMode::default(), HistoryMode::Push));
}

#[test]
fn get_config_from_str_content() {
    let options = temp_env::with_vars_unset(ENV_VARS, || {
        get_config_from_str(CARGO_TOML_CONTENT_OK).unwrap()
    });

    assert_eq!(options.query_key, "target");
    assert!(!options.dedupe_publish);
    assert_eq!(options.history_mode, HistoryMode::Replace);
}

#[test]
fn get_config_from_str_stops_at_next_section() {
    let options = temp_env::with_vars_unset(ENV_VARS, || {
        get_config_from_str(CARGO_TOML_CONTENT_EMPTY_SECTION).unwrap()
    });

    assert_eq!(options, SyncOptions::default());
}

#[test]
fn env_overrides_manifest() {
    let options = temp_env::with_vars(
        [
            ("LIVE_URL_QUERY_KEY", Some("from-env")),
            ("LIVE_URL_DEDUPE_PUBLISH", None),
            ("LIVE_URL_HISTORY_MODE", None),
        ],
        || get_config_from_str(CARGO_TOML_CONTENT_OK).unwrap(),
    );

    assert_eq!(options.query_key, "from-env");
    assert!(!options.dedupe_publish);
}

#[test]
fn missing_section_is_reported() {
    let err = get_config_from_str("[package]\nname = \"x\"\n").unwrap_err();
    assert_eq!(err, SyncConfigError::ConfigSectionNotFound);
}

#[test]
fn get_config_from_file_ok() {
    let cargo_tmp = NamedTempFile::new().unwrap();
    {
        let mut output = File::create(&cargo_tmp).unwrap();
        write!(output, "{CARGO_TOML_CONTENT_OK}").unwrap();
    }

    let path: &Path = cargo_tmp.as_ref();
    let options = temp_env::with_vars_unset(ENV_VARS, || {
        get_config_from_file(path).unwrap()
    });

    assert_eq!(options.query_key, "target");
}

#[test]
fn get_config_from_invalid_file() {
    let cargo_tmp = NamedTempFile::new().unwrap();
    {
        let mut output = File::create(&cargo_tmp).unwrap();
        write!(output, "{CARGO_TOML_CONTENT_ERR}").unwrap();
    }
    let path: &Path = cargo_tmp.as_ref();
    assert!(get_config_from_file(path).is_err());
}

#[test]
fn get_config_from_missing_file() {
    assert!(matches!(
        get_config_from_file("this/path/does/not/exist.toml"),
        Err(SyncConfigError::ConfigError(_))
    ));
}
