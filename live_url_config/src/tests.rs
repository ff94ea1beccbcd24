use crate::{
    bool_from_str, env_w_default, env_wo_default, history_mode_from_str,
    HistoryMode, SyncOptions, DEFAULT_QUERY_KEY,
};

#[test]
fn history_mode_from_str_test() {
    assert!(matches!(
        history_mode_from_str("push").unwrap(),
        HistoryMode::Push
    ));
    assert!(matches!(
        history_mode_from_str("PUSH").unwrap(),
        HistoryMode::Push
    ));
    assert!(matches!(
        history_mode_from_str("replace").unwrap(),
        HistoryMode::Replace
    ));
    assert!(matches!(
        history_mode_from_str(" Replace ").unwrap(),
        HistoryMode::Replace
    ));
    assert!(history_mode_from_str("pop").is_err());
    assert!(history_mode_from_str("?").is_err());
}

#[test]
fn bool_from_str_test() {
    assert!(bool_from_str("true").unwrap());
    assert!(bool_from_str("YES").unwrap());
    assert!(bool_from_str("1").unwrap());
    assert!(!bool_from_str("false").unwrap());
    assert!(!bool_from_str("off").unwrap());
    assert!(!bool_from_str("0").unwrap());
    assert!(bool_from_str("maybe").is_err());
}

#[test]
fn env_w_default_test() {
    temp_env::with_var("LIVE_URL_CONFIG_ENV_TEST", Some("custom"), || {
        assert_eq!(
            env_w_default("LIVE_URL_CONFIG_ENV_TEST", "default").unwrap(),
            String::from("custom")
        );
    });

    temp_env::with_var_unset("LIVE_URL_CONFIG_ENV_TEST", || {
        assert_eq!(
            env_w_default("LIVE_URL_CONFIG_ENV_TEST", "default").unwrap(),
            String::from("default")
        );
    });
}

#[test]
fn env_wo_default_test() {
    temp_env::with_var("LIVE_URL_CONFIG_ENV_TEST", Some("custom"), || {
        assert_eq!(
            env_wo_default("LIVE_URL_CONFIG_ENV_TEST").unwrap(),
            Some(String::from("custom"))
        );
    });

    temp_env::with_var_unset("LIVE_URL_CONFIG_ENV_TEST", || {
        assert_eq!(env_wo_default("LIVE_URL_CONFIG_ENV_TEST").unwrap(), None);
    });
}

#[test]
fn try_from_env_test() {
    let options = temp_env::with_vars(
        [
            ("LIVE_URL_QUERY_KEY", Some("target")),
            ("LIVE_URL_DEDUPE_PUBLISH", Some("false")),
            ("LIVE_URL_HISTORY_MODE", Some("REPLACE")),
        ],
        || SyncOptions::try_from_env().unwrap(),
    );

    assert_eq!(options.query_key, "target");
    assert!(!options.dedupe_publish);
    assert_eq!(options.history_mode, HistoryMode::Replace);
}

#[test]
fn try_from_env_defaults_test() {
    let options = temp_env::with_vars_unset(
        [
            "LIVE_URL_QUERY_KEY",
            "LIVE_URL_DEDUPE_PUBLISH",
            "LIVE_URL_HISTORY_MODE",
        ],
        || SyncOptions::try_from_env().unwrap(),
    );

    assert_eq!(options, SyncOptions::default());
    assert_eq!(options.query_key, DEFAULT_QUERY_KEY);
    assert!(options.dedupe_publish);
    assert_eq!(options.history_mode, HistoryMode::Push);
}

#[test]
fn try_from_env_rejects_bad_history_mode() {
    temp_env::with_var("LIVE_URL_HISTORY_MODE", Some("sideways"), || {
        assert!(SyncOptions::try_from_env().is_err());
    });
}

#[test]
fn builder_overrides_defaults() {
    let options = SyncOptions::builder()
        .query_key("u")
        .history_mode(HistoryMode::Replace)
        .build();
    assert_eq!(options.query_key, "u");
    assert!(options.dedupe_publish);
    assert!(options.history_mode.is_replace());
}
