//! Unit tests for error classification and rendering.

use camino::Utf8Path;
use rstest::rstest;

use super::{FlagError, ValueError};

#[rstest]
#[case(FlagError::HelpRequested, true, false)]
#[case(FlagError::NoExec { command: "root".into() }, false, true)]
#[case(FlagError::UnknownFlag { name: "x".into() }, false, false)]
fn classifies_sentinels(#[case] err: FlagError, #[case] help: bool, #[case] no_exec: bool) {
    assert_eq!(err.is_help_request(), help);
    assert_eq!(err.is_no_exec(), no_exec);
}

#[test]
fn config_path_is_attached_once() {
    let first = FlagError::config_parse("bad token").with_config_path(Utf8Path::new("a.toml"));
    match first.with_config_path(Utf8Path::new("b.toml")) {
        FlagError::ConfigParse { path, .. } => {
            assert_eq!(path.as_deref(), Some(Utf8Path::new("a.toml")));
        }
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn other_variants_ignore_config_path() {
    let err = FlagError::StringConversion {
        value: "null".into(),
    }
    .with_config_path(Utf8Path::new("a.json"));
    assert!(matches!(err, FlagError::StringConversion { .. }));
}

#[test]
fn renders_context() {
    let err = FlagError::ParseValue {
        flag: "--delta".into(),
        value: "soon".into(),
        reason: ValueError::new("invalid duration"),
    };
    assert_eq!(
        err.to_string(),
        "invalid value \"soon\" for flag --delta: invalid duration"
    );

    let err = FlagError::AmbiguousName {
        variable: "APP_LOG_LEVEL".into(),
        flags: vec!["--log-level".into(), "--log.level".into()],
    };
    assert_eq!(
        err.to_string(),
        "environment variable APP_LOG_LEVEL is ambiguous between flags --log-level, --log.level"
    );

    let err = FlagError::undefined_config_name("colour");
    assert_eq!(
        err.to_string(),
        "config file <input>: undefined flag name \"colour\""
    );
}
