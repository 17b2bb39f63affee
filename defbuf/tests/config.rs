//! Config-file loading and CLI/file/default precedence coverage.

use std::io::Write;

use defbuf::config::{load_defaults, ResolvedSettings, DEFAULT_BUFFER_PREFIX};
use defbuf::DefBufError;

#[test]
fn missing_config_file_is_not_an_error() {
    let defaults = load_defaults("/nonexistent/defbuf.toml").unwrap();
    assert_eq!(defaults.buff, None);
    assert_eq!(defaults.def, None);
    assert_eq!(defaults.lef, None);
    assert_eq!(defaults.verilog, None);
}

#[test]
fn malformed_config_file_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "this is not valid toml =====").unwrap();
    let err = load_defaults(file.path()).unwrap_err();
    assert!(matches!(err, DefBufError::ConfigParse { .. }));
}

#[test]
fn cli_flag_wins_over_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "buff = \"BUFX\"\n").unwrap();
    let defaults = load_defaults(file.path()).unwrap();
    let resolved = ResolvedSettings::resolve(
        Some("FE".to_string()),
        None,
        None,
        None,
        defaults,
    );
    assert_eq!(resolved.buffer_prefix, "FE");
}

#[test]
fn config_file_wins_over_builtin_default() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "buff = \"BUFX\"\ndef = \"design.def\"\n").unwrap();
    let defaults = load_defaults(file.path()).unwrap();
    let resolved = ResolvedSettings::resolve(None, None, None, None, defaults);
    assert_eq!(resolved.buffer_prefix, "BUFX");
    assert_eq!(resolved.def_path.as_deref(), Some("design.def"));
}

#[test]
fn builtin_default_when_nothing_specified() {
    let defaults = load_defaults("/nonexistent/defbuf.toml").unwrap();
    let resolved = ResolvedSettings::resolve(None, None, None, None, defaults);
    assert_eq!(resolved.buffer_prefix, DEFAULT_BUFFER_PREFIX);
    assert_eq!(resolved.def_path, None);
    assert_eq!(resolved.lef_path, None);
    assert_eq!(resolved.verilog_path, None);
}
