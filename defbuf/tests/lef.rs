//! LEF macro/pin/direction ingest coverage.

use std::io::Write;

use defbuf::lef::parse_lef;
use defbuf::netlist::Direction;
use defbuf::DefBufError;

fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn simple_macro() {
    let file = write_tmp(
        "MACRO BUFX2\n  PIN I\n    DIRECTION INPUT ;\n  END I\n  PIN O\n    DIRECTION OUTPUT ;\n  END O\nEND BUFX2\n",
    );
    let macros = parse_lef(file.path()).unwrap();
    let m = macros.get("BUFX2").unwrap();
    assert_eq!(m.pins.get("I"), Some(&Direction::Input));
    assert_eq!(m.pins.get("O"), Some(&Direction::Output));
}

#[test]
fn pin_superseded_by_next_pin_line() {
    let file = write_tmp(
        "MACRO BUFX2\n  PIN I\n  PIN O\n    DIRECTION OUTPUT ;\n  END O\nEND BUFX2\n",
    );
    let macros = parse_lef(file.path()).unwrap();
    let m = macros.get("BUFX2").unwrap();
    assert_eq!(m.pins.get("I"), None);
    assert_eq!(m.pins.get("O"), Some(&Direction::Output));
}

#[test]
fn direction_before_any_pin_is_skipped() {
    let file = write_tmp("MACRO BUFX2\n  DIRECTION OUTPUT ;\nEND BUFX2\n");
    let macros = parse_lef(file.path()).unwrap();
    let m = macros.get("BUFX2").unwrap();
    assert!(m.pins.is_empty());
}

#[test]
fn only_latest_direction_retained() {
    let file = write_tmp(
        "MACRO BUFX2\n  PIN I\n    DIRECTION INPUT ;\n    DIRECTION INOUT ;\n  END I\nEND BUFX2\n",
    );
    let macros = parse_lef(file.path()).unwrap();
    let m = macros.get("BUFX2").unwrap();
    assert_eq!(m.pins.get("I"), Some(&Direction::Inout));
}

#[test]
fn missing_file_is_fatal() {
    let err = parse_lef("/nonexistent/cells.lef").unwrap_err();
    assert!(matches!(err, DefBufError::InputFile { what: "LEF", .. }));
}
