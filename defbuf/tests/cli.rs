//! CLI flag parsing coverage.

use defbuf::cli::Cli;
use clap::Parser;

#[test]
fn parses_required_flags() {
    let cli = Cli::parse_from(["defbuf", "-d", "design.def", "-l", "cells.lef"]);
    assert_eq!(cli.def.as_deref(), Some("design.def"));
    assert_eq!(cli.lef.as_deref(), Some("cells.lef"));
    assert_eq!(cli.verilog, None);
    assert_eq!(cli.buff, None);
    assert_eq!(cli.config, None);
}

#[test]
fn parses_long_form_aliases() {
    let cli = Cli::parse_from([
        "defbuf", "--def", "design.def", "--lef", "cells.lef",
        "--verilog", "design.v", "--buff", "BUFX",
    ]);
    assert_eq!(cli.def.as_deref(), Some("design.def"));
    assert_eq!(cli.lef.as_deref(), Some("cells.lef"));
    assert_eq!(cli.verilog.as_deref(), Some("design.v"));
    assert_eq!(cli.buff.as_deref(), Some("BUFX"));
}

#[test]
fn missing_def_flag_parses_to_none() {
    let cli = Cli::parse_from(["defbuf", "-l", "cells.lef"]);
    assert_eq!(cli.def, None);
}

#[test]
fn parses_config_flag() {
    let cli = Cli::parse_from(["defbuf", "--config", "defbuf.toml"]);
    assert_eq!(cli.config.as_deref(), Some("defbuf.toml"));
}
