//! Command-line argument surface: flat flags, no subcommands.

use clap::Parser;

/// Collapses buffer chains out of a placed DEF netlist.
#[derive(Parser, Debug)]
#[command(name = "defbuf", version, about = "Collapse buffer chains out of a placed DEF netlist")]
pub struct Cli {
    /// Path to the placed DEF file (required).
    #[arg(short = 'd', long = "def")]
    pub def: Option<String>,

    /// Path to the LEF library file (required).
    #[arg(short = 'l', long = "lef")]
    pub lef: Option<String>,

    /// Path to a gate-level Verilog netlist, read for reference only.
    #[arg(short = 'v', long = "verilog")]
    pub verilog: Option<String>,

    /// Instance-name prefix identifying buffer cells.
    #[arg(long = "buff")]
    pub buff: Option<String>,

    /// Path to an optional TOML defaults file.
    #[arg(long = "config")]
    pub config: Option<String>,
}
