//! Buffer classification coverage.

use std::collections::HashMap;
use std::io::Write;

use compact_str::CompactString;
use defbuf::classify::classify;
use defbuf::def::parse_def;
use defbuf::netlist::{Direction, Macro};

fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn macros() -> HashMap<CompactString, Macro> {
    let mut nand2 = Macro::default();
    nand2.pins.insert("A".into(), Direction::Input);
    nand2.pins.insert("O".into(), Direction::Output);

    let mut bufx2 = Macro::default();
    bufx2.pins.insert("I".into(), Direction::Input);
    bufx2.pins.insert("O".into(), Direction::Output);

    let mut table = HashMap::new();
    table.insert(CompactString::from("NAND2"), nand2);
    table.insert(CompactString::from("BUFX2"), bufx2);
    table
}

#[test]
fn single_buffer_head_and_interior() {
    let file = write_tmp(
        "COMPONENTS 2 ;\n\
         - u1 NAND2 + PLACED ( 0 0 ) N ;\n\
         - FE_1 BUFX2 + PLACED ( 10 0 ) N ;\n\
         END COMPONENTS\n\
         NETS 1 ;\n\
         - n1\n  ( u1 O ) ( FE_1 I )\n;\n\
         END NETS\n",
    );
    let mut netlist = parse_def(file.path()).unwrap();
    netlist.set_macros(macros());

    let classification = classify(&netlist, "FE");
    assert!(classification.buffered.contains("n1"));
    assert!(classification.chain_heads.contains("n1"));
}

#[test]
fn prefix_override_changes_classification() {
    let file = write_tmp(
        "COMPONENTS 2 ;\n\
         - u1 NAND2 + PLACED ( 0 0 ) N ;\n\
         - FE_1 BUFX2 + PLACED ( 10 0 ) N ;\n\
         END COMPONENTS\n\
         NETS 1 ;\n\
         - n1\n  ( u1 O ) ( FE_1 I )\n;\n\
         END NETS\n",
    );
    let mut netlist = parse_def(file.path()).unwrap();
    netlist.set_macros(macros());

    let default_prefix = classify(&netlist, "FE");
    assert!(!default_prefix.chain_heads.is_empty());

    let overridden = classify(&netlist, "BUFX");
    assert!(overridden.chain_heads.is_empty());
}
