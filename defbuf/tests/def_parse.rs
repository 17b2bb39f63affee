//! DEF ingest state-machine coverage.

use std::io::Write;

use defbuf::def::parse_def;
use defbuf::netlist::PinRef;

fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn single_buffer_chain() {
    let file = write_tmp(
        "COMPONENTS 2 ;\n\
         - u1 NAND2 + PLACED ( 0 0 ) N ;\n\
         - FE_1 BUFX2 + PLACED ( 10 0 ) N ;\n\
         END COMPONENTS\n\
         NETS 1 ;\n\
         - n1\n  ( u1 O ) ( FE_1 I )\n;\n\
         END NETS\n",
    );
    let netlist = parse_def(file.path()).unwrap();
    assert_eq!(netlist.declared_components, 2);
    assert_eq!(netlist.instances.len(), 2);
    assert_eq!(netlist.net_order, vec!["n1".to_string()]);
    assert_eq!(netlist.net_of("u1", "O"), Some("n1"));
    assert_eq!(netlist.net_of("FE_1", "I"), Some("n1"));
}

#[test]
fn top_level_port_endpoint() {
    let file = write_tmp(
        "COMPONENTS 1 ;\n\
         - u1 NAND2 + PLACED ( 0 0 ) N ;\n\
         END COMPONENTS\n\
         NETS 1 ;\n\
         - n1\n  ( u1 O ) ( PIN IO_OUT )\n;\n\
         END NETS\n",
    );
    let netlist = parse_def(file.path()).unwrap();
    let net = &netlist.nets["n1"];
    assert!(net.endpoints.contains(&PinRef::Port { pin: "IO_OUT".into() }));
}

#[test]
fn routing_lines_stop_connectivity_parsing() {
    let file = write_tmp(
        "COMPONENTS 2 ;\n\
         - u1 NAND2 + PLACED ( 0 0 ) N ;\n\
         - u2 NAND2 + PLACED ( 10 0 ) N ;\n\
         END COMPONENTS\n\
         NETS 1 ;\n\
         - n1\n  ( u1 O ) ( u2 A )\n  + ROUTED metal1 ( 0 0 ) ( 1 1 ) ;\n;\n\
         END NETS\n",
    );
    let netlist = parse_def(file.path()).unwrap();
    let net = &netlist.nets["n1"];
    assert_eq!(net.endpoints.len(), 2);
}

#[test]
fn count_mismatch_is_non_fatal() {
    let file = write_tmp(
        "COMPONENTS 5 ;\n\
         - u1 NAND2 + PLACED ( 0 0 ) N ;\n\
         END COMPONENTS\n\
         NETS 1 ;\n\
         - n1\n  ( u1 O )\n;\n\
         END NETS\n",
    );
    let netlist = parse_def(file.path()).unwrap();
    assert_eq!(netlist.declared_components, 5);
    assert_eq!(netlist.instances.len(), 1);
}
