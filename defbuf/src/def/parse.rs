//! The DEF ingest state machine (see module docs in `def/mod.rs`).
//!
//! Implemented as an explicit state-tagged enum over a line scanner,
//! not as regex matching: DEF files run to the hundreds of megabytes
//! and compiling a handful of patterns per line does not scale.

use std::fs;
use std::path::Path;
use compact_str::CompactString;

use crate::error::{DefBufError, Result};
use crate::netlist::Netlist;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    PreComponents,
    Components,
    Nets,
}

/// Keywords whose presence ends the connectivity portion of a net
/// record; everything after is routing/property data we don't retain.
const NET_DETAIL_TERMINATORS: &[&str] = &[
    "ROUTED", ";", "PROPERTY", "SOURCE", "+ USE", "+ WEIGHT", "NONDEFAULTRULE",
];

/// Parses a DEF file into a fresh [`Netlist`] (its macro table is
/// populated separately, by LEF ingest, and merged in by the caller).
pub fn parse_def(path: impl AsRef<Path>) -> Result<Netlist> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DefBufError::InputFile {
        what: "DEF",
        path: path.display().to_string(),
        source,
    })?;

    let mut netlist = Netlist::default();
    let mut phase = Phase::PreComponents;
    let mut in_net_details = false;
    let mut current_net: Option<CompactString> = None;
    let mut parsed_components = 0usize;
    let mut parsed_nets = 0usize;

    for line in text.lines() {
        match phase {
            Phase::PreComponents => {
                if let Some(n) = parse_count_after(line, "COMPONENTS") {
                    netlist.set_declared_components(n);
                    phase = Phase::Components;
                    clilog::info!(I_DEF_EXPECT_COMPONENTS, "expecting {} components", n);
                }
            }
            Phase::Components => {
                if let Some((instance, celltype)) = parse_component_record(line) {
                    netlist.insert_instance(instance.into(), celltype.into());
                    parsed_components += 1;
                }
                if let Some(n) = parse_count_at_start(line, "NETS") {
                    netlist.set_declared_nets(n);
                    phase = Phase::Nets;
                    clilog::info!(I_DEF_EXPECT_NETS, "expecting {} nets", n);
                }
            }
            Phase::Nets => {
                if line.contains("END NETS") {
                    break;
                }
                if !in_net_details {
                    if let Some(name) = parse_net_start(line) {
                        let name: CompactString = name.into();
                        netlist.start_net(name.clone());
                        current_net = Some(name);
                        in_net_details = true;
                        parsed_nets += 1;
                    }
                } else if let Some(net_name) = current_net.clone() {
                    if NET_DETAIL_TERMINATORS.iter().any(|kw| line.contains(kw)) {
                        in_net_details = false;
                    } else {
                        for (instance, pin) in parse_pin_groups(line) {
                            netlist.add_endpoint(net_name.as_str(), instance.into(), pin.into());
                        }
                    }
                }
            }
        }
    }

    if netlist.declared_components > 0 && parsed_components != netlist.declared_components {
        clilog::warn!(
            W_DEF_COMPONENT_COUNT_MISMATCH,
            "found {} components out of {} expected", parsed_components, netlist.declared_components
        );
    }
    if netlist.declared_nets > 0 && parsed_nets != netlist.declared_nets {
        clilog::warn!(
            W_DEF_NET_COUNT_MISMATCH,
            "found {} nets out of {} expected", parsed_nets, netlist.declared_nets
        );
    }

    Ok(netlist)
}

/// Matches a `COMPONENTS <n>` token anywhere in the line.
pub(crate) fn parse_count_after(line: &str, keyword: &str) -> Option<usize> {
    let idx = line.find(keyword)?;
    let rest = line[idx + keyword.len()..].trim_start();
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() { None } else { digits.parse().ok() }
}

/// Matches a `NETS <n>` token anchored at the start of the line.
pub(crate) fn parse_count_at_start(line: &str, keyword: &str) -> Option<usize> {
    if !line.starts_with(keyword) {
        return None;
    }
    parse_count_after(line, keyword)
}

/// Matches a component record `- <instance> <cell-type> +`.
pub(crate) fn parse_component_record(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix("- ")?;
    let mut tokens = rest.split_whitespace();
    let instance = tokens.next()?;
    let celltype = tokens.next()?;
    if tokens.next() != Some("+") {
        return None;
    }
    Some((instance, celltype))
}

/// Matches a net-starting record `- <net-name>`.
pub(crate) fn parse_net_start(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("- ")?;
    rest.split_whitespace().next()
}

/// Splits a connectivity line on `)` and extracts every `( <instance> <pin>`
/// segment.
pub(crate) fn parse_pin_groups(line: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for segment in line.split(')') {
        let Some(paren) = segment.find('(') else { continue };
        let mut tokens = segment[paren + 1..].split_whitespace();
        let (Some(instance), Some(pin)) = (tokens.next(), tokens.next()) else { continue };
        out.push((instance.to_string(), pin.to_string()));
    }
    out
}

