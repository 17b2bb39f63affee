//! DEF rewriter: streams the DEF file a second time, skipping buffer
//! components, dropping interior nets, and splicing a synthesized
//! merged record in place of each chain-head net.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use compact_str::CompactString;

use super::parse::{parse_component_record, parse_count_after, parse_count_at_start, parse_net_start};
use crate::classify::is_buffer;
use crate::error::{DefBufError, Result};
use crate::netlist::{Direction, Netlist, PinRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Outside,
    Components,
    Nets,
    Done,
}

/// Summary of what a rewrite pass did, for the run log and the CLI's
/// final one-line report.
#[derive(Debug, Default, Clone)]
pub struct RewriteSummary {
    pub deleted_buffers: usize,
    pub deleted_nets: usize,
    pub chains_collapsed: usize,
}

/// Streams `def_path` and returns the rewritten DEF text plus a
/// summary of what was removed.
///
/// `chains` maps each chain-head net name to the ordered list of
/// interior nets it absorbs, as produced by [`crate::tracer::trace_chain`].
pub fn rewrite_def(
    def_path: impl AsRef<Path>,
    netlist: &Netlist,
    prefix: &str,
    chains: &HashMap<CompactString, Vec<CompactString>>,
    program: &str,
) -> Result<(String, RewriteSummary)> {
    let def_path = def_path.as_ref();
    let text = fs::read_to_string(def_path).map_err(|source| DefBufError::InputFile {
        what: "DEF",
        path: def_path.display().to_string(),
        source,
    })?;

    let nets_to_delete: HashSet<&CompactString> = chains.values().flatten().collect();

    let mut out = String::with_capacity(text.len());
    write_preamble(&mut out, prefix, program, &def_path.display().to_string());

    let mut phase = Phase::Outside;
    let mut deleting_component = false;
    let mut deleting_net = false;

    let mut declared_components = 0usize;
    let mut components_count_range: Option<std::ops::Range<usize>> = None;
    let mut deleted_buffers = 0usize;

    let mut declared_nets = 0usize;
    let mut nets_count_range: Option<std::ops::Range<usize>> = None;
    let mut deleted_nets = 0usize;
    let mut chains_collapsed = 0usize;

    for line in text.lines() {
        let mut emit = true;

        match phase {
            Phase::Outside => {
                if let Some(n) = parse_count_after(line, "COMPONENTS") {
                    declared_components = n;
                    components_count_range = Some(digit_range(&out, line, "COMPONENTS"));
                    phase = Phase::Components;
                } else if let Some(n) = parse_count_at_start(line, "NETS") {
                    declared_nets = n;
                    nets_count_range = Some(digit_range(&out, line, "NETS"));
                    phase = Phase::Nets;
                }
            }
            Phase::Components => {
                if line.trim() == "END COMPONENTS" {
                    phase = Phase::Outside;
                    if let Some(range) = components_count_range.take() {
                        let new_count = declared_components.saturating_sub(deleted_buffers);
                        out.replace_range(range, &new_count.to_string());
                    }
                    clilog::info!(
                        I_REWRITE_COMPONENTS_DONE,
                        "deleted {} buffers out of {} instances in COMPONENTS", deleted_buffers, declared_components
                    );
                } else if let Some((instance, _celltype)) = parse_component_record(line) {
                    if is_buffer(instance, prefix) {
                        deleting_component = true;
                        deleted_buffers += 1;
                    }
                }
                if deleting_component {
                    emit = false;
                    if line.contains(';') {
                        deleting_component = false;
                    }
                }
            }
            Phase::Nets => {
                if line.trim() == "END NETS" {
                    phase = Phase::Done;
                    if let Some(range) = nets_count_range.take() {
                        let new_count = declared_nets.saturating_sub(deleted_nets);
                        out.replace_range(range, &new_count.to_string());
                    }
                    clilog::info!(
                        I_REWRITE_NETS_DONE,
                        "deleted {} nets out of {} in NETS", deleted_nets, declared_nets
                    );
                } else if let Some(name) = parse_net_start(line) {
                    if nets_to_delete.contains(&CompactString::from(name)) {
                        deleting_net = true;
                    } else if let Some(absorbed) = chains.get(name) {
                        let record = synthesize_chain_head_record(netlist, name, absorbed, prefix);
                        out.push_str(&record);
                        deleted_nets += absorbed.len();
                        chains_collapsed += 1;
                        deleting_net = true;
                        emit = false;
                    }
                }
                if deleting_net {
                    emit = false;
                    if line.contains(';') {
                        deleting_net = false;
                    }
                }
            }
            Phase::Done => {
                // Lines after END NETS are copied through unchanged.
            }
        }

        if emit {
            out.push_str(line);
            out.push('\n');
        }
    }

    Ok((out, RewriteSummary { deleted_buffers, deleted_nets, chains_collapsed }))
}

/// Writes a single four-line comment banner: buffer prefix, UTC
/// timestamp, program identity, and source DEF path. Each line ends
/// with exactly one newline.
fn write_preamble(out: &mut String, prefix: &str, program: &str, def_path: &str) {
    let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    out.push_str(&format!("# Buffer prefix: {prefix}\n"));
    out.push_str(&format!("# Generated on: {now}\n"));
    out.push_str(&format!("# Generated by: {program}\n"));
    out.push_str(&format!("# Source DEF: {def_path}\n"));
}

/// Finds the byte range of the digit run following `keyword` in
/// `line`, offset by the current length of `out` (i.e. where `line`
/// is about to be appended). Used to bookmark `COMPONENTS <n>` /
/// `NETS <n>` tokens for later back-patching.
fn digit_range(out: &str, line: &str, keyword: &str) -> std::ops::Range<usize> {
    let idx = line.find(keyword).expect("keyword must be present");
    let after_keyword = idx + keyword.len();
    let rest = &line[after_keyword..];
    let ws_len = rest.len() - rest.trim_start().len();
    let digit_start = after_keyword + ws_len;
    let digits_len = line[digit_start..].chars().take_while(|c| c.is_ascii_digit()).count();
    let base = out.len();
    (base + digit_start)..(base + digit_start + digits_len)
}

/// Builds the synthesized replacement record for a chain head: the
/// net name, then one `( instance pin )` line per non-buffer endpoint
/// of the head followed by each absorbed net (in tracer order), then
/// a closing `;`. Routing, properties, and attributes are discarded.
fn synthesize_chain_head_record(
    netlist: &Netlist,
    head: &str,
    absorbed: &[CompactString],
    prefix: &str,
) -> String {
    let mut endpoints: Vec<&PinRef> = Vec::new();
    if let Some(net) = netlist.nets.get(head) {
        endpoints.extend(non_buffer_endpoints(net, prefix));
    }
    for net_name in absorbed {
        if let Some(net) = netlist.nets.get(net_name.as_str()) {
            endpoints.extend(non_buffer_endpoints(net, prefix));
        }
    }

    if endpoints.is_empty() {
        clilog::warn!(
            W_REWRITE_EMPTY_HEAD,
            "chain head '{}' has no non-buffer endpoints after tracing; emitting an empty net record", head
        );
    }

    let drivers = endpoints.iter().filter(|e| is_non_buffer_output_driver(netlist, e, prefix)).count();
    if drivers > 1 {
        clilog::warn!(
            W_REWRITE_MULTI_DRIVER,
            "chain head '{}' merges {} non-buffer OUTPUT drivers onto one net; correctness of this merge is not certified", head, drivers
        );
    }

    let mut record = String::new();
    record.push_str(&format!("- {head}\n"));
    for endpoint in endpoints {
        record.push_str("  ");
        record.push_str(&endpoint.to_def_group());
        record.push('\n');
    }
    record.push_str(";\n");
    record
}

fn non_buffer_endpoints<'n>(net: &'n crate::netlist::Net, prefix: &str) -> impl Iterator<Item = &'n PinRef> {
    net.endpoints.iter().filter(move |e| !e.instance().map_or(false, |i| is_buffer(i, prefix)))
}

fn is_non_buffer_output_driver(netlist: &Netlist, endpoint: &PinRef, prefix: &str) -> bool {
    match endpoint {
        PinRef::Port { .. } => false,
        PinRef::Cell { instance, pin } => {
            !is_buffer(instance, prefix)
                && netlist.direction_of(instance, pin) == Some(Direction::Output)
        }
    }
}

