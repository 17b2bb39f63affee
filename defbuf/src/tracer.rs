//! Chain tracer: walks from a chain-head net through buffer cells
//! (input pin -> output pin -> next net) until only non-buffer
//! endpoints remain, returning the ordered list of absorbed interior
//! nets.
//!
//! Implemented as an explicit work stack with a visited-net guard,
//! rather than recursion, so a cyclic netlist (not expected, but not
//! impossible on malformed input) cannot blow the call stack and is
//! handled as an explicit, logged condition instead.

use std::collections::HashSet;
use compact_str::CompactString;

use crate::classify::is_buffer;
use crate::netlist::{Direction, Netlist, PinRef};

/// Returns the ordered list of interior nets absorbed by `head`,
/// in depth-first, left-to-right order of each net's endpoint list.
pub fn trace_chain(netlist: &Netlist, head: &str, prefix: &str) -> Vec<CompactString> {
    let mut absorbed = Vec::new();
    let mut visited: HashSet<CompactString> = HashSet::new();
    visited.insert(head.into());

    let mut stack: Vec<CompactString> = children_of(netlist, head, prefix);
    stack.reverse();

    while let Some(net) = stack.pop() {
        if visited.contains(&net) {
            clilog::warn!(
                W_TRACE_CYCLE,
                "cycle detected tracing buffer chain from head '{}': net '{}' revisited, skipping", head, net
            );
            continue;
        }
        visited.insert(net.clone());
        let mut children = children_of(netlist, &net, prefix);
        absorbed.push(net);
        children.reverse();
        stack.extend(children);
    }

    absorbed
}

/// The nets directly reachable by crossing one buffer from `net_name`:
/// for every buffer endpoint with an INPUT pin, every OUTPUT pin of
/// that same buffer instance contributes its connected net. Multiple
/// OUTPUT pins are visited in pin-name order for determinism.
fn children_of(netlist: &Netlist, net_name: &str, prefix: &str) -> Vec<CompactString> {
    let mut out = Vec::new();
    let Some(net) = netlist.nets.get(net_name) else { return out };

    for endpoint in &net.endpoints {
        let PinRef::Cell { instance, pin } = endpoint else { continue };
        if !is_buffer(instance, prefix) {
            continue;
        }
        // INOUT buffer pins are neither chain starts nor continuations.
        if netlist.direction_of(instance, pin) != Some(Direction::Input) {
            continue;
        }
        let Some(pins) = netlist.instance_nets.get(instance.as_str()) else { continue };
        let mut output_pins: Vec<&str> = pins.keys()
            .filter(|p| netlist.direction_of(instance, p) == Some(Direction::Output))
            .map(|p| p.as_str())
            .collect();
        output_pins.sort_unstable();
        for q in output_pins {
            if let Some(downstream) = netlist.net_of(instance, q) {
                out.push(downstream.into());
            }
        }
    }
    out
}
