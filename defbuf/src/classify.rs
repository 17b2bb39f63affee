//! Buffer classification: which nets are buffered, and which of those
//! are chain heads versus interior segments.

use std::collections::HashSet;
use compact_str::CompactString;

use crate::netlist::{Direction, Netlist, PinRef};

/// Returns true iff `instance` is a buffer under `prefix`.
#[inline]
pub fn is_buffer(instance: &str, prefix: &str) -> bool {
    instance.starts_with(prefix)
}

/// The result of classifying every net in the netlist.
#[derive(Debug, Default)]
pub struct Classification {
    /// Every net touched by at least one buffer instance.
    pub buffered: HashSet<CompactString>,
    /// The subset of `buffered` that is a chain head: driven by a
    /// non-buffer OUTPUT pin.
    pub chain_heads: HashSet<CompactString>,
}

/// Classifies every net in `netlist` under the given buffer `prefix`.
pub fn classify(netlist: &Netlist, prefix: &str) -> Classification {
    let mut buffered = HashSet::new();
    for (name, net) in &netlist.nets {
        let has_buffer = net.endpoints.iter().any(|e| {
            e.instance().map_or(false, |i| is_buffer(i, prefix))
        });
        if has_buffer {
            buffered.insert(name.clone());
        }
    }

    let mut chain_heads = HashSet::new();
    for name in &buffered {
        let net = &netlist.nets[name];
        let is_head = net.endpoints.iter().any(|e| match e {
            PinRef::Port { .. } => false,
            PinRef::Cell { instance, pin } => {
                !is_buffer(instance, prefix)
                    && netlist.direction_of(instance, pin) == Some(Direction::Output)
            }
        });
        if is_head {
            chain_heads.insert(name.clone());
        }
    }

    clilog::info!(
        I_CLASSIFY_SUMMARY,
        "buffered nets: {}/{} ({} chain heads)",
        buffered.len(), netlist.nets.len(), chain_heads.len()
    );

    Classification { buffered, chain_heads }
}
