//! The bipartite netlist graph: macros, instances, nets, and the
//! instance-pin-net index the tracer walks across buffers.

use std::collections::HashMap;
use compact_str::CompactString;

/// Pin direction as declared by a LEF macro.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Input pin.
    Input,
    /// Output pin.
    Output,
    /// Bidirectional pin.
    Inout,
}

impl Direction {
    /// Parses the literal token used in LEF `DIRECTION` lines.
    pub fn parse(tok: &str) -> Option<Direction> {
        match tok {
            "INPUT" => Some(Direction::Input),
            "OUTPUT" => Some(Direction::Output),
            "INOUT" => Some(Direction::Inout),
            _ => None,
        }
    }
}

/// A library cell type: pin name to direction.
#[derive(Debug, Default, Clone)]
pub struct Macro {
    pub pins: HashMap<CompactString, Direction>,
}

/// One endpoint on a net: either a leaf-cell pin or a top-level port.
///
/// Modeled as a tagged variant rather than comparing instance names
/// against the literal `"PIN"`, so the port/cell distinction is
/// checked by the compiler at every call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PinRef {
    /// A pin on a placed cell instance.
    Cell { instance: CompactString, pin: CompactString },
    /// A top-level design port (DEF sentinel instance name `PIN`).
    Port { pin: CompactString },
}

impl PinRef {
    /// The sentinel instance name DEF uses for top-level ports.
    pub const PORT_SENTINEL: &'static str = "PIN";

    /// Builds a [`PinRef`] from the raw `(instance, pin)` pair as it
    /// appears in a DEF net record.
    pub fn new(instance: &str, pin: &str) -> PinRef {
        if instance == Self::PORT_SENTINEL {
            PinRef::Port { pin: pin.into() }
        } else {
            PinRef::Cell { instance: instance.into(), pin: pin.into() }
        }
    }

    /// The instance name this endpoint names a pin on, or `None` for a port.
    pub fn instance(&self) -> Option<&str> {
        match self {
            PinRef::Cell { instance, .. } => Some(instance.as_str()),
            PinRef::Port { .. } => None,
        }
    }

    /// The pin name of this endpoint.
    pub fn pin(&self) -> &str {
        match self {
            PinRef::Cell { pin, .. } => pin.as_str(),
            PinRef::Port { pin } => pin.as_str(),
        }
    }

    /// Renders this endpoint back in DEF syntax: `( instance pin )`.
    pub fn to_def_group(&self) -> String {
        match self {
            PinRef::Cell { instance, pin } => format!("( {instance} {pin} )"),
            PinRef::Port { pin } => format!("( {} {pin} )", Self::PORT_SENTINEL),
        }
    }
}

/// A named electrical node: an ordered list of pin endpoints.
#[derive(Debug, Default, Clone)]
pub struct Net {
    pub endpoints: Vec<PinRef>,
}

/// The immutable, shared netlist graph built by LEF/DEF ingest.
///
/// Handed by shared reference to the classifier, tracer, and rewriter;
/// none of them mutate it.
#[readonly::make]
#[derive(Debug, Default)]
pub struct Netlist {
    /// Cell-type name to pin-direction table, from the LEF file.
    pub macros: HashMap<CompactString, Macro>,
    /// Instance name to cell-type name, from the DEF COMPONENTS section.
    pub instances: HashMap<CompactString, CompactString>,
    /// Net name to its endpoint list, in DEF-encounter order.
    ///
    /// Also preserves the order nets were declared in, since the
    /// rewriter needs to walk the NETS section in the original order.
    pub nets: HashMap<CompactString, Net>,
    /// Net names in DEF-declaration order.
    pub net_order: Vec<CompactString>,
    /// instance -> pin -> net, the index the tracer needs to cross a
    /// buffer from its input pin to its output pin(s) in O(1).
    ///
    /// The `PIN` sentinel also gets an entry here, recording which net
    /// each top-level port name is connected to.
    pub instance_nets: HashMap<CompactString, HashMap<CompactString, CompactString>>,
    /// Number of components declared by the `COMPONENTS <n>` header.
    pub declared_components: usize,
    /// Number of nets declared by the `NETS <n>` header.
    pub declared_nets: usize,
}

impl Netlist {
    /// Merges a macro table (from LEF ingest) into this netlist.
    pub fn set_macros(&mut self, macros: HashMap<CompactString, Macro>) {
        self.macros = macros;
    }

    /// Registers a single library cell type.
    pub(crate) fn insert_macro(&mut self, celltype: CompactString, m: Macro) {
        self.macros.insert(celltype, m);
    }

    /// Declares a net with a fully-built endpoint list, in DEF-encounter order.
    pub(crate) fn insert_net(&mut self, name: CompactString, net: Net) {
        self.net_order.push(name.clone());
        self.nets.insert(name, net);
    }

    /// Records that `pin` of `instance` connects to `net_name`, without
    /// touching the net's own endpoint list.
    pub(crate) fn index_pin(&mut self, instance: CompactString, pin: CompactString, net_name: CompactString) {
        self.instance_nets.entry(instance).or_default().insert(pin, net_name);
    }

    /// Records the `COMPONENTS <n>` header count.
    pub(crate) fn set_declared_components(&mut self, n: usize) {
        self.declared_components = n;
    }

    /// Records the `NETS <n>` header count.
    pub(crate) fn set_declared_nets(&mut self, n: usize) {
        self.declared_nets = n;
    }

    /// Registers a placed instance and its cell type.
    pub(crate) fn insert_instance(&mut self, instance: CompactString, celltype: CompactString) {
        self.instance_nets.entry(instance.clone()).or_default();
        self.instances.insert(instance, celltype);
    }

    /// Declares a new, empty net, in DEF-encounter order.
    pub(crate) fn start_net(&mut self, name: CompactString) {
        self.net_order.push(name.clone());
        self.nets.insert(name, Net::default());
    }

    /// Adds one `(instance, pin)` endpoint to `net_name`, and records
    /// it in the instance/pin -> net index.
    pub(crate) fn add_endpoint(&mut self, net_name: &str, instance: CompactString, pin: CompactString) {
        let endpoint = PinRef::new(instance.as_str(), pin.as_str());
        if let Some(net) = self.nets.get_mut(net_name) {
            net.endpoints.push(endpoint);
        }
        self.instance_nets.entry(instance).or_default().insert(pin, net_name.into());
    }

    /// Looks up the direction of `pin` on the cell type of `instance`.
    ///
    /// Returns `None` if the instance or its cell type's pin table
    /// does not know about this pin.
    pub fn direction_of(&self, instance: &str, pin: &str) -> Option<Direction> {
        let celltype = self.instances.get(instance)?;
        let r#macro = self.macros.get(celltype)?;
        r#macro.pins.get(pin).copied()
    }

    /// The cell-type name of `instance`, if known.
    pub fn celltype_of(&self, instance: &str) -> Option<&str> {
        self.instances.get(instance).map(|s| s.as_str())
    }

    /// All pin names declared for the cell type of `instance`, if known.
    pub fn pins_of_celltype(&self, instance: &str) -> Option<impl Iterator<Item = (&str, Direction)>> {
        let celltype = self.instances.get(instance)?;
        let r#macro = self.macros.get(celltype)?;
        Some(r#macro.pins.iter().map(|(p, d)| (p.as_str(), *d)))
    }

    /// Looks up the net connected to `pin` of `instance` (or of the
    /// `PIN` sentinel for top-level ports).
    pub fn net_of(&self, instance: &str, pin: &str) -> Option<&str> {
        self.instance_nets.get(instance)?.get(pin).map(|s| s.as_str())
    }

    /// Checks every placed instance's cell type is present in the
    /// macro table. A missing cell type leaves pin directions
    /// unresolvable for that instance, which the classifier and
    /// tracer cannot recover from.
    pub fn validate_celltypes(&self) -> crate::error::Result<()> {
        for (instance, celltype) in &self.instances {
            if !self.macros.contains_key(celltype.as_str()) {
                return Err(crate::error::DefBufError::UnknownCellType {
                    instance: instance.to_string(),
                    celltype: celltype.to_string(),
                });
            }
        }
        Ok(())
    }
}
