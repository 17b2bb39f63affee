//! LEF ingest: scans macro/pin/direction triples into the macro table.

use std::fs;
use std::path::Path;
use compact_str::CompactString;

use crate::error::{DefBufError, Result};
use crate::netlist::{Direction, Macro};

/// Parses a LEF file into a cell-type name to pin-direction table.
///
/// Scans the file line by line rather than with a grammar parser: LEF
/// macro/pin/direction blocks are regular enough that a small
/// state-tagged scan covers everything the chain tracer needs.
pub fn parse_lef(path: impl AsRef<Path>) -> Result<std::collections::HashMap<CompactString, Macro>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DefBufError::InputFile {
        what: "LEF",
        path: path.display().to_string(),
        source,
    })?;

    let mut macros = std::collections::HashMap::new();
    let mut current: Option<(CompactString, Macro)> = None;
    let mut pending_pin: Option<CompactString> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        let mut tokens = trimmed.split_whitespace();
        let Some(first) = tokens.next() else { continue };

        match first {
            "MACRO" => {
                if let Some((name, r#macro)) = current.take() {
                    macros.insert(name, r#macro);
                }
                if let Some(name) = tokens.next() {
                    current = Some((name.into(), Macro::default()));
                }
                pending_pin = None;
            }
            "PIN" if current.is_some() => {
                pending_pin = tokens.next().map(CompactString::from);
            }
            "DIRECTION" if current.is_some() => {
                let (_, r#macro) = current.as_mut().unwrap();
                match (&pending_pin, tokens.next().and_then(Direction::parse)) {
                    (Some(pin), Some(dir)) => {
                        r#macro.pins.insert(pin.clone(), dir);
                    }
                    _ => {
                        // DIRECTION before any PIN in this macro, or an
                        // unrecognized direction token: silently skipped.
                        clilog::warn!(
                            W_LEF_BADDIR,
                            "malformed pin direction in macro; ignoring line: {}", trimmed
                        );
                    }
                }
            }
            _ if current.is_some() => {
                if trimmed == format!("END {}", current.as_ref().unwrap().0) {
                    let (name, r#macro) = current.take().unwrap();
                    macros.insert(name, r#macro);
                    pending_pin = None;
                }
                // Unrecognized tokens inside a macro block are ignored.
            }
            _ => {}
        }
    }
    if let Some((name, r#macro)) = current.take() {
        macros.insert(name, r#macro);
    }

    Ok(macros)
}
