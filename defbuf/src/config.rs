//! Optional on-disk defaults, layered under explicit CLI flags.
//!
//! Precedence: explicit CLI flag > config file value > built-in
//! default (`buff = "FE"`). The file's absence is never an error; a
//! present-but-unparsable file is a fatal configuration error raised
//! before any ingest begins.

use std::fs;
use std::path::Path;
use serde::Deserialize;

use crate::error::{DefBufError, Result};

/// The built-in default buffer prefix, used when neither a flag nor
/// a config file specifies one.
pub const DEFAULT_BUFFER_PREFIX: &str = "FE";

/// Optional defaults read from a TOML file (default path `defbuf.toml`).
#[derive(Debug, Default, Deserialize)]
pub struct FileDefaults {
    pub buff: Option<String>,
    pub def: Option<String>,
    pub lef: Option<String>,
    pub verilog: Option<String>,
}

/// Loads `path` as a [`FileDefaults`], or returns the all-`None`
/// default if the file does not exist.
pub fn load_defaults(path: impl AsRef<Path>) -> Result<FileDefaults> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileDefaults::default()),
        Err(source) => {
            return Err(DefBufError::InputFile { what: "config", path: path.display().to_string(), source })
        }
    };
    toml::from_str(&text).map_err(|source| DefBufError::ConfigParse {
        path: path.display().to_string(),
        source,
    })
}

/// The fully-resolved set of settings a run operates under, after
/// layering CLI flags over an optional config file over the built-in
/// default.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub buffer_prefix: String,
    pub def_path: Option<String>,
    pub lef_path: Option<String>,
    pub verilog_path: Option<String>,
}

impl ResolvedSettings {
    /// Layers `cli` values over `file` defaults over the built-in
    /// default buffer prefix. A `None` CLI value falls through to the
    /// file, then to the hardcoded default (for `buff` only).
    pub fn resolve(
        cli_buff: Option<String>,
        cli_def: Option<String>,
        cli_lef: Option<String>,
        cli_verilog: Option<String>,
        file: FileDefaults,
    ) -> ResolvedSettings {
        ResolvedSettings {
            buffer_prefix: cli_buff.or(file.buff).unwrap_or_else(|| DEFAULT_BUFFER_PREFIX.to_string()),
            def_path: cli_def.or(file.def),
            lef_path: cli_lef.or(file.lef),
            verilog_path: cli_verilog.or(file.verilog),
        }
    }
}
