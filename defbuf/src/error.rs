//! Fatal error types for the defbuf pipeline.
//!
//! Non-fatal problems (count mismatches, cycles, empty chain heads)
//! never appear here; they are logged through `clilog` and the run
//! continues. Only conditions that must abort before any output is
//! written are modeled as [`DefBufError`] variants.

/// Errors that can abort a defbuf run before or during processing.
#[derive(Debug, thiserror::Error)]
pub enum DefBufError {
    /// A required input file (DEF or LEF) could not be opened.
    #[error("failed to read {what} file at {path}: {source}")]
    InputFile {
        what: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The output directory already exists and is not reusable.
    #[error("output directory {0} already exists and is not a directory")]
    OutputDirCollision(String),

    /// Creating the output directory failed for a reason other than
    /// it already existing.
    #[error("failed to create output directory {path}: {source}")]
    OutputDirCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A DEF instance's cell type has no entry in the LEF macro table,
    /// so its pin directions cannot be resolved.
    #[error("instance '{instance}' has unknown cell type '{celltype}' (not found in LEF)")]
    UnknownCellType { instance: String, celltype: String },

    /// The optional TOML defaults file exists but could not be parsed.
    #[error("failed to parse configuration file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Writing the rewritten DEF output failed.
    #[error("failed to write output DEF file {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No `-d`/`--def` input was given.
    #[error("no input DEF file given (use -d/--def)")]
    MissingDefFile,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DefBufError>;
