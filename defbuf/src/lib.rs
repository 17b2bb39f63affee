//! Collapses buffer chains out of a placed DEF netlist.
//!
//! A buffer chain is a run of library cells, identified by instance
//! name prefix, spliced transparently between a driver and its loads.
//! This crate reads a LEF macro table and a placed DEF, finds every
//! such chain, and rewrites the DEF with the buffers and their
//! interior nets removed, merging each chain's endpoints onto the net
//! its head net already carried.

pub mod error;
pub mod netlist;
pub mod lef;
pub mod def;
pub mod classify;
pub mod tracer;
pub mod config;
pub mod cli;

pub use error::{DefBufError, Result};
pub use netlist::Netlist;
