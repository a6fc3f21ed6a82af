//! Inbound adapters that translate external requests into registry calls
//! while keeping parsing and presentation at the edge.
//!
//! The command-line adapter lives under [`cli`].

pub mod cli;
