//! Connector interface
#![warn(missing_docs, missing_debug_implementations)]

pub mod api;
/// Configuration related functionalities
pub mod configs;
/// Constants used throughout the connector crates
pub mod consts;
pub mod errors;
pub mod transport;
pub mod types;
