#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

//!
//! Utilities shared by the payment connector crates: error reports, parsing extensions,
//! amount types and the outgoing request model.
//!

pub mod consts;
pub mod errors;
pub mod ext_traits;
pub mod request;
pub mod types;
