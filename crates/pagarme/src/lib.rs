#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

//!
//! Pagar.me connector.
//!
//! Builds the provider's JSON payloads for every supported operation from a gateway-agnostic
//! card, customer and amount model, and interprets the provider's responses into a uniform
//! result.
//!

pub mod configs;
pub mod connector;
pub mod types;
pub mod utils;

pub use self::connector::Pagarme;
