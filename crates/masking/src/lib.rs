#![forbid(unsafe_code)]
#![warn(missing_docs)]

//!
//! Personal Identifiable Information protection. Wrapper types and traits for secret management
//! which keep card data, taxpayer documents, phone numbers and API keys out of `Debug` output
//! and logs, while still letting them reach the wire when a request is serialized.
//!

mod strategy;

pub use strategy::{ApiKey, Strategy, WithType};
mod abs;
pub use abs::{ExposeInterface, ExposeOptionInterface, PeekInterface};

mod secret;
pub use secret::Secret;

#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "serde")]
pub use crate::serde::SerializableSecret;

/// This module should be included with asterisk.
///
/// `use masking::prelude::*;`
///
pub mod prelude {
    pub use super::{ExposeInterface, ExposeOptionInterface, PeekInterface};
}

pub mod maskable;

pub use maskable::*;
