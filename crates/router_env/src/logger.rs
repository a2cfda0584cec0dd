//!
//! Logger of the system.
//!

pub use tracing::{debug, error, event as log, info, instrument, trace, warn, Level};

#[doc(inline)]
pub use self::{config::*, setup::*};

pub mod config;
mod setup;
