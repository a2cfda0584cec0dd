//! Commonly used constants

/// Number of minor units in one major unit for the currencies handled here (BRL)
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Maximum number of fractional digits accepted in a major-unit amount string
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Content type used for every JSON request body
pub const APPLICATION_JSON: &str = "application/json";

/// Base64 engine used for HTTP Basic credentials
pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;
