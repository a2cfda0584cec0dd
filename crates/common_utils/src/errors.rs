//! Error types shared by the workspace crates

/// `Result` whose error side is an [`error_stack::Report`], so each layer can add its own
/// context on the way up.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// A string, byte buffer or amount could not be parsed into the expected type
#[derive(Debug, thiserror::Error)]
#[error("Failed to parse value")]
pub struct ParsingError;

/// A value could not be encoded for the wire
#[derive(Debug, thiserror::Error)]
#[error("Failed to encode value")]
pub struct EncodingError;
