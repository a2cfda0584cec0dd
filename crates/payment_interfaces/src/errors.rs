//! Errors interface

/// Error raised while building a connector request or interpreting its response.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConnectorError {
    /// Failed to encode connector request
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    /// Failed to deserialize connector response
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    /// Failed to execute a processing step
    #[error("Failed to execute a processing step")]
    ProcessingStepFailed,
    /// Missing required field
    #[error("Missing required field: {field_name}")]
    MissingRequiredField {
        /// name of the missing field, as it is called on the wire
        field_name: &'static str,
    },
    /// Invalid data format
    #[error("Invalid data format for field: {field_name}")]
    InvalidDataFormat {
        /// name of the malformed field
        field_name: &'static str,
    },
    /// Failed to obtain authentication type
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    /// Flow not supported
    #[error("{flow} flow not supported by {connector} connector")]
    FlowNotSupported {
        /// flow name
        flow: String,
        /// connector name
        connector: String,
    },
}

/// Error raised by the [`crate::transport::Transport`] collaborator.
///
/// Only transport-level failures are reported here; any completed HTTP exchange with a status
/// below 500 is a [`crate::types::Response`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established
    #[error("Failed to establish a connection with the connector")]
    ConnectionFailed,
    /// Request timed out
    #[error("Connector request timed out")]
    RequestTimeout,
    /// The connector answered with a server error
    #[error("Connector responded with server error status {status_code}")]
    ServerError {
        /// HTTP status code
        status_code: u16,
    },
}
