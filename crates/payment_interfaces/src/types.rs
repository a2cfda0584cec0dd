//! Types interface

use std::marker::PhantomData;

use masking::Secret;
use serde::Deserialize;

/// Raw HTTP response as handed back by the transport
#[derive(Clone, Debug)]
pub struct Response {
    /// response body
    pub response: bytes::Bytes,
    /// status code
    pub status_code: u16,
}

/// Credentials a connector authenticates with.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    /// Key sent in a request header
    HeaderKey {
        /// API key
        api_key: Secret<String>,
    },
    /// Key sent as part of the request body or query string
    BodyKey {
        /// API key
        api_key: Secret<String>,
    },
    /// No credentials configured
    #[default]
    NoKey,
}

/// Everything one connector call needs: the flow marker, credentials, the flow's request data
/// and, once the call has completed, the interpreted response.
#[derive(Debug, Clone)]
pub struct RouterData<Flow, Request, Response> {
    /// flow marker
    pub flow: PhantomData<Flow>,
    /// credentials
    pub connector_auth_type: ConnectorAuthType,
    /// flow specific request data
    pub request: Request,
    /// interpreted connector response
    pub response: Option<Response>,
}

impl<Flow, Request, Response> RouterData<Flow, Request, Response> {
    /// Router data for a call that has not been sent yet
    pub fn new(connector_auth_type: ConnectorAuthType, request: Request) -> Self {
        Self {
            flow: PhantomData,
            connector_auth_type,
            request,
            response: None,
        }
    }
}

/// Flow marker types
pub mod flows {
    /// Authorize a payment, capturing it immediately when requested
    #[derive(Debug, Clone)]
    pub struct Authorize;

    /// Capture a previously authorized payment
    #[derive(Debug, Clone)]
    pub struct Capture;

    /// Cancel a payment
    #[derive(Debug, Clone)]
    pub struct Void;

    /// Refund a payment
    #[derive(Debug, Clone)]
    pub struct Execute;

    /// Retrieve a payment
    #[derive(Debug, Clone)]
    pub struct PSync;

    /// Store a card with the connector
    #[derive(Debug, Clone)]
    pub struct PaymentMethodToken;

    /// Create a customer with the connector
    #[derive(Debug, Clone)]
    pub struct CreateConnectorCustomer;

    /// Ask the connector for an installments plan
    #[derive(Debug, Clone)]
    pub struct CalculateInstallments;
}
