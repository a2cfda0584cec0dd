//! API interface

use common_utils::{
    consts::APPLICATION_JSON,
    errors::CustomResult,
    request::{Method, Request, RequestBuilder, RequestContent},
};
use masking::Maskable;

use crate::{
    configs::Connectors,
    errors,
    types::{self, ConnectorAuthType, RouterData},
};

/// The trait that provides the common
pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// HTTP header used for authorization.
    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(Vec::new())
    }

    /// HTTP `Content-Type` to be used for POST requests.
    /// Defaults to `application/json`.
    fn common_get_content_type(&self) -> &'static str {
        APPLICATION_JSON
    }

    /// The base URL for interacting with the connector's API.
    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str;
}

/// trait ConnectorIntegration
pub trait ConnectorIntegration<T, Req, Resp>: Sync + ConnectorCommon {
    /// fn get_headers
    fn get_headers(
        &self,
        _req: &RouterData<T, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(vec![])
    }

    /// fn get_http_method
    fn get_http_method(&self) -> Method {
        Method::Post
    }

    /// fn get_url
    fn get_url(
        &self,
        _req: &RouterData<T, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(String::new())
    }

    /// Query string of the request, for flows that carry one
    fn get_request_query(
        &self,
        _req: &RouterData<T, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        Ok(None)
    }

    /// Body of the request, for flows that carry one
    fn get_request_body(
        &self,
        _req: &RouterData<T, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        Ok(None)
    }

    /// Assemble the outgoing request from the pieces above
    fn build_request(
        &self,
        req: &RouterData<T, Req, Resp>,
        connectors: &Connectors,
    ) -> CustomResult<Option<Request>, errors::ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(self.get_http_method())
                .url(&self.get_url(req, connectors)?)
                .headers(self.get_headers(req, connectors)?)
                .set_optional_query(self.get_request_query(req, connectors)?)
                .set_optional_body(self.get_request_body(req, connectors)?)
                .build(),
        ))
    }

    /// Interpret a completed HTTP exchange
    fn handle_response(
        &self,
        _data: &RouterData<T, Req, Resp>,
        _res: types::Response,
    ) -> CustomResult<Resp, errors::ConnectorError> {
        Err(errors::ConnectorError::FlowNotSupported {
            flow: std::any::type_name::<T>().to_string(),
            connector: self.id().to_string(),
        }
        .into())
    }
}

/// Extended trait for connector common to allow functions with generic type
pub trait ConnectorCommonExt<Flow, Req, Resp>:
    ConnectorCommon + ConnectorIntegration<Flow, Req, Resp>
{
    /// common header builder when every request for the connector have same headers
    fn build_headers(
        &self,
        _req: &RouterData<Flow, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(Vec::new())
    }
}
