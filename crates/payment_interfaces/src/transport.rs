//! The transport collaborator and the build → send → interpret pipeline.

use common_utils::{errors::CustomResult, request::Request};
use error_stack::{report, ResultExt};
use router_env::{instrument, logger};

use crate::{
    api::ConnectorIntegration,
    configs::Connectors,
    errors::{ConnectorError, TransportError},
    types::{self, RouterData},
};

/// Sends a fully built request and returns the raw response.
///
/// Implementations return `Ok` for every completed HTTP exchange answered with a status below
/// 500, so that provider error bodies reach the response interpreter. Connectivity failures,
/// timeouts and server errors are reported as [`TransportError`].
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Perform the HTTP exchange
    async fn send(&self, request: Request) -> CustomResult<types::Response, TransportError>;
}

/// Build the request for a flow, send it through `transport` and interpret the response.
///
/// Validation failures abort before anything is sent. The returned router data carries the
/// interpreted response, which may itself describe a provider-side failure.
#[instrument(skip_all)]
pub async fn execute_connector_processing_step<T, Req, Resp>(
    transport: &dyn Transport,
    connector_integration: &dyn ConnectorIntegration<T, Req, Resp>,
    mut router_data: RouterData<T, Req, Resp>,
    connectors: &Connectors,
) -> CustomResult<RouterData<T, Req, Resp>, ConnectorError> {
    let connector = connector_integration.id();
    let Some(request) = connector_integration.build_request(&router_data, connectors)? else {
        logger::debug!(connector, "No request to send for flow");
        return Ok(router_data);
    };

    logger::debug!(
        connector,
        method = %request.method,
        url = %request.url,
        "Sending connector request"
    );

    let response = transport
        .send(request)
        .await
        .change_context(ConnectorError::ProcessingStepFailed)?;

    if response.status_code >= 500 {
        logger::error!(connector, status_code = response.status_code, "Connector server error");
        return Err(report!(TransportError::ServerError {
            status_code: response.status_code,
        })
        .change_context(ConnectorError::ProcessingStepFailed));
    }

    logger::debug!(
        connector,
        status_code = response.status_code,
        "Received connector response"
    );

    let interpreted = connector_integration.handle_response(&router_data, response)?;
    router_data.response = Some(interpreted);
    Ok(router_data)
}
