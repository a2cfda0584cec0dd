pub mod requests;
pub mod responses;

use std::fmt::Debug;

use base64::Engine;
use common_utils::{
    consts,
    errors::CustomResult,
    ext_traits::Encode,
    request::{Method, RequestContent},
};
use error_stack::{report, ResultExt};
use masking::{Mask, Maskable, PeekInterface};
use payment_interfaces::{
    api::{ConnectorCommon, ConnectorCommonExt, ConnectorIntegration},
    configs::Connectors,
    consts::headers,
    errors,
    types::{
        flows::{
            Authorize, CalculateInstallments, Capture, CreateConnectorCustomer, Execute, PSync,
            PaymentMethodToken, Void,
        },
        ConnectorAuthType, Response, RouterData,
    },
};
use router_env::logger;
use serde::Serialize;

use self::{requests as pagarme, responses::PagarmeResponse};
use crate::{
    types::{
        ConnectorCustomerData, ConnectorCustomerRouterData, InstallmentsRequestData,
        InstallmentsRouterData, PaymentMethodTokenizationData, PaymentsAuthorizeData,
        PaymentsAuthorizeRouterData, PaymentsCancelData, PaymentsCancelRouterData,
        PaymentsCaptureData, PaymentsCaptureRouterData, PaymentsSyncData,
        PaymentsSyncRouterData, RefundsData, RefundsRouterData, TokenizationRouterData,
    },
    utils::missing_field_err,
};

#[derive(Clone, Debug)]
pub struct Pagarme;

impl Pagarme {
    pub fn new() -> &'static Self {
        &Self
    }

    fn authenticated_body<T: Serialize + Debug>(
        &self,
        inner: T,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        let auth = pagarme::PagarmeAuthType::try_from(auth_type)?;
        pagarme::PagarmeAuthenticatedRequest::new(inner, &auth)
            .encode_to_value()
            .change_context(errors::ConnectorError::RequestEncodingFailed)
            .map(RequestContent::Json)
    }

    fn authenticated_query<T: Serialize + Debug>(
        &self,
        inner: T,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let auth = pagarme::PagarmeAuthType::try_from(auth_type)?;
        let pairs = pagarme::PagarmeAuthenticatedRequest::new(inner, &auth)
            .encode_to_query_pairs()
            .change_context(errors::ConnectorError::RequestEncodingFailed)?;
        Ok((!pairs.is_empty()).then_some(RequestContent::Query(pairs)))
    }

    fn interpret_response(
        &self,
        flow: &'static str,
        res: Response,
    ) -> CustomResult<PagarmeResponse, errors::ConnectorError> {
        let response = PagarmeResponse::try_from(&res.response).inspect_err(|_| {
            logger::error!(
                flow,
                status_code = res.status_code,
                "Connector response is not a JSON object"
            );
        })?;
        logger::info!(
            flow,
            status_code = res.status_code,
            successful = response.is_successful(),
            connector_response = ?response
        );
        Ok(response)
    }
}

/// The reference is placed in the URL path, so it must be a single plain segment
fn transaction_reference(
    connector_transaction_id: Option<&String>,
) -> CustomResult<&str, errors::ConnectorError> {
    let id = connector_transaction_id
        .map(String::as_str)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(missing_field_err("transaction_reference"))?;
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(report!(errors::ConnectorError::InvalidDataFormat {
            field_name: "transaction_reference",
        }))
        .attach_printable("Transaction reference is not a plain path segment");
    }
    Ok(id)
}

impl<Flow, Req, Resp> ConnectorCommonExt<Flow, Req, Resp> for Pagarme
where
    Self: ConnectorIntegration<Flow, Req, Resp>,
{
    fn build_headers(
        &self,
        req: &RouterData<Flow, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let mut header = vec![
            (
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            ),
            (
                headers::ACCEPT.to_string(),
                self.common_get_content_type().to_string().into(),
            ),
        ];
        let mut api_key = self.get_auth_header(&req.connector_auth_type)?;
        header.append(&mut api_key);
        Ok(header)
    }
}

impl ConnectorCommon for Pagarme {
    fn id(&self) -> &'static str {
        "pagarme"
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let auth = pagarme::PagarmeAuthType::try_from(auth_type)
            .change_context(errors::ConnectorError::FailedToObtainAuthType)?;
        match auth {
            pagarme::PagarmeAuthType::BasicAuth { api_key } => {
                let encoded = consts::BASE64_ENGINE.encode(format!("{}:", api_key.peek()));
                Ok(vec![(
                    headers::AUTHORIZATION.to_string(),
                    format!("Basic {encoded}").into_masked(),
                )])
            }
            pagarme::PagarmeAuthType::BodyKey { .. } => Ok(vec![]),
        }
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.pagarme.base_url.as_ref()
    }
}

impl ConnectorIntegration<Authorize, PaymentsAuthorizeData, PagarmeResponse> for Pagarme {
    fn get_headers(
        &self,
        req: &PaymentsAuthorizeRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        _req: &PaymentsAuthorizeRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!("{}transactions", self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &PaymentsAuthorizeRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let connector_req = pagarme::PagarmeTransactionRequest::try_from(req)?;
        logger::debug!(
            payment_method = %connector_req.payment_method,
            capture = ?connector_req.capture,
            "Built transaction request"
        );
        self.authenticated_body(connector_req, &req.connector_auth_type)
            .map(Some)
    }

    fn handle_response(
        &self,
        _data: &PaymentsAuthorizeRouterData,
        res: Response,
    ) -> CustomResult<PagarmeResponse, errors::ConnectorError> {
        self.interpret_response("authorize", res)
    }
}

impl ConnectorIntegration<Capture, PaymentsCaptureData, PagarmeResponse> for Pagarme {
    fn get_headers(
        &self,
        req: &PaymentsCaptureRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        req: &PaymentsCaptureRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        let id = transaction_reference(req.request.connector_transaction_id.as_ref())?;
        Ok(format!(
            "{}transactions/{id}/capture",
            self.base_url(connectors)
        ))
    }

    fn get_request_body(
        &self,
        req: &PaymentsCaptureRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.authenticated_body(pagarme::PagarmeEmptyRequest {}, &req.connector_auth_type)
            .map(Some)
    }

    fn handle_response(
        &self,
        _data: &PaymentsCaptureRouterData,
        res: Response,
    ) -> CustomResult<PagarmeResponse, errors::ConnectorError> {
        self.interpret_response("capture", res)
    }
}

impl ConnectorIntegration<Execute, RefundsData, PagarmeResponse> for Pagarme {
    fn get_headers(
        &self,
        req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        let id = transaction_reference(req.request.connector_transaction_id.as_ref())?;
        Ok(format!("{}transactions/{id}/refund", self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &RefundsRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.authenticated_body(pagarme::PagarmeEmptyRequest {}, &req.connector_auth_type)
            .map(Some)
    }

    fn handle_response(
        &self,
        _data: &RefundsRouterData,
        res: Response,
    ) -> CustomResult<PagarmeResponse, errors::ConnectorError> {
        self.interpret_response("refund", res)
    }
}

// The provider has no separate cancellation; a void is a full refund.
impl ConnectorIntegration<Void, PaymentsCancelData, PagarmeResponse> for Pagarme {
    fn get_headers(
        &self,
        req: &PaymentsCancelRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        req: &PaymentsCancelRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        let id = transaction_reference(req.request.connector_transaction_id.as_ref())?;
        Ok(format!("{}transactions/{id}/refund", self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &PaymentsCancelRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.authenticated_body(pagarme::PagarmeEmptyRequest {}, &req.connector_auth_type)
            .map(Some)
    }

    fn handle_response(
        &self,
        _data: &PaymentsCancelRouterData,
        res: Response,
    ) -> CustomResult<PagarmeResponse, errors::ConnectorError> {
        self.interpret_response("void", res)
    }
}

impl ConnectorIntegration<PSync, PaymentsSyncData, PagarmeResponse> for Pagarme {
    fn get_headers(
        &self,
        req: &PaymentsSyncRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_http_method(&self) -> Method {
        Method::Get
    }

    fn get_url(
        &self,
        req: &PaymentsSyncRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        let id = transaction_reference(req.request.connector_transaction_id.as_ref())?;
        Ok(format!("{}transactions/{id}", self.base_url(connectors)))
    }

    fn get_request_query(
        &self,
        req: &PaymentsSyncRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.authenticated_query(pagarme::PagarmeEmptyRequest {}, &req.connector_auth_type)
    }

    fn handle_response(
        &self,
        _data: &PaymentsSyncRouterData,
        res: Response,
    ) -> CustomResult<PagarmeResponse, errors::ConnectorError> {
        self.interpret_response("fetch_transaction", res)
    }
}

impl ConnectorIntegration<PaymentMethodToken, PaymentMethodTokenizationData, PagarmeResponse>
    for Pagarme
{
    fn get_headers(
        &self,
        req: &TokenizationRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        _req: &TokenizationRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!("{}cards", self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &TokenizationRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let connector_req = pagarme::PagarmeCardRequest::try_from(req)?;
        self.authenticated_body(connector_req, &req.connector_auth_type)
            .map(Some)
    }

    fn handle_response(
        &self,
        _data: &TokenizationRouterData,
        res: Response,
    ) -> CustomResult<PagarmeResponse, errors::ConnectorError> {
        self.interpret_response("create_card", res)
    }
}

impl ConnectorIntegration<CreateConnectorCustomer, ConnectorCustomerData, PagarmeResponse>
    for Pagarme
{
    fn get_headers(
        &self,
        req: &ConnectorCustomerRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        _req: &ConnectorCustomerRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!("{}customers", self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &ConnectorCustomerRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let connector_req = pagarme::PagarmeCustomer::try_from(req)?;
        self.authenticated_body(connector_req, &req.connector_auth_type)
            .map(Some)
    }

    fn handle_response(
        &self,
        _data: &ConnectorCustomerRouterData,
        res: Response,
    ) -> CustomResult<PagarmeResponse, errors::ConnectorError> {
        self.interpret_response("create_customer", res)
    }
}

impl ConnectorIntegration<CalculateInstallments, InstallmentsRequestData, PagarmeResponse>
    for Pagarme
{
    fn get_headers(
        &self,
        req: &InstallmentsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_http_method(&self) -> Method {
        Method::Get
    }

    fn get_url(
        &self,
        _req: &InstallmentsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!(
            "{}transactions/calculate_installments_amount",
            self.base_url(connectors)
        ))
    }

    fn get_request_query(
        &self,
        req: &InstallmentsRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let connector_req = pagarme::PagarmeInstallmentsQuery::try_from(req)?;
        self.authenticated_query(connector_req, &req.connector_auth_type)
    }

    fn handle_response(
        &self,
        _data: &InstallmentsRouterData,
        res: Response,
    ) -> CustomResult<PagarmeResponse, errors::ConnectorError> {
        self.interpret_response("calculate_installments", res)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use masking::Secret;
    use payment_interfaces::configs::{AuthMethod, ConnectorParams};

    use super::*;
    use crate::types::{PaymentsCaptureType, PaymentsSyncType, RefundExecuteType};

    fn connectors() -> Connectors {
        Connectors {
            pagarme: ConnectorParams {
                base_url: "https://api.pagar.me/1/".to_string(),
                auth_method: AuthMethod::BodyField,
            },
        }
    }

    fn body_key() -> ConnectorAuthType {
        ConnectorAuthType::BodyKey {
            api_key: Secret::new("ak_test_key".to_string()),
        }
    }

    #[test]
    fn basic_auth_header_uses_key_as_username() {
        let headers = Pagarme::new()
            .get_auth_header(&ConnectorAuthType::HeaderKey {
                api_key: Secret::new("ak_test_key".to_string()),
            })
            .unwrap();
        let (name, value) = headers.first().unwrap();
        assert_eq!(name, headers::AUTHORIZATION);
        assert!(value.is_masked());
        assert_eq!(value.clone().into_inner(), "Basic YWtfdGVzdF9rZXk6");

        assert!(Pagarme::new().get_auth_header(&body_key()).unwrap().is_empty());
        assert_eq!(
            Pagarme::new()
                .get_auth_header(&ConnectorAuthType::NoKey)
                .unwrap_err()
                .current_context(),
            &errors::ConnectorError::FailedToObtainAuthType
        );
    }

    #[test]
    fn capture_is_keyed_by_transaction_reference() {
        let connector: &PaymentsCaptureType = Pagarme::new();
        let req: PaymentsCaptureRouterData = RouterData::new(
            body_key(),
            PaymentsCaptureData {
                connector_transaction_id: Some("184220".to_string()),
            },
        );
        let request = connector.build_request(&req, &connectors()).unwrap().unwrap();
        assert_eq!(request.url, "https://api.pagar.me/1/transactions/184220/capture");
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body.as_ref().and_then(RequestContent::as_json),
            Some(&serde_json::json!({"api_key": "ak_test_key"}))
        );
    }

    #[test]
    fn missing_transaction_reference_fails_before_sending() {
        let connector: &PaymentsCaptureType = Pagarme::new();
        let req: PaymentsCaptureRouterData =
            RouterData::new(body_key(), PaymentsCaptureData::default());
        let err = connector.build_request(&req, &connectors()).unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::MissingRequiredField {
                field_name: "transaction_reference"
            }
        );
    }

    #[test]
    fn transaction_reference_must_be_a_single_path_segment() {
        let capture: &PaymentsCaptureType = Pagarme::new();
        for reference in ["184220/refund?x=", "184220#frag", "../cards", "18 42"] {
            let req: PaymentsCaptureRouterData = RouterData::new(
                body_key(),
                PaymentsCaptureData {
                    connector_transaction_id: Some(reference.to_string()),
                },
            );
            let err = capture.build_request(&req, &connectors()).unwrap_err();
            assert_eq!(
                err.current_context(),
                &errors::ConnectorError::InvalidDataFormat {
                    field_name: "transaction_reference"
                },
                "{reference}"
            );
        }

        let refund: &RefundExecuteType = Pagarme::new();
        let req: RefundsRouterData = RouterData::new(
            body_key(),
            RefundsData {
                connector_transaction_id: Some("tran_Ab-12_x".to_string()),
            },
        );
        let request = refund.build_request(&req, &connectors()).unwrap().unwrap();
        assert_eq!(
            request.url,
            "https://api.pagar.me/1/transactions/tran_Ab-12_x/refund"
        );
    }

    #[test]
    fn fetch_transaction_is_a_get_with_key_in_query() {
        let connector: &PaymentsSyncType = Pagarme::new();
        let req: PaymentsSyncRouterData = RouterData::new(
            body_key(),
            PaymentsSyncData {
                connector_transaction_id: Some("184220".to_string()),
            },
        );
        let request = connector.build_request(&req, &connectors()).unwrap().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "https://api.pagar.me/1/transactions/184220");
        assert!(request.body.is_none());
        assert_eq!(
            request.query.as_ref().and_then(RequestContent::as_query),
            Some(&[("api_key".to_string(), "ak_test_key".to_string())][..])
        );

        let basic: PaymentsSyncRouterData = RouterData::new(
            ConnectorAuthType::HeaderKey {
                api_key: Secret::new("ak_test_key".to_string()),
            },
            req.request.clone(),
        );
        let request = connector.build_request(&basic, &connectors()).unwrap().unwrap();
        assert!(request.query.is_none());
        assert!(request.get_header(headers::AUTHORIZATION).is_some());
    }
}
