use common_utils::{errors::CustomResult, types::MinorUnit};
use error_stack::ResultExt;
use masking::{PeekInterface, Secret};
use payment_interfaces::{errors, types::ConnectorAuthType};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    types::{
        Address, Card, CardInput, CardNumber, CaptureMethod, ConnectorCustomerRouterData,
        Customer, DocumentNumber, InstallmentsRouterData, Installments, PaymentMethod,
        PaymentsAuthorizeRouterData, SoftDescriptor, TokenizationRouterData,
    },
    utils::{self, missing_field_err},
};

/// How the API key reaches the provider
#[derive(Clone, Debug)]
pub enum PagarmeAuthType {
    /// `api_key` field of the body or query string
    BodyKey { api_key: Secret<String> },
    /// HTTP Basic with the key as username and an empty password
    BasicAuth { api_key: Secret<String> },
}

impl PagarmeAuthType {
    fn body_key(&self) -> Option<Secret<String>> {
        match self {
            Self::BodyKey { api_key } => Some(api_key.clone()),
            Self::BasicAuth { .. } => None,
        }
    }
}

impl TryFrom<&ConnectorAuthType> for PagarmeAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key } => Ok(Self::BodyKey {
                api_key: api_key.to_owned(),
            }),
            ConnectorAuthType::HeaderKey { api_key } => Ok(Self::BasicAuth {
                api_key: api_key.to_owned(),
            }),
            ConnectorAuthType::NoKey => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

/// Any request payload, with `api_key` added in front when the key travels in the payload
#[derive(Debug, Serialize)]
pub struct PagarmeAuthenticatedRequest<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Secret<String>>,
    #[serde(flatten)]
    pub inner: T,
}

impl<T> PagarmeAuthenticatedRequest<T> {
    pub fn new(inner: T, auth: &PagarmeAuthType) -> Self {
        Self {
            api_key: auth.body_key(),
            inner,
        }
    }
}

/// Payload of capture, refund, void and fetch-transaction
#[derive(Debug, Default, Serialize)]
pub struct PagarmeEmptyRequest {}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum PagarmeCaptureFlag {
    #[serde(rename = "true")]
    Capture,
    #[serde(rename = "false")]
    Hold,
}

impl From<CaptureMethod> for PagarmeCaptureFlag {
    fn from(capture_method: CaptureMethod) -> Self {
        match capture_method {
            CaptureMethod::Automatic => Self::Capture,
            CaptureMethod::Manual => Self::Hold,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PagarmeTransactionRequest {
    pub amount: MinorUnit,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postback_url: Option<String>,
    pub installments: Installments,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_descriptor: Option<SoftDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub capture: PagarmeCaptureFlag,
    #[serde(flatten)]
    pub card: Option<PagarmeCardSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<PagarmeCustomer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boleto_expiration_date: Option<String>,
}

/// Which card to charge, flattened into the enclosing payload
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PagarmeCardSource {
    Card(PagarmeCard),
    CardHash { card_hash: Secret<String> },
    CardId { card_id: String },
}

impl From<&CardInput> for PagarmeCardSource {
    fn from(card: &CardInput) -> Self {
        match card {
            CardInput::Card(card) => Self::Card(PagarmeCard::from(card.as_ref())),
            CardInput::CardHash(card_hash) => Self::CardHash {
                card_hash: card_hash.clone(),
            },
            CardInput::CardReference(card_id) => Self::CardId {
                card_id: card_id.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PagarmeCard {
    pub card_number: CardNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder_name: Option<Secret<String>>,
    /// `MMYYYY`
    pub card_expiration_date: Secret<String>,
    pub card_cvv: Secret<String>,
}

impl From<&Card> for PagarmeCard {
    fn from(card: &Card) -> Self {
        Self {
            card_number: card.number.clone(),
            card_holder_name: card.holder.name.clone(),
            card_expiration_date: Secret::new(card.expiry.to_mmyyyy()),
            card_cvv: card.cvv.clone(),
        }
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct PagarmeCustomer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<DocumentNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// `MM-DD-YYYY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub born_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PagarmeAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<PagarmePhone>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct PagarmeAddress {
    pub street: Secret<String>,
    pub street_number: Secret<String>,
    pub complementary: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct PagarmePhone {
    pub ddd: Secret<String>,
    pub number: Secret<String>,
}

/// Whether city, state and country are part of the address object
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Locality {
    Include,
    Omit,
}

impl PagarmeCustomer {
    fn try_from_customer(
        customer: &Customer,
        locality: Locality,
    ) -> CustomResult<Self, errors::ConnectorError> {
        Ok(Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            document_number: customer
                .document_number
                .clone()
                .filter(|document| !document.is_empty()),
            sex: customer.gender.clone(),
            born_at: customer.birthday.map(utils::format_born_at).transpose()?,
            address: customer
                .address
                .as_ref()
                .map(|address| PagarmeAddress::from_address(address, locality)),
            phone: customer.phone.as_ref().map(|phone| {
                let utils::PhoneNumber { ddd, number } = utils::extract_phone(Some(phone.peek()));
                PagarmePhone {
                    ddd: Secret::new(ddd),
                    number: Secret::new(number),
                }
            }),
        })
    }

    fn has_document_number(&self) -> bool {
        self.document_number.is_some()
    }

    fn has_name_and_email(&self) -> bool {
        let present = |field: &Option<Secret<String>>| {
            field
                .as_ref()
                .is_some_and(|value| !value.peek().trim().is_empty())
        };
        present(&self.name) && present(&self.email)
    }
}

impl PagarmeAddress {
    fn from_address(address: &Address, locality: Locality) -> Self {
        let line1 = address
            .line1
            .as_ref()
            .map(|line| line.peek().as_str())
            .unwrap_or_default();
        let utils::StreetAddress {
            street,
            street_number,
            complementary,
        } = utils::extract_address(line1);

        let neighborhood = if street.is_empty() {
            None
        } else {
            address
                .line2
                .clone()
                .filter(|line| !line.peek().trim().is_empty())
        };
        let (city, state, country) = match locality {
            Locality::Include => (
                address.city.clone(),
                address.state.clone(),
                address.country.clone(),
            ),
            Locality::Omit => (None, None, None),
        };

        Self {
            street: Secret::new(street),
            street_number: Secret::new(street_number),
            complementary: Secret::new(complementary),
            neighborhood,
            zipcode: address.zipcode.clone(),
            city,
            state,
            country,
        }
    }
}

/// An explicit customer replaces the view derived from the card holder
fn resolve_customer<'a>(
    customer: Option<&'a Customer>,
    card: Option<&'a CardInput>,
) -> Option<&'a Customer> {
    customer.or_else(|| card.and_then(CardInput::holder))
}

impl TryFrom<&PaymentsAuthorizeRouterData> for PagarmeTransactionRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &PaymentsAuthorizeRouterData) -> Result<Self, Self::Error> {
        let request = &item.request;
        let amount = request
            .amount
            .as_ref()
            .ok_or_else(missing_field_err("amount"))?
            .to_minor_unit()
            .change_context(errors::ConnectorError::InvalidDataFormat {
                field_name: "amount",
            })?;
        let payment_method = request
            .payment_method
            .ok_or_else(missing_field_err("payment_method"))?;

        let (card, boleto_expiration_date) = match payment_method {
            PaymentMethod::CreditCard => {
                let card = request.card.as_ref().ok_or_else(missing_field_err("card"))?;
                (Some(PagarmeCardSource::from(card)), None)
            }
            PaymentMethod::Boleto => (
                None,
                request
                    .boleto_expiration_date
                    .map(|date| utils::format_boleto_expiration_date(date.date()))
                    .transpose()?,
            ),
        };

        let customer = resolve_customer(request.customer.as_ref(), request.card.as_ref())
            .map(|customer| PagarmeCustomer::try_from_customer(customer, Locality::Omit))
            .transpose()?;

        Ok(Self {
            amount,
            payment_method,
            postback_url: request.postback_url.clone(),
            installments: request.installments.unwrap_or_default(),
            soft_descriptor: request.soft_descriptor.clone(),
            metadata: request.metadata.clone(),
            capture: request.capture_method.into(),
            card,
            customer,
            boleto_expiration_date,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PagarmeCardRequest {
    #[serde(flatten)]
    pub card: PagarmeCardSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

impl TryFrom<&TokenizationRouterData> for PagarmeCardRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &TokenizationRouterData) -> Result<Self, Self::Error> {
        match &item.request.card {
            Some(CardInput::Card(card)) => Ok(Self {
                card: PagarmeCardSource::Card(PagarmeCard::from(card.as_ref())),
                customer_id: item.request.customer_reference.clone(),
            }),
            Some(CardInput::CardHash(card_hash)) => Ok(Self {
                card: PagarmeCardSource::CardHash {
                    card_hash: card_hash.clone(),
                },
                customer_id: None,
            }),
            Some(CardInput::CardReference(_)) | None => Err(missing_field_err("card_number")()),
        }
    }
}

impl TryFrom<&ConnectorCustomerRouterData> for PagarmeCustomer {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &ConnectorCustomerRouterData) -> Result<Self, Self::Error> {
        let request = &item.request;
        let mut customer = resolve_customer(request.customer.as_ref(), request.card.as_ref())
            .map(|customer| Self::try_from_customer(customer, Locality::Include))
            .transpose()?
            .unwrap_or_default();

        if let Some(document_number) = request
            .document_number
            .clone()
            .filter(|document| !document.is_empty())
        {
            customer.document_number = Some(document_number);
        }

        if customer.has_document_number() || customer.has_name_and_email() {
            Ok(customer)
        } else {
            Err(missing_field_err("document_number")())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PagarmeInstallmentsQuery {
    pub amount: MinorUnit,
    pub max_installments: Installments,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_installments: Option<u8>,
    pub interest_rate: Decimal,
}

impl TryFrom<&InstallmentsRouterData> for PagarmeInstallmentsQuery {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &InstallmentsRouterData) -> Result<Self, Self::Error> {
        let request = &item.request;
        let amount = request
            .amount
            .as_ref()
            .ok_or_else(missing_field_err("amount"))?
            .to_minor_unit()
            .change_context(errors::ConnectorError::InvalidDataFormat {
                field_name: "amount",
            })?;
        let interest_rate = request
            .interest_rate
            .ok_or_else(missing_field_err("interest_rate"))?;
        let max_installments = request
            .max_installments
            .ok_or_else(missing_field_err("max_installments"))?;

        Ok(Self {
            amount,
            max_installments,
            free_installments: request.free_installments,
            interest_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_utils::{ext_traits::Encode, types::StringMajorUnit};
    use payment_interfaces::types::RouterData;
    use serde_json::{json, Value};
    use time::macros::date;

    use super::*;
    use crate::types::{
        BoletoExpirationDate, CardExpiry, ConnectorCustomerData, InstallmentsRequestData,
        PaymentMethodTokenizationData, PaymentsAuthorizeData,
    };

    fn auth() -> ConnectorAuthType {
        ConnectorAuthType::BodyKey {
            api_key: Secret::new("ak_test_key".to_string()),
        }
    }

    fn holder() -> Customer {
        Customer {
            name: Some(Secret::new("Jane Doe".to_string())),
            email: Some(Secret::new("jane@example.com".to_string())),
            document_number: Some(DocumentNumber::new("224.158.178-40")),
            birthday: Some(date!(1988 - 02 - 28)),
            gender: Some("F".to_string()),
            address: Some(Address {
                line1: Some(Secret::new("Rua Foo Bar, 12, apto 3".to_string())),
                line2: Some(Secret::new("Centro".to_string())),
                zipcode: Some(Secret::new("05444040".to_string())),
                city: Some("São Paulo".to_string()),
                state: Some("SP".to_string()),
                country: Some("BR".to_string()),
            }),
            phone: Some(Secret::new("(019) 99298-9946".to_string())),
        }
    }

    fn full_card() -> CardInput {
        CardInput::Card(Box::new(Card {
            number: CardNumber::new("4242424242424242"),
            expiry: CardExpiry::new(6, 2016).unwrap(),
            cvv: Secret::new("123".to_string()),
            holder: holder(),
        }))
    }

    fn authorize(
        request: PaymentsAuthorizeData,
    ) -> Result<Value, error_stack::Report<errors::ConnectorError>> {
        let router_data: PaymentsAuthorizeRouterData = RouterData::new(auth(), request);
        let connector_request = PagarmeTransactionRequest::try_from(&router_data)?;
        Ok(serde_json::to_value(connector_request).unwrap())
    }

    fn card_payment() -> PaymentsAuthorizeData {
        PaymentsAuthorizeData {
            amount: Some(StringMajorUnit::from("12.00")),
            payment_method: Some(PaymentMethod::CreditCard),
            card: Some(full_card()),
            ..Default::default()
        }
    }

    #[test]
    fn authorize_emits_integer_amount_and_card_fields() {
        let body = authorize(PaymentsAuthorizeData {
            installments: Some(Installments::try_from(3).unwrap()),
            soft_descriptor: Some(SoftDescriptor::new("testeDeApiLongerThan13")),
            postback_url: Some("https://example.com/postback".to_string()),
            metadata: Some(json!({"order_id": "42"}).as_object().unwrap().clone()),
            ..card_payment()
        })
        .unwrap();

        assert_eq!(body["amount"], json!(1200));
        assert_eq!(body["payment_method"], json!("credit_card"));
        assert_eq!(body["capture"], json!("false"));
        assert_eq!(body["installments"], json!(3));
        assert_eq!(body["soft_descriptor"], json!("testeDeApiLon"));
        assert_eq!(body["postback_url"], json!("https://example.com/postback"));
        assert_eq!(body["metadata"], json!({"order_id": "42"}));
        assert_eq!(body["card_number"], json!("4242424242424242"));
        assert_eq!(body["card_holder_name"], json!("Jane Doe"));
        assert_eq!(body["card_expiration_date"], json!("062016"));
        assert_eq!(body["card_cvv"], json!("123"));
        assert!(body.get("card_hash").is_none());
        assert!(body.get("boleto_expiration_date").is_none());
    }

    #[test]
    fn card_holder_becomes_the_customer() {
        let body = authorize(card_payment()).unwrap();

        assert_eq!(
            body["customer"],
            json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "document_number": "22415817840",
                "sex": "F",
                "born_at": "02-28-1988",
                "address": {
                    "street": "Rua Foo Bar",
                    "street_number": "12",
                    "complementary": "apto 3",
                    "neighborhood": "Centro",
                    "zipcode": "05444040"
                },
                "phone": {"ddd": "19", "number": "992989946"}
            })
        );
    }

    #[test]
    fn purchase_sets_capture_flag() {
        let body = authorize(card_payment().purchase()).unwrap();
        assert_eq!(body["capture"], json!("true"));
    }

    #[test]
    fn card_payment_defaults_to_a_single_installment() {
        let body = authorize(card_payment()).unwrap();
        assert_eq!(body["installments"], json!(1));

        let body = authorize(card_payment().purchase()).unwrap();
        assert_eq!(body["installments"], json!(1));
    }

    #[test]
    fn card_hash_and_card_id_are_exclusive_alternatives() {
        let body = authorize(PaymentsAuthorizeData {
            card: Some(CardInput::CardHash(Secret::new("hash_123".to_string()))),
            ..card_payment()
        })
        .unwrap();
        assert_eq!(body["card_hash"], json!("hash_123"));
        assert!(body.get("card_number").is_none());
        assert!(body.get("customer").is_none());

        let body = authorize(PaymentsAuthorizeData {
            card: Some(CardInput::CardReference("card_xyz".to_string())),
            ..card_payment()
        })
        .unwrap();
        assert_eq!(body["card_id"], json!("card_xyz"));
        assert!(body.get("card_hash").is_none());
        assert!(body.get("card_number").is_none());
    }

    #[test]
    fn credit_card_without_card_fails_on_card() {
        let err = authorize(PaymentsAuthorizeData {
            card: None,
            ..card_payment()
        })
        .unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::MissingRequiredField { field_name: "card" }
        );
    }

    #[test]
    fn amount_is_checked_first() {
        let err = authorize(PaymentsAuthorizeData::default()).unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::MissingRequiredField {
                field_name: "amount"
            }
        );

        let err = authorize(PaymentsAuthorizeData {
            amount: Some(StringMajorUnit::from("12.345")),
            ..card_payment()
        })
        .unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::InvalidDataFormat {
                field_name: "amount"
            }
        );

        let err = authorize(PaymentsAuthorizeData {
            payment_method: None,
            ..card_payment()
        })
        .unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::MissingRequiredField {
                field_name: "payment_method"
            }
        );
    }

    #[test]
    fn boleto_uses_customer_override_and_omits_card() {
        let body = authorize(PaymentsAuthorizeData {
            amount: Some(StringMajorUnit::from("12.00")),
            payment_method: Some(PaymentMethod::Boleto),
            customer: Some(Customer {
                name: Some(Secret::new("John Roe".to_string())),
                document_number: Some(DocumentNumber::new("29.573.821/0001-52")),
                ..Default::default()
            }),
            boleto_expiration_date: Some(BoletoExpirationDate::parse("2 august 2015").unwrap()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(body["amount"], json!(1200));
        assert_eq!(body["payment_method"], json!("boleto"));
        assert_eq!(body["installments"], json!(1));
        assert_eq!(body["boleto_expiration_date"], json!("2015-08-02T03:00:00"));
        assert_eq!(
            body["customer"],
            json!({"name": "John Roe", "document_number": "29573821000152"})
        );
        for field in ["card_number", "card_hash", "card_id"] {
            assert!(body.get(field).is_none(), "{field} must be omitted");
        }
    }

    #[test]
    fn boleto_customer_override_replaces_card_holder() {
        let body = authorize(PaymentsAuthorizeData {
            payment_method: Some(PaymentMethod::Boleto),
            customer: Some(Customer {
                email: Some(Secret::new("other@example.com".to_string())),
                ..Default::default()
            }),
            ..card_payment()
        })
        .unwrap();
        assert_eq!(body["customer"], json!({"email": "other@example.com"}));
        assert!(body.get("card_number").is_none());
        assert!(body.get("boleto_expiration_date").is_none());
    }

    #[test]
    fn authenticated_body_starts_with_api_key() {
        let router_data: PaymentsAuthorizeRouterData = RouterData::new(auth(), card_payment());
        let auth_type = PagarmeAuthType::try_from(&router_data.connector_auth_type).unwrap();
        let request = PagarmeTransactionRequest::try_from(&router_data).unwrap();
        let body = PagarmeAuthenticatedRequest::new(request, &auth_type)
            .encode_to_value()
            .unwrap();
        assert_eq!(body["api_key"], json!("ak_test_key"));
        assert_eq!(body["amount"], json!(1200));

        let basic = PagarmeAuthType::try_from(&ConnectorAuthType::HeaderKey {
            api_key: Secret::new("ak_test_key".to_string()),
        })
        .unwrap();
        let body = PagarmeAuthenticatedRequest::new(PagarmeEmptyRequest {}, &basic)
            .encode_to_value()
            .unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let err = PagarmeAuthType::try_from(&ConnectorAuthType::NoKey).unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::FailedToObtainAuthType
        );
    }

    #[test]
    fn create_card_from_full_card_with_customer() {
        let router_data: TokenizationRouterData = RouterData::new(
            auth(),
            PaymentMethodTokenizationData {
                card: Some(full_card()),
                customer_reference: Some("14".to_string()),
            },
        );
        let body = serde_json::to_value(PagarmeCardRequest::try_from(&router_data).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "card_number": "4242424242424242",
                "card_holder_name": "Jane Doe",
                "card_expiration_date": "062016",
                "card_cvv": "123",
                "customer_id": "14"
            })
        );
    }

    #[test]
    fn create_card_from_hash_or_nothing() {
        let router_data: TokenizationRouterData = RouterData::new(
            auth(),
            PaymentMethodTokenizationData {
                card: Some(CardInput::CardHash(Secret::new("hash_123".to_string()))),
                customer_reference: None,
            },
        );
        let body = serde_json::to_value(PagarmeCardRequest::try_from(&router_data).unwrap()).unwrap();
        assert_eq!(body, json!({"card_hash": "hash_123"}));

        let router_data: TokenizationRouterData =
            RouterData::new(auth(), PaymentMethodTokenizationData::default());
        let err = PagarmeCardRequest::try_from(&router_data).unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::MissingRequiredField {
                field_name: "card_number"
            }
        );
    }

    #[test]
    fn create_customer_needs_document_or_name_and_email() {
        let router_data: ConnectorCustomerRouterData = RouterData::new(
            auth(),
            ConnectorCustomerData {
                customer: Some(Customer {
                    name: Some(Secret::new("Jane Doe".to_string())),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        let err = PagarmeCustomer::try_from(&router_data).unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::MissingRequiredField {
                field_name: "document_number"
            }
        );
    }

    #[test]
    fn create_customer_with_document_only() {
        let router_data: ConnectorCustomerRouterData = RouterData::new(
            auth(),
            ConnectorCustomerData {
                document_number: Some(DocumentNumber::new("224.158.178-40")),
                ..Default::default()
            },
        );
        let body = serde_json::to_value(PagarmeCustomer::try_from(&router_data).unwrap()).unwrap();
        assert_eq!(body, json!({"document_number": "22415817840"}));
    }

    #[test]
    fn create_customer_from_card_includes_locality() {
        let router_data: ConnectorCustomerRouterData = RouterData::new(
            auth(),
            ConnectorCustomerData {
                card: Some(full_card()),
                document_number: Some(DocumentNumber::new("111.222.333-44")),
                ..Default::default()
            },
        );
        let body = serde_json::to_value(PagarmeCustomer::try_from(&router_data).unwrap()).unwrap();
        assert_eq!(body["document_number"], json!("11122233344"));
        assert_eq!(body["name"], json!("Jane Doe"));
        assert_eq!(body["address"]["city"], json!("São Paulo"));
        assert_eq!(body["address"]["state"], json!("SP"));
        assert_eq!(body["address"]["country"], json!("BR"));
    }

    #[test]
    fn neighborhood_needs_a_street() {
        let address = PagarmeAddress::from_address(
            &Address {
                line1: Some(Secret::new(String::new())),
                line2: Some(Secret::new("Centro".to_string())),
                ..Default::default()
            },
            Locality::Omit,
        );
        assert_eq!(address.neighborhood, None);
        assert_eq!(address.street.peek(), "");
    }

    #[test]
    fn installments_query_requires_amount_rate_and_count() {
        let router_data: InstallmentsRouterData = RouterData::new(
            auth(),
            InstallmentsRequestData {
                amount: Some(StringMajorUnit::from("1200.00")),
                max_installments: Some(Installments::try_from(12).unwrap()),
                free_installments: Some(1),
                interest_rate: Some(Decimal::new(13, 1)),
            },
        );
        let auth_type = PagarmeAuthType::try_from(&router_data.connector_auth_type).unwrap();
        let query = PagarmeAuthenticatedRequest::new(
            PagarmeInstallmentsQuery::try_from(&router_data).unwrap(),
            &auth_type,
        );
        assert_eq!(
            query.encode_to_query_pairs().unwrap(),
            vec![
                ("api_key".to_string(), "ak_test_key".to_string()),
                ("amount".to_string(), "120000".to_string()),
                ("max_installments".to_string(), "12".to_string()),
                ("free_installments".to_string(), "1".to_string()),
                ("interest_rate".to_string(), "1.3".to_string()),
            ]
        );

        let missing_rate: InstallmentsRouterData = RouterData::new(
            auth(),
            InstallmentsRequestData {
                interest_rate: None,
                ..router_data.request.clone()
            },
        );
        assert_eq!(
            PagarmeInstallmentsQuery::try_from(&missing_rate)
                .unwrap_err()
                .current_context(),
            &errors::ConnectorError::MissingRequiredField {
                field_name: "interest_rate"
            }
        );

        let missing_count: InstallmentsRouterData = RouterData::new(
            auth(),
            InstallmentsRequestData {
                max_installments: None,
                ..router_data.request.clone()
            },
        );
        assert_eq!(
            PagarmeInstallmentsQuery::try_from(&missing_count)
                .unwrap_err()
                .current_context(),
            &errors::ConnectorError::MissingRequiredField {
                field_name: "max_installments"
            }
        );
    }
}
