//! Gateway-agnostic input model and the request data carried by each flow.

use std::fmt;

use common_utils::{errors::CustomResult, types::StringMajorUnit};
use error_stack::{report, ResultExt};
use masking::{PeekInterface, Secret, Strategy, WithType};
use payment_interfaces::{
    api::ConnectorIntegration,
    errors,
    types::{flows, RouterData},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{connector::responses::PagarmeResponse, utils};

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Boleto,
}

/// Whether an authorization is captured in the same call
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CaptureMethod {
    /// Captured immediately (purchase)
    Automatic,
    /// Held until a separate capture
    #[default]
    Manual,
}

/// Shows the first six digits of card numbers of plausible length
#[derive(Debug)]
pub enum CardNumberStrategy {}

impl<T> Strategy<T> for CardNumberStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();

        if val_str.len() < 12 || val_str.len() > 19 {
            return WithType::fmt(val, f);
        }

        match val_str.get(..6) {
            Some(bin) => write!(f, "{}{}", bin, "*".repeat(val_str.len().saturating_sub(6))),
            None => WithType::fmt(val, f),
        }
    }
}

/// Primary account number, whitespace removed
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CardNumber(Secret<String, CardNumberStrategy>);

impl CardNumber {
    pub fn new(raw: &str) -> Self {
        Self(Secret::new(
            raw.chars().filter(|c| !c.is_whitespace()).collect(),
        ))
    }

    pub fn peek(&self) -> &str {
        self.0.peek()
    }
}

impl From<&str> for CardNumber {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Card expiry; two-digit years are taken as 20YY
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CardExpiry {
    month: u8,
    year: u16,
}

impl CardExpiry {
    pub fn new(month: u8, year: u16) -> CustomResult<Self, errors::ConnectorError> {
        let year = if year < 100 { year + 2000 } else { year };
        if !(1..=12).contains(&month) || !(1000..=9999).contains(&year) {
            return Err(report!(errors::ConnectorError::InvalidDataFormat {
                field_name: "card_expiration_date",
            }))
            .attach_printable(format!("Invalid card expiry {month}/{year}"));
        }
        Ok(Self { month, year })
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn year(self) -> u16 {
        self.year
    }

    /// Two-digit month followed by four-digit year, e.g. `062016`
    pub fn to_mmyyyy(self) -> String {
        format!("{:02}{:04}", self.month, self.year)
    }
}

/// CPF or CNPJ, digits only
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DocumentNumber(Secret<String>);

impl DocumentNumber {
    pub fn new(raw: &str) -> Self {
        Self(Secret::new(utils::normalize_document_number(raw)))
    }

    pub fn peek(&self) -> &str {
        self.0.peek()
    }

    pub fn is_empty(&self) -> bool {
        self.0.peek().is_empty()
    }
}

impl From<&str> for DocumentNumber {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Free-text postal address as the caller holds it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Address {
    /// `"street, number, complement"`
    pub line1: Option<Secret<String>>,
    /// neighborhood
    pub line2: Option<Secret<String>>,
    pub zipcode: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Customer data, either supplied directly or taken from a card holder
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Customer {
    pub name: Option<Secret<String>>,
    pub email: Option<Secret<String>>,
    pub document_number: Option<DocumentNumber>,
    pub birthday: Option<Date>,
    pub gender: Option<String>,
    pub address: Option<Address>,
    /// free-text phone number, split into area code and number on the wire
    pub phone: Option<Secret<String>>,
}

/// Full card details together with the card holder
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub number: CardNumber,
    pub expiry: CardExpiry,
    pub cvv: Secret<String>,
    pub holder: Customer,
}

/// Exactly one way of telling the provider which card to charge
#[derive(Clone, Debug, PartialEq)]
pub enum CardInput {
    Card(Box<Card>),
    /// Token produced client-side by the provider's JS library
    CardHash(Secret<String>),
    /// Identifier of a card stored earlier
    CardReference(String),
}

impl CardInput {
    /// Customer view derived from the card holder, for full cards only
    pub fn holder(&self) -> Option<&Customer> {
        match self {
            Self::Card(card) => Some(&card.holder),
            Self::CardHash(_) | Self::CardReference(_) => None,
        }
    }
}

/// Number of installments, between 1 and 12
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Installments(u8);

impl Installments {
    pub const MAX: u8 = 12;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Installments {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for Installments {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(report!(errors::ConnectorError::InvalidDataFormat {
                field_name: "installments",
            }))
            .attach_printable(format!("{value} installments is outside 1..={}", Self::MAX))
        }
    }
}

/// Statement descriptor, truncated to 13 characters on construction
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SoftDescriptor(String);

impl SoftDescriptor {
    pub fn new(raw: &str) -> Self {
        Self(utils::truncate_soft_descriptor(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SoftDescriptor {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Boleto due date (calendar date only)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BoletoExpirationDate(Date);

impl BoletoExpirationDate {
    pub fn parse(raw: &str) -> CustomResult<Self, errors::ConnectorError> {
        utils::parse_calendar_date(raw).map(Self)
    }

    pub fn date(self) -> Date {
        self.0
    }
}

impl From<Date> for BoletoExpirationDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

/// Authorize and purchase
#[derive(Clone, Debug, Default)]
pub struct PaymentsAuthorizeData {
    /// decimal amount in major units, e.g. `"12.00"`
    pub amount: Option<StringMajorUnit>,
    pub payment_method: Option<PaymentMethod>,
    pub card: Option<CardInput>,
    /// replaces the card-derived customer view when present
    pub customer: Option<Customer>,
    pub installments: Option<Installments>,
    pub soft_descriptor: Option<SoftDescriptor>,
    pub postback_url: Option<String>,
    pub boleto_expiration_date: Option<BoletoExpirationDate>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub capture_method: CaptureMethod,
}

impl PaymentsAuthorizeData {
    /// The same payment, captured in the same call
    pub fn purchase(self) -> Self {
        Self {
            capture_method: CaptureMethod::Automatic,
            ..self
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PaymentsCaptureData {
    pub connector_transaction_id: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct PaymentsCancelData {
    pub connector_transaction_id: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct RefundsData {
    pub connector_transaction_id: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct PaymentsSyncData {
    pub connector_transaction_id: Option<String>,
}

/// Store a card
#[derive(Clone, Debug, Default)]
pub struct PaymentMethodTokenizationData {
    pub card: Option<CardInput>,
    /// customer the card is attached to
    pub customer_reference: Option<String>,
}

/// Create a customer
#[derive(Clone, Debug, Default)]
pub struct ConnectorCustomerData {
    pub customer: Option<Customer>,
    pub card: Option<CardInput>,
    /// wins over any document number of the customer view
    pub document_number: Option<DocumentNumber>,
}

/// Ask for an installments plan
#[derive(Clone, Debug, Default)]
pub struct InstallmentsRequestData {
    pub amount: Option<StringMajorUnit>,
    pub max_installments: Option<Installments>,
    pub free_installments: Option<u8>,
    /// monthly interest rate in percent
    pub interest_rate: Option<Decimal>,
}

pub type PaymentsAuthorizeRouterData =
    RouterData<flows::Authorize, PaymentsAuthorizeData, PagarmeResponse>;
pub type PaymentsCaptureRouterData =
    RouterData<flows::Capture, PaymentsCaptureData, PagarmeResponse>;
pub type PaymentsCancelRouterData = RouterData<flows::Void, PaymentsCancelData, PagarmeResponse>;
pub type RefundsRouterData = RouterData<flows::Execute, RefundsData, PagarmeResponse>;
pub type PaymentsSyncRouterData = RouterData<flows::PSync, PaymentsSyncData, PagarmeResponse>;
pub type TokenizationRouterData =
    RouterData<flows::PaymentMethodToken, PaymentMethodTokenizationData, PagarmeResponse>;
pub type ConnectorCustomerRouterData =
    RouterData<flows::CreateConnectorCustomer, ConnectorCustomerData, PagarmeResponse>;
pub type InstallmentsRouterData =
    RouterData<flows::CalculateInstallments, InstallmentsRequestData, PagarmeResponse>;

/// Type alias for `ConnectorIntegration<Authorize, PaymentsAuthorizeData, PagarmeResponse>`
pub type PaymentsAuthorizeType =
    dyn ConnectorIntegration<flows::Authorize, PaymentsAuthorizeData, PagarmeResponse>;
/// Type alias for `ConnectorIntegration<Capture, PaymentsCaptureData, PagarmeResponse>`
pub type PaymentsCaptureType =
    dyn ConnectorIntegration<flows::Capture, PaymentsCaptureData, PagarmeResponse>;
/// Type alias for `ConnectorIntegration<Void, PaymentsCancelData, PagarmeResponse>`
pub type PaymentsVoidType =
    dyn ConnectorIntegration<flows::Void, PaymentsCancelData, PagarmeResponse>;
/// Type alias for `ConnectorIntegration<Execute, RefundsData, PagarmeResponse>`
pub type RefundExecuteType = dyn ConnectorIntegration<flows::Execute, RefundsData, PagarmeResponse>;
/// Type alias for `ConnectorIntegration<PSync, PaymentsSyncData, PagarmeResponse>`
pub type PaymentsSyncType =
    dyn ConnectorIntegration<flows::PSync, PaymentsSyncData, PagarmeResponse>;
/// Type alias for `ConnectorIntegration<PaymentMethodToken, PaymentMethodTokenizationData, PagarmeResponse>`
pub type TokenizationType = dyn ConnectorIntegration<
    flows::PaymentMethodToken,
    PaymentMethodTokenizationData,
    PagarmeResponse,
>;
/// Type alias for `ConnectorIntegration<CreateConnectorCustomer, ConnectorCustomerData, PagarmeResponse>`
pub type ConnectorCustomerType = dyn ConnectorIntegration<
    flows::CreateConnectorCustomer,
    ConnectorCustomerData,
    PagarmeResponse,
>;
/// Type alias for `ConnectorIntegration<CalculateInstallments, InstallmentsRequestData, PagarmeResponse>`
pub type InstallmentsType = dyn ConnectorIntegration<
    flows::CalculateInstallments,
    InstallmentsRequestData,
    PagarmeResponse,
>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn card_number_is_masked_in_debug_output() {
        let number = CardNumber::new("4242 4242 4242 4242");
        assert_eq!(number.peek(), "4242424242424242");
        assert_eq!(format!("{number:?}"), "CardNumber(424242**********)");

        let short = CardNumber::new("42424242");
        assert_eq!(
            format!("{short:?}"),
            "CardNumber(*** alloc::string::String ***)"
        );
    }

    #[test]
    fn expiry_is_month_then_four_digit_year() {
        assert_eq!(CardExpiry::new(6, 2016).unwrap().to_mmyyyy(), "062016");
        assert_eq!(CardExpiry::new(12, 30).unwrap().to_mmyyyy(), "122030");
    }

    #[test]
    fn expiry_month_out_of_range_is_rejected() {
        let err = CardExpiry::new(13, 2030).unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::InvalidDataFormat {
                field_name: "card_expiration_date"
            }
        );
    }

    #[test]
    fn document_number_is_normalized_on_construction() {
        let document = DocumentNumber::new("224.158.178-40");
        assert_eq!(document.peek(), "22415817840");
        assert!(DocumentNumber::new("n/a").is_empty());
        assert!(!format!("{document:?}").contains("22415817840"));
    }

    #[test]
    fn installments_are_bounded() {
        assert_eq!(Installments::try_from(1).unwrap().get(), 1);
        assert_eq!(Installments::try_from(12).unwrap().get(), 12);
        assert!(Installments::try_from(0).is_err());
        assert_eq!(
            Installments::try_from(13).unwrap_err().current_context(),
            &errors::ConnectorError::InvalidDataFormat {
                field_name: "installments"
            }
        );
        assert_eq!(Installments::default().get(), 1);
    }

    #[test]
    fn soft_descriptor_never_exceeds_thirteen_characters() {
        let descriptor = SoftDescriptor::new("testeDeApiLongerThan13");
        assert!(descriptor.as_str().chars().count() <= 13);
        assert_eq!(SoftDescriptor::from("testeDeApi").as_str(), "testeDeApi");
    }

    #[test]
    fn purchase_captures_immediately() {
        let data = PaymentsAuthorizeData::default();
        assert_eq!(data.capture_method, CaptureMethod::Manual);
        assert_eq!(data.purchase().capture_method, CaptureMethod::Automatic);
    }

    #[test]
    fn only_full_cards_carry_a_holder() {
        let hash = CardInput::CardHash(Secret::new("hash".to_string()));
        assert!(hash.holder().is_none());
        assert!(CardInput::CardReference("card_1".to_string())
            .holder()
            .is_none());
    }

    #[test]
    fn payment_method_wire_names() {
        assert_eq!(PaymentMethod::CreditCard.to_string(), "credit_card");
        assert_eq!(
            serde_json::to_value(PaymentMethod::Boleto).unwrap(),
            serde_json::json!("boleto")
        );
    }
}
