use std::{collections::BTreeMap, fmt};

use common_utils::{errors::CustomResult, ext_traits::BytesExt, types::MinorUnit};
use error_stack::{report, ResultExt};
use masking::{PeekInterface, Secret};
use payment_interfaces::errors;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a provider resource; transactions use numbers, cards and customers may use
/// strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl ResourceId {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(number: i64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for ResourceId {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    Processing,
    Authorized,
    Paid,
    Refunded,
    WaitingPayment,
    PendingRefund,
    Refused,
    Chargedback,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PagarmeObjectReference {
    pub id: Option<ResourceId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PagarmeTransaction {
    pub id: Option<ResourceId>,
    pub status: Option<TransactionStatus>,
    pub card: Option<PagarmeObjectReference>,
    pub customer: Option<PagarmeObjectReference>,
    pub boleto_url: Option<Secret<String>>,
    pub boleto_barcode: Option<Secret<String>>,
    pub boleto_expiration_date: Option<String>,
    pub refuse_reason: Option<Secret<String>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PagarmeCardObject {
    pub id: Option<ResourceId>,
    pub customer: Option<PagarmeObjectReference>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PagarmeCustomerObject {
    pub id: Option<ResourceId>,
}

/// Resource kind named by the `object` field
#[derive(Clone, Debug)]
pub enum PagarmeObject {
    Transaction(PagarmeTransaction),
    Card(PagarmeCardObject),
    Customer(PagarmeCustomerObject),
    /// no `object` field, or one this crate does not model
    Unknown,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PagarmeErrorDetail {
    pub message: Option<String>,
    pub parameter_name: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

/// One row of an installments plan
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CalculatedInstallment {
    pub installment: u32,
    pub amount: MinorUnit,
    pub installment_amount: MinorUnit,
}

/// Payment slip details of a boleto transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Boleto {
    pub boleto_url: String,
    pub boleto_barcode: Option<String>,
    pub boleto_expiration_date: Option<String>,
}

/// Interpreted provider answer.
///
/// Provider-side failures (an `errors` list, a refused transaction) are ordinary values here;
/// check [`PagarmeResponse::is_successful`] and read [`PagarmeResponse::get_message`].
#[derive(Clone, Debug)]
pub struct PagarmeResponse {
    object: PagarmeObject,
    // any non-null `errors` value marks a failure, even one that is not a list
    errors: Option<Vec<PagarmeErrorDetail>>,
    installments: Option<BTreeMap<u32, CalculatedInstallment>>,
    data: Secret<Map<String, Value>>,
}

impl PagarmeResponse {
    pub fn from_value(value: Value) -> CustomResult<Self, errors::ConnectorError> {
        let object = match value.get("object").and_then(Value::as_str) {
            Some("transaction") => PagarmeObject::Transaction(
                deserialize_object(&value).attach_printable("Unable to read transaction object")?,
            ),
            Some("card") => PagarmeObject::Card(
                deserialize_object(&value).attach_printable("Unable to read card object")?,
            ),
            Some("customer") => PagarmeObject::Customer(
                deserialize_object(&value).attach_printable("Unable to read customer object")?,
            ),
            _ => PagarmeObject::Unknown,
        };

        let errors = match value.get("errors") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| PagarmeErrorDetail::deserialize(item).unwrap_or_default())
                    .collect(),
            ),
            Some(_) => Some(Vec::new()),
        };

        let installments = match value.get("installments") {
            Some(Value::Object(table)) => Some(parse_installments(table)?),
            _ => None,
        };

        let Value::Object(data) = value else {
            return Err(report!(errors::ConnectorError::ResponseDeserializationFailed))
                .attach_printable("Response body is not a JSON object");
        };

        Ok(Self {
            object,
            errors,
            installments,
            data: Secret::new(data),
        })
    }

    pub fn object(&self) -> &PagarmeObject {
        &self.object
    }

    pub fn is_successful(&self) -> bool {
        match &self.object {
            PagarmeObject::Transaction(transaction) => {
                transaction.status != Some(TransactionStatus::Refused)
            }
            PagarmeObject::Card(_) | PagarmeObject::Customer(_) | PagarmeObject::Unknown => {
                self.errors.is_none()
            }
        }
    }

    pub fn get_transaction_reference(&self) -> Option<&ResourceId> {
        match &self.object {
            PagarmeObject::Transaction(transaction) => transaction.id.as_ref(),
            PagarmeObject::Card(_) | PagarmeObject::Customer(_) | PagarmeObject::Unknown => None,
        }
    }

    pub fn get_card_reference(&self) -> Option<&ResourceId> {
        match &self.object {
            PagarmeObject::Card(card) => card.id.as_ref().filter(|id| !id.is_empty()),
            PagarmeObject::Transaction(transaction) => transaction
                .card
                .as_ref()
                .and_then(|card| card.id.as_ref()),
            PagarmeObject::Customer(_) | PagarmeObject::Unknown => None,
        }
    }

    pub fn get_customer_reference(&self) -> Option<&ResourceId> {
        match &self.object {
            PagarmeObject::Customer(customer) => customer.id.as_ref(),
            PagarmeObject::Transaction(PagarmeTransaction { customer, .. })
            | PagarmeObject::Card(PagarmeCardObject { customer, .. }) => {
                customer.as_ref().and_then(|customer| customer.id.as_ref())
            }
            PagarmeObject::Unknown => None,
        }
    }

    /// Failure message: the first error's message, else the refusal reason
    pub fn get_message(&self) -> Option<&str> {
        if self.is_successful() {
            return None;
        }
        if let Some(errors) = &self.errors {
            return errors.first().and_then(|error| error.message.as_deref());
        }
        match &self.object {
            PagarmeObject::Transaction(transaction) => transaction
                .refuse_reason
                .as_ref()
                .map(|reason| reason.peek().as_str()),
            PagarmeObject::Card(_) | PagarmeObject::Customer(_) | PagarmeObject::Unknown => None,
        }
    }

    pub fn get_errors(&self) -> &[PagarmeErrorDetail] {
        self.errors.as_deref().unwrap_or_default()
    }

    pub fn get_transaction_status(&self) -> Option<TransactionStatus> {
        match &self.object {
            PagarmeObject::Transaction(transaction) => transaction.status,
            PagarmeObject::Card(_) | PagarmeObject::Customer(_) | PagarmeObject::Unknown => None,
        }
    }

    pub fn get_boleto(&self) -> Option<Boleto> {
        let PagarmeObject::Transaction(transaction) = &self.object else {
            return None;
        };
        let boleto_url = transaction
            .boleto_url
            .as_ref()
            .map(|url| url.peek())
            .filter(|url| !url.is_empty())?;

        Some(Boleto {
            boleto_url: boleto_url.clone(),
            boleto_barcode: transaction
                .boleto_barcode
                .as_ref()
                .map(|barcode| barcode.peek().clone()),
            boleto_expiration_date: transaction.boleto_expiration_date.clone(),
        })
    }

    /// Installments plan keyed by installment count
    pub fn get_calculated_installments(&self) -> Option<&BTreeMap<u32, CalculatedInstallment>> {
        self.installments.as_ref()
    }

    /// The provider's JSON object as received
    pub fn get_data(&self) -> &Map<String, Value> {
        self.data.peek()
    }
}

impl TryFrom<&bytes::Bytes> for PagarmeResponse {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(body: &bytes::Bytes) -> Result<Self, Self::Error> {
        let value: Value = body
            .parse_struct("PagarmeResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        Self::from_value(value)
    }
}

fn deserialize_object<'de, T: Deserialize<'de>>(
    value: &'de Value,
) -> CustomResult<T, errors::ConnectorError> {
    T::deserialize(value).change_context(errors::ConnectorError::ResponseDeserializationFailed)
}

fn parse_installments(
    table: &Map<String, Value>,
) -> CustomResult<BTreeMap<u32, CalculatedInstallment>, errors::ConnectorError> {
    table
        .iter()
        .map(|(count, row)| -> CustomResult<_, errors::ConnectorError> {
            let count = count
                .parse::<u32>()
                .change_context(errors::ConnectorError::ResponseDeserializationFailed)
                .attach_printable_lazy(|| format!("Installment key {count:?} is not a number"))?;
            let row = deserialize_object(row)
                .attach_printable_lazy(|| format!("Unable to read installment {count}"))?;
            Ok((count, row))
        })
        .collect()
}
