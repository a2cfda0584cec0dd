//! String normalizers shared by the payload builders.

use common_utils::errors::CustomResult;
use error_stack::{report, ResultExt};
use payment_interfaces::errors;
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::{format_description, time},
    Date, OffsetDateTime, PrimitiveDateTime,
};

/// Maximum length of the text shown on the cardholder's statement
pub const SOFT_DESCRIPTOR_MAX_LENGTH: usize = 13;

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const ISO_DATE_TIME: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const LONG_DAY_MONTH_YEAR: &[BorrowedFormatItem<'_>] = format_description!(
    "[day padding:none] [month repr:long case_sensitive:false] [year]"
);
const LONG_MONTH_DAY_YEAR: &[BorrowedFormatItem<'_>] = format_description!(
    "[month repr:long case_sensitive:false] [day padding:none], [year]"
);
const BOLETO_EXPIRATION: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const BORN_AT: &[BorrowedFormatItem<'_>] = format_description!("[month]-[day]-[year]");

pub(crate) fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> error_stack::Report<errors::ConnectorError> + 'static> {
    Box::new(move || {
        errors::ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

/// Keep only the decimal digits of `input`.
///
/// Used for CPF/CNPJ document numbers and as the first step of phone extraction.
pub fn normalize_document_number(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Area code and subscriber number of a Brazilian phone number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumber {
    /// area code
    pub ddd: String,
    /// subscriber number
    pub number: String,
}

/// Split a free-text phone number into area code and number.
///
/// A leading `0` is a trunk prefix and is dropped together with the area code that follows it.
/// Numbers with fewer than ten digits carry no area code.
pub fn extract_phone(input: Option<&str>) -> PhoneNumber {
    let digits = input.map(normalize_document_number).unwrap_or_default();

    if digits.starts_with('0') {
        PhoneNumber {
            ddd: clamped_slice(&digits, 1, 3).to_string(),
            number: clamped_slice(&digits, 3, digits.len()).to_string(),
        }
    } else if digits.len() < 10 {
        PhoneNumber {
            ddd: String::new(),
            number: digits,
        }
    } else {
        PhoneNumber {
            ddd: clamped_slice(&digits, 0, 2).to_string(),
            number: clamped_slice(&digits, 2, digits.len()).to_string(),
        }
    }
}

// ASCII only, so byte offsets are char offsets
fn clamped_slice(digits: &str, start: usize, end: usize) -> &str {
    let end = end.min(digits.len());
    digits.get(start.min(end)..end).unwrap_or_default()
}

/// Street part of an address written as `"street, number, complement"`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreetAddress {
    pub street: String,
    pub street_number: String,
    pub complementary: String,
}

/// Split the first address line on commas.
pub fn extract_address(line1: &str) -> StreetAddress {
    let mut segments = line1.split(',').map(str::trim);
    let mut next = || segments.next().unwrap_or_default().to_string();

    StreetAddress {
        street: next(),
        street_number: next(),
        complementary: next(),
    }
}

/// Cut a soft descriptor down to [`SOFT_DESCRIPTOR_MAX_LENGTH`] characters.
pub fn truncate_soft_descriptor(input: &str) -> String {
    input.chars().take(SOFT_DESCRIPTOR_MAX_LENGTH).collect()
}

/// Parse a calendar date, accepting ISO dates, RFC 3339 timestamps (taken in UTC) and spelled
/// out English dates such as `2 august 2015`.
pub fn parse_calendar_date(input: &str) -> CustomResult<Date, errors::ConnectorError> {
    let input = input.trim();

    if let Ok(date) = Date::parse(input, ISO_DATE) {
        return Ok(date);
    }
    if let Ok(timestamp) = OffsetDateTime::parse(input, &Rfc3339) {
        return Ok(timestamp.to_offset(time::UtcOffset::UTC).date());
    }
    [ISO_DATE_TIME, LONG_DAY_MONTH_YEAR, LONG_MONTH_DAY_YEAR]
        .into_iter()
        .find_map(|format| {
            PrimitiveDateTime::parse(input, format)
                .map(PrimitiveDateTime::date)
                .or_else(|_| Date::parse(input, format))
                .ok()
        })
        .ok_or_else(|| {
            report!(errors::ConnectorError::InvalidDataFormat {
                field_name: "boleto_expiration_date",
            })
        })
        .attach_printable_lazy(|| format!("Unrecognised date {input:?}"))
}

/// Anchor a boleto due date at 03:00:00 UTC and format it the way the provider expects.
pub fn format_boleto_expiration_date(date: Date) -> CustomResult<String, errors::ConnectorError> {
    date.with_time(time!(03:00))
        .assume_utc()
        .format(BOLETO_EXPIRATION)
        .change_context(errors::ConnectorError::InvalidDataFormat {
            field_name: "boleto_expiration_date",
        })
}

/// Normalize an optional boleto due date; `None` stays `None` so the field is left out.
pub fn normalize_boleto_expiration_date(
    input: Option<&str>,
) -> CustomResult<Option<String>, errors::ConnectorError> {
    input
        .map(|raw| parse_calendar_date(raw).and_then(format_boleto_expiration_date))
        .transpose()
}

/// Format a birthday as `MM-DD-YYYY`.
pub fn format_born_at(birthday: Date) -> CustomResult<String, errors::ConnectorError> {
    birthday
        .format(BORN_AT)
        .change_context(errors::ConnectorError::InvalidDataFormat {
            field_name: "born_at",
        })
}
