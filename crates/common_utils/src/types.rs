//! Types that can be used in other crates
use std::{fmt::Display, str::FromStr};

use error_stack::{report, ResultExt};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::{
    consts,
    errors::{CustomResult, ParsingError},
};

/// This Unit struct represents MinorUnit in which core amount works
#[derive(
    Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// gets amount as i64 value
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Convert the amount to its major denomination, e.g. `1200` becomes `"12.00"`
    pub fn to_major_unit(self) -> StringMajorUnit {
        let major = Decimal::new(self.0, consts::MAX_AMOUNT_SCALE);
        StringMajorUnit(format!("{major:.2}"))
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amount expressed in major units as a decimal string (for example `"12.00"`)
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    /// Wrap a decimal string without validating it
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Borrow the decimal string
    pub fn get_amount_as_string(&self) -> &str {
        &self.0
    }

    /// Convert to integer minor units, e.g. `"12.00"` to `1200` and `"12.5"` to `1250`.
    ///
    /// Negative amounts and amounts with more significant fractional digits than the
    /// currency carries are rejected.
    pub fn to_minor_unit(&self) -> CustomResult<MinorUnit, ParsingError> {
        let major = Decimal::from_str(self.0.trim())
            .change_context(ParsingError)
            .attach_printable_lazy(|| format!("Amount {:?} is not a decimal number", self.0))?
            .normalize();

        if major.is_sign_negative() {
            return Err(report!(ParsingError))
                .attach_printable(format!("Amount {:?} is negative", self.0));
        }
        if major.scale() > consts::MAX_AMOUNT_SCALE {
            return Err(report!(ParsingError)).attach_printable(format!(
                "Amount {:?} has more than {} fractional digits",
                self.0,
                consts::MAX_AMOUNT_SCALE
            ));
        }

        major
            .checked_mul(Decimal::from(consts::MINOR_UNITS_PER_MAJOR))
            .and_then(|minor| minor.to_i64())
            .map(MinorUnit::new)
            .ok_or_else(|| report!(ParsingError))
            .attach_printable_lazy(|| format!("Amount {:?} does not fit in minor units", self.0))
    }
}

impl From<&str> for StringMajorUnit {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn converts_major_strings_to_minor_units() {
        assert_eq!(
            StringMajorUnit::from("12.00").to_minor_unit().unwrap(),
            MinorUnit::new(1200)
        );
        assert_eq!(
            StringMajorUnit::from("12.5").to_minor_unit().unwrap(),
            MinorUnit::new(1250)
        );
        assert_eq!(
            StringMajorUnit::from("1200.00").to_minor_unit().unwrap(),
            MinorUnit::new(120000)
        );
        assert_eq!(
            StringMajorUnit::from(" 10 ").to_minor_unit().unwrap(),
            MinorUnit::new(1000)
        );
        // trailing zeros past the second digit are not significant
        assert_eq!(
            StringMajorUnit::from("15.370").to_minor_unit().unwrap(),
            MinorUnit::new(1537)
        );
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(StringMajorUnit::from("12.345").to_minor_unit().is_err());
        assert!(StringMajorUnit::from("-1.00").to_minor_unit().is_err());
        assert!(StringMajorUnit::from("twelve").to_minor_unit().is_err());
        assert!(StringMajorUnit::from("").to_minor_unit().is_err());
    }

    #[test]
    fn minor_unit_renders_back_to_major() {
        assert_eq!(
            MinorUnit::new(1250).to_major_unit(),
            StringMajorUnit::from("12.50")
        );
        assert_eq!(serde_json::to_string(&MinorUnit::new(1200)).unwrap(), "1200");
    }

    proptest::proptest! {
        #[test]
        fn minor_major_minor_is_stable(cents in 0i64..1_000_000_000) {
            let minor = MinorUnit::new(cents);
            proptest::prop_assert_eq!(minor.to_major_unit().to_minor_unit().unwrap(), minor);
        }
    }
}
