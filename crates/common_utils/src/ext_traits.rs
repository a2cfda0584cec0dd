//!
//! This module holds traits for extending functionalities for existing datatypes
//! & inbuilt datatypes.
//!

use error_stack::ResultExt;
use serde::{Deserialize, Serialize};

use crate::errors::{self, CustomResult};

///
/// Encode interface
/// An interface for performing type conversions and serialization
///
pub trait Encode<'e>
where
    Self: 'e + std::fmt::Debug,
{
    ///
    /// Functionality, for specifically encoding `Self` into `serde_json::Value`
    ///
    fn encode_to_value(&'e self) -> CustomResult<serde_json::Value, errors::EncodingError>
    where
        Self: Serialize;

    ///
    /// Converting `Self` into a list of `(key, value)` pairs for a URL query string
    ///
    fn encode_to_query_pairs(&'e self) -> CustomResult<Vec<(String, String)>, errors::EncodingError>
    where
        Self: Serialize;
}

impl<'e, A> Encode<'e> for A
where
    Self: 'e + std::fmt::Debug,
{
    fn encode_to_value(&'e self) -> CustomResult<serde_json::Value, errors::EncodingError>
    where
        Self: Serialize,
    {
        serde_json::to_value(self)
            .change_context(errors::EncodingError)
            .attach_printable_lazy(|| format!("Unable to convert {self:?} to a value"))
    }

    fn encode_to_query_pairs(&'e self) -> CustomResult<Vec<(String, String)>, errors::EncodingError>
    where
        Self: Serialize,
    {
        let encoded = serde_urlencoded::to_string(self)
            .change_context(errors::EncodingError)
            .attach_printable("Unable to convert request into a query string")?;
        serde_urlencoded::from_str(&encoded)
            .change_context(errors::EncodingError)
            .attach_printable("Unable to split query string into pairs")
    }
}

///
/// Extending functionalities of `bytes::Bytes`
///
pub trait BytesExt<T> {
    ///
    /// Convert `bytes::Bytes` into type `<T>` using `serde::Deserialize`
    ///
    fn parse_struct<'de>(&'de self, type_name: &str) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>;
}

impl<T> BytesExt<T> for bytes::Bytes {
    fn parse_struct<'de>(&'de self, type_name: &str) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>,
    {
        use bytes::Buf;

        serde_json::from_slice::<T>(self.chunk())
            .change_context(errors::ParsingError)
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from bytes"))
    }
}
