//!
//! Serde-related.
//!

use serde::{de, Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{PeekInterface, Secret, Strategy};

/// Marker trait for secret types which can be [`Serialize`]-d by [`serde`].
///
/// Only types marked with this trait receive a [`Serialize`] impl for `Secret<T>`, so a new
/// secret type has to opt in before it can leave the process inside a request body.
pub trait SerializableSecret: Serialize {}

impl SerializableSecret for Value {}
impl SerializableSecret for String {}
impl SerializableSecret for u8 {}
impl SerializableSecret for u16 {}
impl SerializableSecret for i64 {}

impl<'de, T, I> Deserialize<'de> for Secret<T, I>
where
    T: de::DeserializeOwned + Sized,
    I: Strategy<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::new)
    }
}

/// Secrets serialize in exposed form: request bodies sent to the provider need the clear value.
impl<T, I> Serialize for Secret<T, I>
where
    T: SerializableSecret + Serialize + Sized,
    I: Strategy<T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.peek().serialize(serializer)
    }
}
