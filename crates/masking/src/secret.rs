//!
//! Structure describing secret.
//!

use std::{fmt, marker::PhantomData};

use crate::{strategy::Strategy, PeekInterface};

///
/// Secret thing.
///
/// To get access to value use method `expose()` of trait [`crate::ExposeInterface`], or
/// `peek()` of [`crate::PeekInterface`] for a borrow.
///
/// ## Masking
/// The second generic parameter selects the [`Strategy`] used when the secret is printed with
/// `{:?}`. Domain crates define their own strategies (for example a card number that keeps its
/// BIN visible) and plug them in here.
///
/// ```
/// use masking::{Secret, Strategy};
/// use std::fmt;
///
/// enum LastTwo {}
///
/// impl<T: AsRef<str>> Strategy<T> for LastTwo {
///     fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         let val = val.as_ref();
///         let tail = val.get(val.len().saturating_sub(2)..).unwrap_or_default();
///         write!(f, "**{tail}")
///     }
/// }
///
/// let document: Secret<String, LastTwo> = Secret::new("21847812040".to_string());
/// assert_eq!("**40", format!("{document:?}"));
/// ```
///
pub struct Secret<S, I = crate::WithType>
where
    I: Strategy<S>,
{
    /// Inner secret value
    pub(crate) inner_secret: S,
    pub(crate) marker: PhantomData<I>,
}

impl<S, I> Secret<S, I>
where
    I: Strategy<S>,
{
    /// Take ownership of a secret value
    pub fn new(secret: S) -> Self {
        Self {
            inner_secret: secret,
            marker: PhantomData,
        }
    }

    /// Apply a function to the inner value, keeping it wrapped under the same strategy.
    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Secret<T, I>
    where
        I: Strategy<T>,
    {
        Secret::new(f(self.inner_secret))
    }
}

impl<S, I> PeekInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn peek(&self) -> &S {
        &self.inner_secret
    }
}

impl<S, I> From<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn from(secret: S) -> Self {
        Self::new(secret)
    }
}

impl<S, I> Clone for Secret<S, I>
where
    S: Clone,
    I: Strategy<S>,
{
    fn clone(&self) -> Self {
        Self::new(self.inner_secret.clone())
    }
}

impl<S, I> PartialEq for Secret<S, I>
where
    S: PartialEq,
    I: Strategy<S>,
{
    fn eq(&self, other: &Self) -> bool {
        self.peek().eq(other.peek())
    }
}

impl<S, I> Eq for Secret<S, I>
where
    S: Eq,
    I: Strategy<S>,
{
}

impl<S, I> fmt::Debug for Secret<S, I>
where
    I: Strategy<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        I::fmt(&self.inner_secret, f)
    }
}

impl<S, I> Default for Secret<S, I>
where
    S: Default,
    I: Strategy<S>,
{
    fn default() -> Self {
        S::default().into()
    }
}
