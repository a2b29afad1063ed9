//! The finished URI value.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::builder::UriBuilder;
use crate::error::BuilderError;

/// An assembled URI.
///
/// Produced by the build operations of [`UriBuilder`]; immutable once
/// built. Compares, orders, and hashes by its textual form.
///
/// # Examples
///
/// ```
/// use templated_uri::Uri;
///
/// let uri = Uri::parse("http://foo/bar?q=1")?;
/// assert_eq!(uri.as_str(), "http://foo/bar?q=1");
/// # Ok::<(), templated_uri::BuilderError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    value: String,
}

impl Uri {
    pub(crate) fn from_assembled(value: String) -> Self {
        Self { value }
    }

    /// Parses and renormalizes an existing URI string.
    ///
    /// Equivalent to seeding a builder and assembling it with escapes
    /// preserved; aside from the `+`-in-query rule the text comes back
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if the input cannot be parsed or contains
    /// template placeholders.
    pub fn parse(input: &str) -> Result<Self, BuilderError> {
        UriBuilder::from_uri(input)?.build_from_encoded(&[])
    }

    /// The URI text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consumes the URI, returning the owned text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Uri {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<&str> for Uri {
    type Error = BuilderError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
