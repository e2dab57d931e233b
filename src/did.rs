//! # DID Methods
//!
//! The closed set of DID methods a DID can be derived with, and the
//! method-specific creation options passed to the registration backend.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::Error;
use crate::jose::KeyHandle;
use crate::{jwk, key};

/// DID methods supported by this crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `did:key`
    #[default]
    Key,

    /// `did:jwk`
    Jwk,
}

impl Method {
    /// Build the creation options for this method from a key handle.
    ///
    /// Construction is deterministic: the same key and method always produce
    /// the same options. `did:key` always embeds a verification method for
    /// the key; `did:jwk` is derived from the key type alone.
    #[must_use]
    pub const fn create_options(&self, key: &KeyHandle) -> CreateOptions {
        match self {
            Self::Key => CreateOptions::Key(key::CreateOptions {
                key_type: key.key_type(),
                include_verification_method: true,
            }),
            Self::Jwk => CreateOptions::Jwk(jwk::CreateOptions {
                key_type: key.key_type(),
            }),
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Parse a method tag into a [`Method`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedMethod`], naming the tag, for anything
    /// outside the supported set.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "key" => Ok(Self::Key),
            "jwk" => Ok(Self::Jwk),
            _ => Err(Error::UnsupportedMethod(s.to_string())),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => write!(f, "key"),
            Self::Jwk => write!(f, "jwk"),
        }
    }
}

/// Method-specific options for the create operation, one variant per
/// supported method. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateOptions {
    /// Options for `did:key`.
    Key(key::CreateOptions),

    /// Options for `did:jwk`.
    Jwk(jwk::CreateOptions),
}
