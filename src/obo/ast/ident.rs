//! OBO identifiers
//!
//! An identifier is either prefixed (`MS:1000031`), unprefixed
//! (`part_of`), or a URL. The textual separator between prefix and local
//! part is the *first unescaped colon*; later colons belong to the local
//! part. Identifiers are immutable once constructed: the constructors
//! validate their parts and parsing goes through the same constructors.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::obo::lexing;

/// An OBO identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Ident {
    /// An identifier with an idspace prefix, like `GO:0005739`.
    Prefixed { prefix: String, local: String },
    /// A bare identifier, like `part_of`.
    Unprefixed(String),
    /// A URL identifier, like `http://purl.obolibrary.org/obo/GO_0005739`.
    Url(String),
}

/// Validation failures raised by the identifier constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentError {
    /// An identifier part was empty.
    Empty { part: &'static str },
    /// An identifier part contained a character OBO identifiers cannot
    /// carry, such as raw whitespace.
    IllegalCharacter { part: &'static str, character: char },
    /// A URL identifier did not start with a recognized scheme.
    InvalidScheme { value: String },
}

impl fmt::Display for IdentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentError::Empty { part } => write!(f, "identifier {} must not be empty", part),
            IdentError::IllegalCharacter { part, character } => {
                write!(
                    f,
                    "identifier {} contains illegal character {:?}",
                    part, character
                )
            }
            IdentError::InvalidScheme { value } => {
                write!(f, "URL identifier {:?} must use the http or https scheme", value)
            }
        }
    }
}

impl std::error::Error for IdentError {}

fn check_part(part: &'static str, value: &str) -> Result<(), IdentError> {
    if value.is_empty() {
        return Err(IdentError::Empty { part });
    }
    for character in value.chars() {
        if character.is_whitespace() {
            return Err(IdentError::IllegalCharacter { part, character });
        }
    }
    Ok(())
}

impl Ident {
    /// Create a prefixed identifier from decoded parts.
    pub fn prefixed(
        prefix: impl Into<String>,
        local: impl Into<String>,
    ) -> Result<Self, IdentError> {
        let prefix = prefix.into();
        let local = local.into();
        check_part("prefix", &prefix)?;
        check_part("local part", &local)?;
        Ok(Ident::Prefixed { prefix, local })
    }

    /// Create an unprefixed identifier from a decoded value.
    pub fn unprefixed(value: impl Into<String>) -> Result<Self, IdentError> {
        let value = value.into();
        check_part("value", &value)?;
        Ok(Ident::Unprefixed(value))
    }

    /// Create a URL identifier.
    pub fn url(value: impl Into<String>) -> Result<Self, IdentError> {
        let value = value.into();
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(IdentError::InvalidScheme { value });
        }
        check_part("URL", &value)?;
        Ok(Ident::Url(value))
    }

    /// Check whether a raw string parses as a valid OBO identifier.
    pub fn is_valid(text: &str) -> bool {
        text.parse::<Ident>().is_ok()
    }

    /// The idspace prefix, for prefixed identifiers.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Ident::Prefixed { prefix, .. } => Some(prefix),
            _ => None,
        }
    }

    /// The local part, for prefixed identifiers.
    pub fn local(&self) -> Option<&str> {
        match self {
            Ident::Prefixed { local, .. } => Some(local),
            _ => None,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Prefixed { prefix, local } => write!(
                f,
                "{}:{}",
                lexing::escaped(prefix, lexing::IDENT_PREFIX_SPECIALS),
                lexing::escaped(local, lexing::IDENT_LOCAL_SPECIALS)
            ),
            Ident::Unprefixed(value) => {
                f.write_str(&lexing::escaped(value, lexing::IDENT_PREFIX_SPECIALS))
            }
            Ident::Url(value) => f.write_str(value),
        }
    }
}

impl FromStr for Ident {
    type Err = IdentError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.starts_with("http://") || text.starts_with("https://") {
            return Ident::url(text);
        }
        match lexing::find_unescaped(text, ':') {
            Some(index) => Ident::prefixed(
                lexing::unescape(&text[..index]),
                lexing::unescape(&text[index + 1..]),
            ),
            None => Ident::unprefixed(lexing::unescape(text)),
        }
    }
}
