//! Codec error model.

use thiserror::Error;

use checkout_core::{DomainError, SerialNumber};

pub type CodecResult<T> = Result<T, CodecError>;

/// Error reported by the provider in an `<error>` document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("checkout error (serial {serial_number}): {message}")]
pub struct CheckoutError {
    pub serial_number: SerialNumber,
    pub message: String,
    /// HTTP status of the response carrying the error, when the transport knows it.
    pub response_code: Option<u16>,
}

impl CheckoutError {
    pub fn with_response_code(mut self, code: u16) -> Self {
        self.response_code = Some(code);
        self
    }
}

/// Encode/decode error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The document is not well-formed XML.
    #[error("malformed xml: {0}")]
    Xml(String),

    #[error("<{parent}> is missing required element <{name}>")]
    MissingElement { parent: String, name: String },

    #[error("<{element}> is missing required attribute '{name}'")]
    MissingAttribute { element: String, name: String },

    #[error("<{element}> has invalid value '{value}': {reason}")]
    InvalidValue {
        element: String,
        value: String,
        reason: String,
    },

    /// Root element no decoder is registered for.
    #[error("unknown document root <{0}>")]
    UnknownRoot(String),

    /// Known document type that this codec does not decode.
    #[error("unsupported document <{0}>")]
    Unsupported(String),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CodecError {
    pub fn missing_element(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingElement {
            parent: parent.into(),
            name: name.into(),
        }
    }

    pub fn missing_attribute(element: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            name: name.into(),
        }
    }

    pub fn invalid_value(element: impl Into<String>, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidValue {
            element: element.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<quick_xml::Error> for CodecError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for CodecError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for CodecError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for CodecError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Xml(err.to_string())
    }
}
